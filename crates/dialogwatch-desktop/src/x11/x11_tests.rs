use super::parsers::*;
use super::*;

#[test]
fn test_parse_window_id() {
    assert_eq!(parse_window_id("0x02c00004"), Some(WindowHandle(0x02c0_0004)));
    assert_eq!(parse_window_id("0x1e00003:"), Some(WindowHandle(0x1e0_0003)));
    assert_eq!(parse_window_id("12345"), None);
    assert_eq!(parse_window_id("0xZZ"), None);
}

#[test]
fn test_parse_wmctrl_windows() {
    let output = "\
0x02c00004  0 12345  host Mozilla Firefox
0x03a00001 -1 999    host Desktop
garbage line
";
    let windows = parse_wmctrl_windows(output);
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].handle, WindowHandle(0x02c0_0004));
    assert_eq!(windows[0].pid, 12345);
    assert_eq!(windows[0].title, "Mozilla Firefox");
    assert_eq!(windows[1].desktop, -1);
}

#[test]
fn test_parse_xwininfo_tree() {
    let output = r#"
xwininfo: Window id: 0x2c00004 "Alert"

  Root window id: 0x1e1 (the root window) (has no name)
  Parent window id: 0x1e1 (the root window) (has no name)
     2 children:
     0x2c00005 "OK": ("button" "Button")  60x20+10+40  +110+240
        0x2c00006 (has no name): ()  1x1+0+0  +110+240
"#;
    assert_eq!(
        parse_xwininfo_tree(output),
        vec![WindowHandle(0x2c0_0005), WindowHandle(0x2c0_0006)]
    );
}

#[test]
fn test_parse_xwininfo_summary() {
    let output = "
  Absolute upper-left X:  100
  Absolute upper-left Y:  200
  Width: 320
  Height: 140
  Map State: IsViewable
";
    let info = parse_xwininfo(output);
    assert!(info.viewable);
    assert_eq!(info.bounds, Some(Rect::new(100, 200, 320, 140)));
}

#[test]
fn test_parse_xwininfo_unmapped() {
    let info = parse_xwininfo("  Map State: IsUnMapped\n");
    assert!(!info.viewable);
    assert!(info.bounds.is_none());
}

#[test]
fn test_parse_parent_root_is_none() {
    let output = "  Root window id: 0x1e1 (the root window)\n  Parent window id: 0x1e1 (the root window)\n";
    assert!(parse_xwininfo_parent(output).is_none());
    let output = "  Root window id: 0x1e1 (the root window)\n  Parent window id: 0x2c00004 \"Alert\"\n";
    assert_eq!(parse_xwininfo_parent(output), WindowHandle(0x2c0_0004));
}

#[test]
fn test_parse_wm_class() {
    assert_eq!(
        parse_wm_class("WM_CLASS(STRING) = \"Navigator\", \"Firefox\"\n").as_deref(),
        Some("Firefox")
    );
    assert_eq!(parse_wm_class("WM_CLASS:  not found."), None);
}

#[test]
fn test_parse_transient_for() {
    assert_eq!(
        parse_transient_for("WM_TRANSIENT_FOR(WINDOW): window id # 0x2c00004\n"),
        WindowHandle(0x2c0_0004)
    );
    assert!(parse_transient_for("WM_TRANSIENT_FOR:  not found.").is_none());
}

#[test]
fn test_parse_cardinal() {
    assert_eq!(parse_cardinal("_NET_WM_PID(CARDINAL) = 12345\n"), Some(12345));
    assert_eq!(parse_cardinal("_NET_WM_PID:  not found."), None);
}

#[test]
fn test_x11_desktop_new() {
    assert!(X11Desktop::new().is_ok());
}

#[test]
fn test_none_handle_is_not_a_window() {
    let desktop = X11Desktop::default();
    assert!(!desktop.is_window(WindowHandle::NONE));
}
