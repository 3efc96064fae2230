//! Output parsers for the X11 command-line tools.

use dialogwatch_protocols::{Rect, WindowHandle};

/// One line of `wmctrl -l -p` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WmctrlEntry {
    pub handle: WindowHandle,
    pub desktop: i32,
    pub pid: u32,
    pub title: String,
}

/// Parse a hex window id such as `0x02c00004`.
pub fn parse_window_id(token: &str) -> Option<WindowHandle> {
    let hex = token.trim().trim_end_matches(':');
    let digits = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok().map(WindowHandle)
}

/// Parse `wmctrl -l -p` output.
pub fn parse_wmctrl_windows(output: &str) -> Vec<WmctrlEntry> {
    let mut windows = Vec::new();

    for line in output.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            continue;
        }

        // wmctrl -l -p format:
        // 0x02c00004  0 12345  hostname Window Title
        let Some(handle) = parse_window_id(parts[0]) else {
            continue;
        };
        let desktop = parts[1].parse().unwrap_or(-1);
        let pid = parts[2].parse().unwrap_or(0);
        let title = parts[4..].join(" ");

        windows.push(WmctrlEntry {
            handle,
            desktop,
            pid,
            title,
        });
    }

    windows
}

/// Window ids listed by `xwininfo -tree`, in tree order.
pub fn parse_xwininfo_tree(output: &str) -> Vec<WindowHandle> {
    output
        .lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with("0x"))
        .filter_map(|line| line.split_whitespace().next().and_then(parse_window_id))
        .collect()
}

/// Summary of `xwininfo -id` output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XwininfoSummary {
    pub viewable: bool,
    pub bounds: Option<Rect>,
}

pub fn parse_xwininfo(output: &str) -> XwininfoSummary {
    let mut x = None;
    let mut y = None;
    let mut width = None;
    let mut height = None;
    let mut viewable = false;

    for line in output.lines() {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "Absolute upper-left X" => x = value.parse().ok(),
            "Absolute upper-left Y" => y = value.parse().ok(),
            "Width" => width = value.parse().ok(),
            "Height" => height = value.parse().ok(),
            "Map State" => viewable = value == "IsViewable",
            _ => {}
        }
    }

    let bounds = match (x, y, width, height) {
        (Some(x), Some(y), Some(w), Some(h)) => Some(Rect::new(x, y, w, h)),
        _ => None,
    };
    XwininfoSummary { viewable, bounds }
}

/// Parent of a window from `xwininfo -children` output; none when the parent is the root.
pub fn parse_xwininfo_parent(output: &str) -> WindowHandle {
    let mut root = None;
    let mut parent = None;
    for line in output.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("Root window id:") {
            root = rest.split_whitespace().next().and_then(parse_window_id);
        } else if let Some(rest) = line.strip_prefix("Parent window id:") {
            parent = rest.split_whitespace().next().and_then(parse_window_id);
        }
    }
    match parent {
        Some(p) if Some(p) != root => p,
        _ => WindowHandle::NONE,
    }
}

/// Class part of `WM_CLASS(STRING) = "Navigator", "Firefox"`.
pub fn parse_wm_class(output: &str) -> Option<String> {
    let (_, value) = output.split_once('=')?;
    let parts: Vec<&str> = value.split(',').map(|p| p.trim().trim_matches('"')).collect();
    parts.last().filter(|p| !p.is_empty()).map(|p| p.to_string())
}

/// Window id from `WM_TRANSIENT_FOR(WINDOW): window id # 0x2c00004`.
pub fn parse_transient_for(output: &str) -> WindowHandle {
    output
        .split_once('#')
        .and_then(|(_, id)| parse_window_id(id))
        .unwrap_or(WindowHandle::NONE)
}

/// Number from `_NET_WM_PID(CARDINAL) = 12345`.
pub fn parse_cardinal(output: &str) -> Option<u32> {
    output.split_once('=')?.1.trim().parse().ok()
}
