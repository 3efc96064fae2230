use super::*;
use dialogwatch_protocols::{AccessibilityApi, AccessibleRef, WindowError, WindowManager};

fn browser_with_dialog(desktop: &SimulatedDesktop) -> (WindowHandle, WindowHandle, WindowHandle) {
    let main = desktop.add_window(WindowSpec::new("IEFrame", "Blank - Internet Explorer").process_id(42));
    let dialog = desktop.add_window(WindowSpec::new("#32770", "Message from webpage").owner(main));
    let ok = desktop.add_child(dialog, WindowSpec::new("Button", "OK").control_id(2));
    (main, dialog, ok)
}

#[test]
fn test_top_level_enumeration_order() {
    let desktop = SimulatedDesktop::new();
    let (main, dialog, ok) = browser_with_dialog(&desktop);
    let top = desktop.top_level_windows().unwrap();
    assert_eq!(top, vec![main, dialog]);
    assert!(!top.contains(&ok));
}

#[test]
fn test_child_inherits_process_id() {
    let desktop = SimulatedDesktop::new();
    let main = desktop.add_window(WindowSpec::new("IEFrame", "").process_id(7));
    let child = desktop.add_child(main, WindowSpec::new("Static", "x"));
    assert_eq!(desktop.process_id(child), 7);
    assert_eq!(desktop.parent(child), main);
}

#[test]
fn test_nested_children_depth_first() {
    let desktop = SimulatedDesktop::new();
    let top = desktop.add_window(WindowSpec::new("Dialog", "t"));
    let a = desktop.add_child(top, WindowSpec::new("Panel", "a"));
    let a1 = desktop.add_child(a, WindowSpec::new("Button", "a1"));
    let b = desktop.add_child(top, WindowSpec::new("Button", "b"));
    assert_eq!(desktop.child_windows(top).unwrap(), vec![a, a1, b]);
}

#[test]
fn test_click_closes_wired_window() {
    let desktop = SimulatedDesktop::new();
    let (_, dialog, ok) = browser_with_dialog(&desktop);
    desktop.close_on_click(ok, dialog);
    desktop.click(ok).unwrap();
    assert_eq!(desktop.clicks(), vec![ok]);
    assert!(!desktop.is_window(dialog));
    assert!(!desktop.is_window(ok));
}

#[test]
fn test_queries_on_destroyed_window_are_empty() {
    let desktop = SimulatedDesktop::new();
    let (_, dialog, _) = browser_with_dialog(&desktop);
    desktop.destroy_window(dialog);
    assert_eq!(WindowManager::text(&desktop, dialog), "");
    assert!(!desktop.is_visible(dialog));
    assert!(matches!(desktop.close(dialog), Err(WindowError::NotFound(_))));
}

#[test]
fn test_post_char_records_text() {
    let desktop = SimulatedDesktop::new();
    let (_, dialog, _) = browser_with_dialog(&desktop);
    let edit = desktop.add_child(dialog, WindowSpec::new("Edit", ""));
    for c in "ab{~}".chars() {
        desktop.post_char(edit, c).unwrap();
    }
    assert_eq!(desktop.posted_text(edit), "ab{~}");
}

#[test]
fn test_enumeration_failure_toggle() {
    let desktop = SimulatedDesktop::new();
    desktop.fail_enumeration(Some("display closed"));
    assert!(desktop.top_level_windows().is_err());
    desktop.fail_enumeration(None);
    assert!(desktop.top_level_windows().is_ok());
}

#[test]
fn test_accessible_reference_counting() {
    let desktop = SimulatedDesktop::new();
    let window = desktop.add_window(WindowSpec::new("MozillaWindowClass", "Firefox"));
    let root = desktop.add_accessible_root(window, NodeSpec::new(AccessibleRole::Dialog, "Alert"));
    desktop.add_accessible_child(root, NodeSpec::new(AccessibleRole::Label, "hello"));
    desktop.add_accessible_child(root, NodeSpec::new(AccessibleRole::PushButton, "OK"));

    let root_ref = desktop.window_root(window).unwrap();
    let children = desktop.children(root_ref);
    assert_eq!(children.len(), 2);
    assert_eq!(desktop.outstanding_references(), 3);

    for child in children {
        desktop.release(child);
    }
    desktop.release(root_ref);
    assert_eq!(desktop.outstanding_references(), 0);
    assert_eq!(desktop.over_releases(), 0);

    desktop.release(root_ref);
    assert_eq!(desktop.over_releases(), 1);
}

#[test]
fn test_accessible_action_closes_window() {
    let desktop = SimulatedDesktop::new();
    let window = desktop.add_window(WindowSpec::new("MozillaDialogClass", "Alert"));
    let root = desktop.add_accessible_root(window, NodeSpec::new(AccessibleRole::Dialog, "Alert"));
    let ok = desktop.add_accessible_child(root, NodeSpec::new(AccessibleRole::PushButton, "OK"));
    desktop.close_on_action(ok, window);

    desktop.do_action(AccessibleRef(ok), 0).unwrap();
    assert_eq!(desktop.performed_actions(), vec![(ok, 0)]);
    assert!(!desktop.is_window(window));
    assert!(!desktop.is_valid(AccessibleRef(ok)));
}

#[test]
fn test_do_action_out_of_range() {
    let desktop = SimulatedDesktop::new();
    let window = desktop.add_window(WindowSpec::new("Frame", ""));
    let root = desktop.add_accessible_root(window, NodeSpec::new(AccessibleRole::Label, "l"));
    assert!(desktop.do_action(AccessibleRef(root), 0).is_err());
}

#[test]
fn test_editable_text() {
    let desktop = SimulatedDesktop::new();
    let window = desktop.add_window(WindowSpec::new("Frame", ""));
    let root = desktop.add_accessible_root(window, NodeSpec::new(AccessibleRole::Dialog, ""));
    let field = desktop.add_accessible_child(root, NodeSpec::new(AccessibleRole::Text, "User").editable());
    let label = desktop.add_accessible_child(root, NodeSpec::new(AccessibleRole::Label, "Name"));

    desktop.set_text(AccessibleRef(field), "alice").unwrap();
    assert_eq!(desktop.node_text(field).as_deref(), Some("alice"));
    assert!(desktop.set_text(AccessibleRef(label), "x").is_err());
}

#[test]
fn test_hidden_node_states() {
    let spec = NodeSpec::new(AccessibleRole::PushButton, "Cancel").hidden();
    assert!(!spec.states.contains(&AccessibleState::Visible));
    assert!(spec.states.contains(&AccessibleState::Enabled));
    assert_eq!(spec.actions, 1);
}

#[test]
fn test_connection_counts() {
    let desktop = SimulatedDesktop::new();
    desktop.connect().unwrap();
    assert!(desktop.is_connected());
    desktop.disconnect();
    assert!(!desktop.is_connected());
    assert_eq!(desktop.connection_counts(), (1, 1));
}
