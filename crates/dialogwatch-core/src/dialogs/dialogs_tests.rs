use std::sync::Arc;
use std::time::Duration;

use dialogwatch_desktop::{SimulatedDesktop, WindowSpec};
use dialogwatch_protocols::{DialogError, DialogKind, EnumerationMethod, Platform, WindowHandle};

use super::*;
use crate::classifier::{IeJavaScriptClassifier, IeLogonClassifier, IeVbScriptClassifier};
use crate::dialog::{DialogClassifier, NativeDialog};
use crate::window::WindowSystem;

fn system(desktop: &Arc<SimulatedDesktop>) -> Arc<WindowSystem> {
    Arc::new(WindowSystem::new(desktop.clone(), Platform::Windows).with_keystroke_delay(Duration::ZERO))
}

/// Message box whose buttons all close it; returns the dialog and its buttons.
fn message_box(desktop: &SimulatedDesktop, title: &str, buttons: &[i32]) -> (WindowHandle, Vec<WindowHandle>) {
    let dialog = desktop.add_window(WindowSpec::new("#32770", title));
    let handles = buttons
        .iter()
        .map(|id| {
            let button = desktop.add_child(dialog, WindowSpec::new("Button", format!("Button {}", id)).control_id(*id));
            desktop.close_on_click(button, dialog);
            button
        })
        .collect();
    desktop.add_child(dialog, WindowSpec::new("Static", "Continue?").control_id(0xFFFF));
    (dialog, handles)
}

fn wrap<D: Dialog>(
    system: &Arc<WindowSystem>,
    classifier: Arc<dyn DialogClassifier>,
    dialog: WindowHandle,
) -> D {
    let window = system.window(dialog, EnumerationMethod::WindowManagementApi);
    let kind = classifier.classify(window.as_ref()).expect("classified");
    assert_eq!(kind, D::KIND);
    D::from_native(Arc::new(NativeDialog::new(kind, classifier, window, Duration::from_secs(2))))
}

#[test]
fn test_alert_reads_and_clicks_ok() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let system = system(&desktop);
    let (dialog, buttons) = message_box(&desktop, "Message from webpage", &[2]);
    let alert: AlertDialog = wrap(&system, Arc::new(IeJavaScriptClassifier), dialog);

    assert_eq!(alert.title().unwrap(), "Message from webpage");
    assert_eq!(alert.message().unwrap(), "Continue?");
    assert_eq!(alert.handle(), dialog);
    assert!(alert.exists());

    alert.click_ok().unwrap();
    assert_eq!(desktop.clicks(), vec![buttons[0]]);
    assert!(!alert.exists());
    assert!(alert.native_dialog().is_dismissed());
}

#[test]
fn test_confirm_cancel() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let system = system(&desktop);
    let (dialog, buttons) = message_box(&desktop, "Message from webpage", &[1, 2]);
    let confirm: ConfirmDialog = wrap(&system, Arc::new(IeJavaScriptClassifier), dialog);

    confirm.click_cancel().unwrap();
    assert_eq!(desktop.clicks(), vec![buttons[1]]);
    assert!(!desktop.is_alive(dialog));
}

#[test]
fn test_vbscript_variants_press_their_buttons() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let system = system(&desktop);

    let (yes_no, yes_no_buttons) = message_box(&desktop, "VBScript: Question", &[6, 7]);
    let dialog: VbScriptYesNoDialog = wrap(&system, Arc::new(IeVbScriptClassifier), yes_no);
    dialog.click_no().unwrap();

    let (ari, ari_buttons) = message_box(&desktop, "VBScript: Disk", &[3, 4, 5]);
    let dialog: VbScriptAbortRetryIgnoreDialog = wrap(&system, Arc::new(IeVbScriptClassifier), ari);
    assert_eq!(dialog.message().unwrap(), "Continue?");
    dialog.click_ignore().unwrap();

    let (retry, retry_buttons) = message_box(&desktop, "VBScript: Retry", &[4, 2]);
    let dialog: VbScriptRetryCancelDialog = wrap(&system, Arc::new(IeVbScriptClassifier), retry);
    dialog.click_retry().unwrap();

    assert_eq!(
        desktop.clicks(),
        vec![yes_no_buttons[1], ari_buttons[2], retry_buttons[0]]
    );
}

#[test]
fn test_vbscript_yes_no_cancel_and_ok_only() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let system = system(&desktop);

    let (ync, ync_buttons) = message_box(&desktop, "VBScript", &[6, 7, 2]);
    let dialog: VbScriptYesNoCancelDialog = wrap(&system, Arc::new(IeVbScriptClassifier), ync);
    dialog.click_cancel().unwrap();

    let (ok, ok_buttons) = message_box(&desktop, "VBScript", &[2]);
    let dialog: VbScriptOkOnlyDialog = wrap(&system, Arc::new(IeVbScriptClassifier), ok);
    dialog.click_ok().unwrap();

    assert_eq!(desktop.clicks(), vec![ync_buttons[2], ok_buttons[0]]);
}

#[test]
fn test_logon_fills_fields_and_confirms() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let system = system(&desktop);
    let dialog = desktop.add_window(WindowSpec::new("#32770", "Connect to example.com"));
    let credentials = desktop.add_child(dialog, WindowSpec::new("SysCredential", ""));
    let user = desktop.add_child(credentials, WindowSpec::new("Edit", "").control_id(0x3EB));
    let password = desktop.add_child(credentials, WindowSpec::new("Edit", "").control_id(0x3ED));
    let ok = desktop.add_child(dialog, WindowSpec::new("Button", "OK").control_id(1));
    desktop.add_child(dialog, WindowSpec::new("Button", "Cancel").control_id(2));
    desktop.close_on_click(ok, dialog);

    let logon: LogonDialog = wrap(&system, Arc::new(IeLogonClassifier), dialog);
    logon.log_on("bob", "secret").unwrap();

    assert_eq!(desktop.posted_text(user), "bob");
    assert_eq!(desktop.posted_text(password), "secret");
    assert_eq!(desktop.clicks(), vec![ok]);
    assert!(!logon.exists());
}

#[test]
fn test_default_action_force_closes() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let system = system(&desktop);
    let (dialog, _) = message_box(&desktop, "Message from webpage", &[1, 2]);
    let confirm: ConfirmDialog = wrap(&system, Arc::new(IeJavaScriptClassifier), dialog);

    confirm.do_default_action().unwrap();
    assert!(desktop.clicks().is_empty());
    assert!(!desktop.is_alive(dialog));
}

#[test]
fn test_dispose_releases_native_window() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let system = system(&desktop);
    let (dialog, _) = message_box(&desktop, "Message from webpage", &[2]);
    let alert: AlertDialog = wrap(&system, Arc::new(IeJavaScriptClassifier), dialog);

    alert.dispose();
    alert.dispose();
    assert!(!alert.exists());
    assert!(matches!(alert.title(), Err(DialogError::Disposed)));
    assert!(desktop.is_alive(dialog));
}

#[test]
fn test_wrapper_kinds() {
    assert_eq!(AlertDialog::KIND, DialogKind::Alert);
    assert_eq!(ConfirmDialog::KIND, DialogKind::Confirm);
    assert_eq!(LogonDialog::KIND, DialogKind::Logon);
    assert_eq!(RestoreSessionDialog::KIND, DialogKind::FirefoxRestoreSession);
    assert_eq!(VbScriptOkOnlyDialog::KIND, DialogKind::VbScriptOkOnly);
    assert_eq!(VbScriptYesNoDialog::KIND, DialogKind::VbScriptYesNo);
    assert_eq!(VbScriptYesNoCancelDialog::KIND, DialogKind::VbScriptYesNoCancel);
    assert_eq!(VbScriptRetryCancelDialog::KIND, DialogKind::VbScriptRetryCancel);
    assert_eq!(VbScriptAbortRetryIgnoreDialog::KIND, DialogKind::VbScriptAbortRetryIgnore);
}
