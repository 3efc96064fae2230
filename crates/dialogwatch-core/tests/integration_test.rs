//! End-to-end tests: poller, classifiers, wrapper factory and watcher against
//! a simulated desktop.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use dialogwatch_core::{
    AlertDialog, DialogFactory, LogonDialog, ManagerState, MessageDialog, VbScriptAbortRetryIgnoreDialog,
    VbScriptYesNoDialog, create_dialog_watcher,
};
use dialogwatch_desktop::{SimulatedDesktop, WindowSpec};
use dialogwatch_protocols::{BrowserKind, DialogError, DialogKind, EnumerationMethod};

use common::*;

// ============================================================================
// Dialog found once
// ============================================================================

#[test]
fn test_alert_raised_once_while_open() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let main = ie_main_window(&desktop);
    let session = create_dialog_watcher(
        ie_system(&desktop),
        BrowserKind::InternetExplorer,
        &fast_config(BrowserKind::InternetExplorer),
    )
    .unwrap();
    assert_eq!(session.main_window_handle(), main);

    let seen = Arc::new(AtomicUsize::new(0));
    let handler = {
        let seen = Arc::clone(&seen);
        session.watcher().set_handler::<AlertDialog>(Arc::new(move |_: &AlertDialog| -> Result<(), DialogError> {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }))
    };
    handler.set_auto_dispose(false);

    let (dialog, _) = ie_message_box(&desktop, main, "Message from webpage", &[2]);
    assert!(wait_for(|| seen.load(Ordering::SeqCst) == 1));

    let scans = session.manager().scan_count();
    assert!(wait_for(|| session.manager().scan_count() >= scans + 3));
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(session.manager().handled_windows(), vec![dialog]);
    assert_eq!(handler.handle_count(), 1);
}

#[test]
fn test_handler_answers_alert() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let main = ie_main_window(&desktop);
    let session = create_dialog_watcher(
        ie_system(&desktop),
        BrowserKind::InternetExplorer,
        &fast_config(BrowserKind::InternetExplorer),
    )
    .unwrap();
    session
        .watcher()
        .set_handler::<AlertDialog>(Arc::new(|alert: &AlertDialog| alert.click_ok()));

    let (dialog, buttons) = ie_message_box(&desktop, main, "Message from webpage", &[2]);
    assert!(wait_for(|| !desktop.is_alive(dialog)));
    assert!(wait_for(|| session.manager().handled_windows().is_empty()));
    assert_eq!(desktop.clicks(), vec![buttons[0]]);
}

// ============================================================================
// VBScript variants
// ============================================================================

#[test]
fn test_vbscript_variants_through_expectations() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let main = ie_main_window(&desktop);
    let session = create_dialog_watcher(
        ie_system(&desktop),
        BrowserKind::InternetExplorer,
        &fast_config(BrowserKind::InternetExplorer),
    )
    .unwrap();
    let watcher = session.watcher();

    let expectation = watcher.expect_within::<VbScriptAbortRetryIgnoreDialog>(Duration::from_secs(5));
    let (dialog, buttons) = ie_message_box(&desktop, main, "VBScript: Disk error", &[3, 4, 5]);
    let abort_retry_ignore = expectation.object().unwrap();
    assert_eq!(abort_retry_ignore.title().unwrap(), "VBScript: Disk error");
    abort_retry_ignore.click_abort().unwrap();
    assert!(!desktop.is_alive(dialog));

    let expectation = watcher.expect_within::<VbScriptYesNoDialog>(Duration::from_secs(5));
    let (_, yes_no_buttons) = ie_message_box(&desktop, main, "VBScript: Continue?", &[6, 7]);
    expectation.object().unwrap().click_yes().unwrap();

    assert_eq!(desktop.clicks(), vec![buttons[0], yes_no_buttons[0]]);
}

#[test]
fn test_vbscript_ok_cancel_has_no_wrapper() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let main = ie_main_window(&desktop);
    let session = create_dialog_watcher(
        ie_system(&desktop),
        BrowserKind::InternetExplorer,
        &fast_config(BrowserKind::InternetExplorer),
    )
    .unwrap();
    assert!(!session.watcher().factory().is_registered(DialogKind::VbScriptOkCancel));

    let expectation = session.watcher().expect_within::<VbScriptYesNoDialog>(Duration::from_millis(300));
    let (dialog, _) = ie_message_box(&desktop, main, "VBScript: Save?", &[1, 2]);

    // Raised and tracked, but nothing can wrap it.
    assert!(wait_for(|| session.manager().handled_windows() == vec![dialog]));
    assert!(expectation.object().is_none());
    assert!(expectation.timeout_reached());
    assert!(session.manager().is_running());
    assert!(desktop.is_alive(dialog));
}

// ============================================================================
// Keystroke escaping
// ============================================================================

#[test]
fn test_keystrokes_escape_special_characters() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let system = ie_system(&desktop);
    let dialog = desktop.add_window(WindowSpec::new("#32770", "Connect"));
    let special = desktop.add_child(dialog, WindowSpec::new("Edit", "").control_id(1));
    let plain = desktop.add_child(dialog, WindowSpec::new("Edit", "").control_id(2));

    system
        .window(special, EnumerationMethod::WindowManagementApi)
        .send_keystrokes("a~b")
        .unwrap();
    system
        .window(plain, EnumerationMethod::WindowManagementApi)
        .send_keystrokes("ab")
        .unwrap();

    assert_eq!(desktop.posted_text(special), "a{~}b");
    assert_eq!(desktop.posted_text(plain), "ab");
}

// ============================================================================
// Expectation timeouts
// ============================================================================

#[test]
fn test_zero_timeout_expectation_uses_default() {
    let desktop = Arc::new(SimulatedDesktop::new());
    firefox_main_window(&desktop);
    let session = create_dialog_watcher(
        firefox_system(&desktop),
        BrowserKind::Firefox,
        &fast_config(BrowserKind::Firefox),
    )
    .unwrap();
    let watcher = session.watcher();

    let zero = watcher.expect_within::<LogonDialog>(Duration::ZERO).timeout();
    watcher.reset_handler::<LogonDialog>();
    let default = watcher.expect::<LogonDialog>().timeout();

    assert_eq!(zero, default);
    assert_eq!(default, Duration::from_secs(30));
}

// ============================================================================
// Firefox
// ============================================================================

#[test]
fn test_firefox_logon_through_expectation() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let main = firefox_main_window(&desktop);
    let session = create_dialog_watcher(
        firefox_system(&desktop),
        BrowserKind::Firefox,
        &fast_config(BrowserKind::Firefox),
    )
    .unwrap();
    assert!(desktop.is_connected());

    let expectation = session.watcher().expect_within::<LogonDialog>(Duration::from_secs(5));
    let logon = firefox_logon(&desktop, main);
    let dialog = expectation.object().unwrap();
    dialog.log_on("carol", "s3cret").unwrap();

    assert_eq!(desktop.node_text(logon.user).as_deref(), Some("carol"));
    assert_eq!(desktop.node_text(logon.password).as_deref(), Some("s3cret"));
    assert!(!desktop.is_alive(logon.dialog));

    drop(dialog);
    drop(expectation);
    session.shutdown();
    assert!(!desktop.is_connected());
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_missing_browser_window() {
    let desktop = Arc::new(SimulatedDesktop::new());
    ie_main_window(&desktop);
    let err = create_dialog_watcher(
        firefox_system(&desktop),
        BrowserKind::Firefox,
        &fast_config(BrowserKind::Firefox),
    )
    .unwrap_err();
    assert!(matches!(err, DialogError::NoBrowserWindow(ref class) if class == "MozillaWindowClass"));
}

#[test]
fn test_no_events_after_shutdown() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let main = ie_main_window(&desktop);
    let session = create_dialog_watcher(
        ie_system(&desktop),
        BrowserKind::InternetExplorer,
        &fast_config(BrowserKind::InternetExplorer),
    )
    .unwrap();
    let seen = Arc::new(AtomicUsize::new(0));
    {
        let seen = Arc::clone(&seen);
        session.watcher().set_handler::<AlertDialog>(Arc::new(move |_: &AlertDialog| -> Result<(), DialogError> {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));
    }

    session.shutdown();
    assert_eq!(session.manager().state(), ManagerState::Stopped);
    ie_message_box(&desktop, main, "Message from webpage", &[2]);
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(seen.load(Ordering::SeqCst), 0);
}

#[test]
fn test_manager_stops_when_browser_closes() {
    let desktop = Arc::new(SimulatedDesktop::new());
    let main = ie_main_window(&desktop);
    let session = create_dialog_watcher(
        ie_system(&desktop),
        BrowserKind::InternetExplorer,
        &fast_config(BrowserKind::InternetExplorer),
    )
    .unwrap();

    desktop.destroy_window(main);
    assert!(wait_for(|| !session.manager().is_running()));
}

#[test]
fn test_builtin_factory_covers_all_but_ok_cancel() {
    let factory = DialogFactory::builtin().unwrap();
    let missing: Vec<DialogKind> = DialogKind::ALL
        .into_iter()
        .filter(|kind| !factory.is_registered(*kind))
        .collect();
    assert_eq!(missing, vec![DialogKind::VbScriptOkCancel]);
}
