//! Shared fixtures: simulated desktops with browser windows and dialogs.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use dialogwatch_config::Config;
use dialogwatch_core::{TryUntilTimeout, WindowSystem};
use dialogwatch_desktop::{NodeSpec, SimulatedDesktop, WindowSpec};
use dialogwatch_protocols::{AccessibleRole, BrowserKind, Platform, WindowHandle};

pub fn ie_system(desktop: &Arc<SimulatedDesktop>) -> Arc<WindowSystem> {
    Arc::new(WindowSystem::new(desktop.clone(), Platform::Windows).with_keystroke_delay(Duration::ZERO))
}

pub fn firefox_system(desktop: &Arc<SimulatedDesktop>) -> Arc<WindowSystem> {
    Arc::new(
        WindowSystem::new(desktop.clone(), Platform::UnixLike)
            .with_accessibility(desktop.clone())
            .with_keystroke_delay(Duration::ZERO),
    )
}

/// Configuration with millisecond polling so tests stay fast.
pub fn fast_config(browser: BrowserKind) -> Config {
    let mut config = Config::default();
    config.watcher.browser = browser;
    config.watcher.poll_interval_ms = 10;
    config.watcher.shutdown_check_ms = 5;
    config.dialogs.dismiss_timeout_secs = 2;
    config.expectation.max_retry_sleep_ms = 10;
    config
}

pub fn wait_for(condition: impl Fn() -> bool) -> bool {
    TryUntilTimeout::try_for(Duration::from_secs(5), || Ok(condition()))
}

pub fn ie_main_window(desktop: &SimulatedDesktop) -> WindowHandle {
    desktop.add_window(WindowSpec::new("IEFrame", "Example - Windows Internet Explorer"))
}

/// IE message box owned by `main`. Every button closes it.
///
/// Dialogs are built hidden and shown once complete so the poller never
/// classifies a half-built window.
pub fn ie_message_box(
    desktop: &SimulatedDesktop,
    main: WindowHandle,
    title: &str,
    buttons: &[i32],
) -> (WindowHandle, Vec<WindowHandle>) {
    let dialog = desktop.add_window(WindowSpec::new("#32770", title).owner(main).hidden());
    let handles = buttons
        .iter()
        .map(|id| {
            let button = desktop.add_child(dialog, WindowSpec::new("Button", format!("Button {}", id)).control_id(*id));
            desktop.close_on_click(button, dialog);
            button
        })
        .collect();
    desktop.add_child(dialog, WindowSpec::new("Static", "Something happened").control_id(0xFFFF));
    desktop.set_window_visible(dialog, true);
    (dialog, handles)
}

pub fn firefox_main_window(desktop: &SimulatedDesktop) -> WindowHandle {
    desktop.add_window(WindowSpec::new("MozillaWindowClass", "Example - Mozilla Firefox"))
}

pub struct FirefoxLogon {
    pub dialog: WindowHandle,
    pub user: u64,
    pub password: u64,
}

/// Firefox authentication prompt owned by `main`; OK closes it.
pub fn firefox_logon(desktop: &SimulatedDesktop, main: WindowHandle) -> FirefoxLogon {
    let dialog = desktop.add_window(WindowSpec::new("MozillaDialogClass", "Authentication Required").owner(main).hidden());
    let root = desktop.add_accessible_root(dialog, NodeSpec::new(AccessibleRole::Dialog, "Authentication Required"));
    desktop.add_accessible_child(root, NodeSpec::new(AccessibleRole::Label, "Enter credentials"));
    let ok = desktop.add_accessible_child(root, NodeSpec::new(AccessibleRole::PushButton, "OK"));
    desktop.add_accessible_child(root, NodeSpec::new(AccessibleRole::PushButton, "Cancel"));
    desktop.add_accessible_child(root, NodeSpec::new(AccessibleRole::Label, "User Name:"));
    let user = desktop.add_accessible_child(root, NodeSpec::new(AccessibleRole::Text, "").editable());
    desktop.add_accessible_child(root, NodeSpec::new(AccessibleRole::Label, "Password:"));
    let password = desktop.add_accessible_child(root, NodeSpec::new(AccessibleRole::PasswordText, "").editable());
    desktop.close_on_action(ok, dialog);
    desktop.set_window_visible(dialog, true);
    FirefoxLogon { dialog, user, password }
}
