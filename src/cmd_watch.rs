//! `dialogwatch watch`: attach to a running browser until interrupted.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use dialogwatch_config::Config;
use dialogwatch_core::{
    AlertDialog, ConfirmDialog, Dialog, DialogWatcher, LogonDialog, RestoreSessionDialog,
    VbScriptAbortRetryIgnoreDialog, VbScriptOkOnlyDialog, VbScriptRetryCancelDialog,
    VbScriptYesNoCancelDialog, VbScriptYesNoDialog, WindowSystem, create_dialog_watcher,
};
use dialogwatch_protocols::{BrowserKind, DialogError, EnumerationMethod, Platform};

use crate::desktop;

/// How often the foreground loop checks whether the poller is still alive.
const LIVENESS_CHECK: Duration = Duration::from_millis(500);

pub(crate) async fn run(mut config: Config, browser: Option<BrowserKind>, auto_dismiss: bool) -> anyhow::Result<()> {
    let browser = browser.unwrap_or(config.watcher.browser);
    config.watcher.browser = browser;

    let window_manager = desktop::window_manager()?;
    if let Some(message) = fall_back_to_native_enumeration(&mut config) {
        warn!("{}", message);
    }
    let system = Arc::new(
        WindowSystem::new(window_manager, Platform::current()).with_keystroke_delay(config.dialogs.keystroke_delay()),
    );

    let session = create_dialog_watcher(system, browser, &config)
        .with_context(|| format!("Failed to attach to {}", browser.display_name()))?;
    install_handlers(session.watcher(), auto_dismiss);
    info!(
        "Watching {} window {}{}",
        browser.display_name(),
        session.main_window_handle(),
        if auto_dismiss { " (auto-dismiss)" } else { "" }
    );

    let mut liveness = tokio::time::interval(LIVENESS_CHECK);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
            _ = liveness.tick() => {
                if !session.manager().is_running() {
                    info!("{} window closed", browser.display_name());
                    break;
                }
            }
        }
    }

    session.shutdown();
    Ok(())
}

/// No accessibility provider is available here, so dialog controls are
/// enumerated natively. Returns the warning to log when that changes the setup.
fn fall_back_to_native_enumeration(config: &mut Config) -> Option<String> {
    if config.watcher.child_enumeration() != EnumerationMethod::AssistiveTechnologyApi {
        return None;
    }
    config.watcher.enumeration = Some(EnumerationMethod::WindowManagementApi);
    let message = match config.watcher.browser {
        BrowserKind::Firefox => "No accessibility provider available; Firefox dialogs are recognized \
             by accessible role and will not be detected with native enumeration"
            .to_string(),
        other => format!(
            "No accessibility provider available; enumerating {} dialog controls natively",
            other.display_name()
        ),
    };
    Some(message)
}

fn install_handlers(watcher: &DialogWatcher, auto_dismiss: bool) {
    install::<AlertDialog>(watcher, auto_dismiss);
    install::<ConfirmDialog>(watcher, auto_dismiss);
    install::<LogonDialog>(watcher, auto_dismiss);
    install::<RestoreSessionDialog>(watcher, auto_dismiss);
    install::<VbScriptOkOnlyDialog>(watcher, auto_dismiss);
    install::<VbScriptYesNoDialog>(watcher, auto_dismiss);
    install::<VbScriptYesNoCancelDialog>(watcher, auto_dismiss);
    install::<VbScriptRetryCancelDialog>(watcher, auto_dismiss);
    install::<VbScriptAbortRetryIgnoreDialog>(watcher, auto_dismiss);
}

/// Log every `D`; with `auto_dismiss`, also close it.
fn install<D: Dialog>(watcher: &DialogWatcher, auto_dismiss: bool) {
    watcher.set_handler::<D>(Arc::new(move |dialog: &D| -> Result<(), DialogError> {
        let title = dialog.native_dialog().title().unwrap_or_default();
        info!(kind = %D::KIND, handle = %dialog.handle(), "Dialog \"{}\" appeared", title);
        if auto_dismiss {
            dialog.do_default_action()?;
        }
        Ok(())
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firefox_falls_back_with_warning() {
        let mut config = Config::default();
        config.watcher.browser = BrowserKind::Firefox;

        let message = fall_back_to_native_enumeration(&mut config).unwrap();
        assert!(message.contains("Firefox dialogs"));
        assert_eq!(config.watcher.child_enumeration(), EnumerationMethod::WindowManagementApi);
    }

    #[test]
    fn test_native_enumeration_left_alone() {
        let mut config = Config::default();
        config.watcher.browser = BrowserKind::InternetExplorer;

        assert!(fall_back_to_native_enumeration(&mut config).is_none());
        assert_eq!(config.watcher.enumeration, None);
    }
}
