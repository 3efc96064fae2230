//! Watching a running browser: manager plus watcher in one handle.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use dialogwatch_config::Config;
use dialogwatch_protocols::{BrowserKind, DialogError, WindowHandle};

use crate::classifier::classifiers_for;
use crate::factory::DialogFactory;
use crate::manager::{DialogFoundListener, DialogManager, ManagerOptions};
use crate::watcher::{DialogWatcher, WatcherOptions};
use crate::window::WindowSystem;

/// A started dialog manager and the watcher attached to it.
///
/// Dropping the session stops the poller.
pub struct WatchSession {
    browser: BrowserKind,
    watcher: Arc<DialogWatcher>,
    manager: DialogManager,
}

impl WatchSession {
    pub fn browser(&self) -> BrowserKind {
        self.browser
    }

    pub fn watcher(&self) -> &Arc<DialogWatcher> {
        &self.watcher
    }

    pub fn manager(&self) -> &DialogManager {
        &self.manager
    }

    pub fn main_window_handle(&self) -> WindowHandle {
        self.manager.main_window_handle()
    }

    /// Stop the poller and wait for it to exit.
    pub fn shutdown(&self) {
        self.manager.shutdown();
    }
}

impl fmt::Debug for WatchSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchSession")
            .field("browser", &self.browser)
            .field("manager", &self.manager)
            .field("watcher", &self.watcher)
            .finish()
    }
}

/// Attach a watcher to the first running window of `browser`.
///
/// Fails with [`DialogError::NoBrowserWindow`] when none is open.
pub fn create_dialog_watcher(
    system: Arc<WindowSystem>,
    browser: BrowserKind,
    config: &Config,
) -> Result<WatchSession, DialogError> {
    create_dialog_watcher_with_factory(system, browser, config, Arc::new(DialogFactory::builtin()?))
}

/// Like [`create_dialog_watcher`], with a caller-supplied wrapper factory.
pub fn create_dialog_watcher_with_factory(
    system: Arc<WindowSystem>,
    browser: BrowserKind,
    config: &Config,
    factory: Arc<DialogFactory>,
) -> Result<WatchSession, DialogError> {
    let class_name = browser.main_window_class();
    let options = ManagerOptions::from_config(config);
    let main_window = system
        .find_top_level(class_name, options.child_method)?
        .ok_or_else(|| DialogError::NoBrowserWindow(class_name.to_string()))?;
    info!(
        "Watching {} window {} ({})",
        browser.display_name(),
        main_window.handle(),
        main_window.text()
    );

    let watcher = Arc::new(DialogWatcher::new(factory, WatcherOptions::from_config(config)));
    let classifiers = classifiers_for(browser, system.platform());
    let manager = DialogManager::builder(system, main_window, classifiers)
        .options(options)
        .listener(Arc::clone(&watcher) as Arc<dyn DialogFoundListener>)
        .start()?;

    Ok(WatchSession {
        browser,
        watcher,
        manager,
    })
}
