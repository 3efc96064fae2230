//! Dialog manager: the background poller.
//!
//! The manager owns one poller thread for its lifetime. Each scan enumerates
//! the top-level windows, keeps the visible dialogs owned by the monitored
//! browser window, runs new ones through the browser's classifiers and
//! raises a found-event for every match, exactly once per physical window.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use dialogwatch_config::Config;
use dialogwatch_protocols::{DialogError, EnumerationMethod, WindowHandle};

use crate::dialog::{DEFAULT_DISMISS_TIMEOUT, DialogClassifier, NativeDialog};
use crate::window::{Window, WindowSystem};

mod poller;

use poller::Poller;

/// Shortest sleep slice the poller accepts.
const MIN_SHUTDOWN_CHECK: Duration = Duration::from_millis(1);

/// Manager state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ManagerState {
    /// Poller thread is scanning.
    Running = 0,
    /// Terminal: shutdown was requested or the monitored window went away.
    Stopped = 1,
}

impl From<u8> for ManagerState {
    fn from(v: u8) -> Self {
        match v {
            0 => ManagerState::Running,
            _ => ManagerState::Stopped,
        }
    }
}

/// Receives every newly classified dialog on the poller thread.
pub trait DialogFoundListener: Send + Sync {
    fn on_dialog_found(&self, dialog: Arc<NativeDialog>) -> Result<(), DialogError>;
}

impl<F> DialogFoundListener for F
where
    F: Fn(Arc<NativeDialog>) -> Result<(), DialogError> + Send + Sync,
{
    fn on_dialog_found(&self, dialog: Arc<NativeDialog>) -> Result<(), DialogError> {
        self(dialog)
    }
}

/// Poller timing and enumeration settings.
#[derive(Debug, Clone)]
pub struct ManagerOptions {
    /// Total sleep between two scans.
    pub poll_interval: Duration,
    /// Length of one sleep slice; shutdown is noticed within one slice.
    pub shutdown_check: Duration,
    /// Bound for "wait for window to disappear" after an action.
    pub dismiss_timeout: Duration,
    /// How candidate dialogs enumerate their children.
    pub child_method: EnumerationMethod,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            shutdown_check: Duration::from_millis(200),
            dismiss_timeout: DEFAULT_DISMISS_TIMEOUT,
            child_method: EnumerationMethod::WindowManagementApi,
        }
    }
}

impl ManagerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            poll_interval: config.watcher.poll_interval(),
            shutdown_check: config.watcher.shutdown_check(),
            dismiss_timeout: config.dialogs.dismiss_timeout(),
            child_method: config.watcher.child_enumeration(),
        }
    }
}

/// Builder for a [`DialogManager`]; listeners must be attached before start.
pub struct DialogManagerBuilder {
    system: Arc<WindowSystem>,
    main_window: Box<dyn Window>,
    classifiers: Vec<Arc<dyn DialogClassifier>>,
    listeners: Vec<Arc<dyn DialogFoundListener>>,
    options: ManagerOptions,
}

impl DialogManagerBuilder {
    /// A zero `shutdown_check` is raised to 1ms.
    pub fn options(mut self, options: ManagerOptions) -> Self {
        self.options = ManagerOptions {
            shutdown_check: options.shutdown_check.max(MIN_SHUTDOWN_CHECK),
            ..options
        };
        self
    }

    pub fn listener(mut self, listener: Arc<dyn DialogFoundListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Open the accessibility connection and start the poller thread.
    pub fn start(self) -> Result<DialogManager, DialogError> {
        let accessibility = self.system.connect_accessibility()?;
        let main_handle = self.main_window.handle();
        let state = Arc::new(AtomicU8::new(ManagerState::Running as u8));
        let handled = Arc::new(Mutex::new(HashSet::new()));
        let scans = Arc::new(AtomicU64::new(0));

        let poller = Poller {
            system: self.system,
            main_window: self.main_window,
            classifiers: self.classifiers,
            listeners: self.listeners,
            options: self.options,
            state: Arc::clone(&state),
            handled: Arc::clone(&handled),
            scans: Arc::clone(&scans),
            _accessibility: accessibility,
        };
        let worker = thread::Builder::new()
            .name("dialog-poller".to_string())
            .spawn(move || poller.run())?;

        info!("Dialog manager started for window {}", main_handle);
        Ok(DialogManager {
            main_handle,
            state,
            handled,
            scans,
            worker_id: worker.thread().id(),
            worker: Mutex::new(Some(worker)),
        })
    }
}

/// Running dialog poller. Dropping the manager shuts it down.
pub struct DialogManager {
    main_handle: WindowHandle,
    state: Arc<AtomicU8>,
    handled: Arc<Mutex<HashSet<WindowHandle>>>,
    scans: Arc<AtomicU64>,
    worker_id: ThreadId,
    /// Held across `join` so concurrent callers wait for the same exit.
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl DialogManager {
    /// Monitor dialogs owned by `main_window`, trying `classifiers` in order.
    pub fn builder(
        system: Arc<WindowSystem>,
        main_window: Box<dyn Window>,
        classifiers: Vec<Arc<dyn DialogClassifier>>,
    ) -> DialogManagerBuilder {
        DialogManagerBuilder {
            system,
            main_window,
            classifiers,
            listeners: Vec::new(),
            options: ManagerOptions::default(),
        }
    }

    pub fn state(&self) -> ManagerState {
        ManagerState::from(self.state.load(Ordering::SeqCst))
    }

    pub fn is_running(&self) -> bool {
        self.state() == ManagerState::Running
    }

    /// Handle of the monitored browser window.
    pub fn main_window_handle(&self) -> WindowHandle {
        self.main_handle
    }

    /// Dialogs raised and not yet confirmed gone.
    pub fn handled_windows(&self) -> Vec<WindowHandle> {
        let mut handles: Vec<WindowHandle> = self.handled.lock().iter().copied().collect();
        handles.sort();
        handles
    }

    /// Completed scans since start.
    pub fn scan_count(&self) -> u64 {
        self.scans.load(Ordering::SeqCst)
    }

    /// Stop the poller and wait for its thread to exit.
    ///
    /// No found-event fires after this returns, whichever caller gets here
    /// first. Idempotent. Called from a listener on the poller thread, it
    /// only requests the stop.
    pub fn shutdown(&self) {
        self.state.store(ManagerState::Stopped as u8, Ordering::SeqCst);
        if thread::current().id() == self.worker_id {
            debug!("Shutdown requested from the poller thread");
            return;
        }
        let mut worker = self.worker.lock();
        let Some(handle) = worker.take() else {
            return;
        };
        if handle.join().is_err() {
            warn!("Dialog poller thread panicked");
        }
        info!("Dialog manager for window {} shut down", self.main_handle);
    }
}

impl Drop for DialogManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for DialogManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogManager")
            .field("main_window", &self.main_handle)
            .field("state", &self.state())
            .field("scans", &self.scan_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
