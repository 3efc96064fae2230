//! Poller loop run on the manager's thread.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::thread;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, error, info, trace, warn};

use dialogwatch_protocols::{DialogKind, WindowHandle};

use super::{DialogFoundListener, ManagerOptions, ManagerState};
use crate::dialog::{DialogClassifier, NativeDialog};
use crate::panic;
use crate::window::{AccessibilitySession, Window, WindowSystem};

pub(super) struct Poller {
    pub(super) system: Arc<WindowSystem>,
    pub(super) main_window: Box<dyn Window>,
    pub(super) classifiers: Vec<Arc<dyn DialogClassifier>>,
    pub(super) listeners: Vec<Arc<dyn DialogFoundListener>>,
    pub(super) options: ManagerOptions,
    pub(super) state: Arc<AtomicU8>,
    pub(super) handled: Arc<Mutex<HashSet<WindowHandle>>>,
    pub(super) scans: Arc<AtomicU64>,
    /// Held for the poller's lifetime; disconnects when the thread exits.
    pub(super) _accessibility: Option<AccessibilitySession>,
}

impl Poller {
    fn is_running(&self) -> bool {
        ManagerState::from(self.state.load(Ordering::SeqCst)) == ManagerState::Running
    }

    pub(super) fn run(mut self) {
        debug!(
            main = %self.main_window.handle(),
            classifiers = self.classifiers.len(),
            "Dialog poller running"
        );
        while self.is_running() {
            if !self.main_window.exists() {
                info!("Monitored window {} is gone, stopping", self.main_window.handle());
                break;
            }
            self.scan();
            self.scans.fetch_add(1, Ordering::SeqCst);
            self.sleep();
        }
        self.state.store(ManagerState::Stopped as u8, Ordering::SeqCst);
        self.main_window.dispose();
        debug!("Dialog poller stopped");
    }

    /// Sleep one poll interval in slices, returning early on shutdown.
    fn sleep(&self) {
        let deadline = Instant::now() + self.options.poll_interval;
        while self.is_running() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep(self.options.shutdown_check.min(deadline - now));
        }
    }

    fn scan(&self) {
        self.prune_closed();
        let main = self.main_window.as_ref();
        let candidates = match self
            .system
            .top_level_windows(self.options.child_method, &|w| w.is_dialog_window_for(main))
        {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("Failed to enumerate top-level windows: {}", e);
                return;
            }
        };

        for candidate in candidates {
            if !self.is_running() {
                return;
            }
            let handle = candidate.handle();
            if self.handled.lock().contains(&handle) {
                continue;
            }
            match self.classify(candidate.as_ref()) {
                Some((classifier, kind)) => self.raise(classifier, kind, candidate),
                None => trace!("Window {} is not a known dialog", handle),
            }
        }
    }

    /// First classifier accepting `candidate`, in registration order.
    fn classify(&self, candidate: &dyn Window) -> Option<(Arc<dyn DialogClassifier>, DialogKind)> {
        self.classifiers.iter().find_map(|classifier| {
            classifier
                .classify(candidate)
                .map(|kind| (Arc::clone(classifier), kind))
        })
    }

    /// Forget dialogs whose windows closed without the dismissed signal.
    fn prune_closed(&self) {
        let wm = self.system.window_manager();
        self.handled.lock().retain(|handle| {
            let alive = wm.is_window(*handle);
            if !alive {
                debug!("Dialog {} closed outside the manager", handle);
            }
            alive
        });
    }

    fn raise(&self, classifier: Arc<dyn DialogClassifier>, kind: DialogKind, window: Box<dyn Window>) {
        let handle = window.handle();
        info!("Found {} dialog {} ({})", kind, handle, classifier.name());
        let dialog = Arc::new(NativeDialog::new(
            kind,
            classifier,
            window,
            self.options.dismiss_timeout,
        ));

        self.handled.lock().insert(handle);
        let handled = Arc::clone(&self.handled);
        dialog.on_dismissed(Box::new(move |dialog: &NativeDialog| {
            handled.lock().remove(&dialog.handle());
            info!("Successfully handled {} dialog {}", dialog.kind(), dialog.handle());
        }));

        for listener in &self.listeners {
            match panic::catch(|| listener.on_dialog_found(Arc::clone(&dialog))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Dialog listener failed for {} dialog {}: {}", kind, handle, e),
                Err(message) => {
                    warn!("Dialog listener panicked for {} dialog {}: {}", kind, handle, message)
                }
            }
        }
    }
}
