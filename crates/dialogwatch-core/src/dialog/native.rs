//! One classified physical dialog window.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use dialogwatch_protocols::{DialogAction, DialogError, DialogKind, DialogProperty, WindowHandle};

use super::{ActionEffect, DialogClassifier};
use crate::retry::TryUntilTimeout;
use crate::window::Window;

/// How long an answered dialog may take to disappear.
pub const DEFAULT_DISMISS_TIMEOUT: Duration = Duration::from_secs(10);

/// Callback fired once the dialog window is confirmed gone.
pub type DismissListener = Box<dyn Fn(&NativeDialog) + Send + Sync>;

/// A classified dialog window.
///
/// Generic property reads and actions are routed to the classifier that
/// recognized the window. The dismissed signal fires at most once.
pub struct NativeDialog {
    kind: DialogKind,
    classifier: Arc<dyn DialogClassifier>,
    handle: WindowHandle,
    window: Mutex<Option<Box<dyn Window>>>,
    dismissed: AtomicBool,
    listeners: Mutex<Vec<DismissListener>>,
    dismiss_timeout: Duration,
}

impl NativeDialog {
    pub fn new(
        kind: DialogKind,
        classifier: Arc<dyn DialogClassifier>,
        window: Box<dyn Window>,
        dismiss_timeout: Duration,
    ) -> Self {
        Self {
            kind,
            classifier,
            handle: window.handle(),
            window: Mutex::new(Some(window)),
            dismissed: AtomicBool::new(false),
            listeners: Mutex::new(Vec::new()),
            dismiss_timeout,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    /// Whether the dialog window is still on screen. False once disposed.
    pub fn exists(&self) -> bool {
        self.window.lock().as_ref().is_some_and(|w| w.exists())
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed.load(Ordering::SeqCst)
    }

    fn with_window<R>(
        &self,
        f: impl FnOnce(&dyn Window) -> Result<R, DialogError>,
    ) -> Result<R, DialogError> {
        let guard = self.window.lock();
        match guard.as_deref() {
            Some(window) => f(window),
            None => Err(DialogError::Disposed),
        }
    }

    /// Title bar text.
    pub fn title(&self) -> Result<String, DialogError> {
        self.with_window(|w| Ok(w.text()))
    }

    /// Read a property by identifier, e.g. `"MessageProperty"`.
    pub fn get_property(&self, property: &str) -> Result<String, DialogError> {
        self.property(property.parse()?)
    }

    pub fn property(&self, property: DialogProperty) -> Result<String, DialogError> {
        self.with_window(|w| self.classifier.get_property(self.kind, w, property))
    }

    /// Perform an action by identifier, e.g. `"ClickOk"`.
    ///
    /// Actions that answer the dialog wait for its window to disappear.
    pub fn perform_action(&self, action: &str, args: &[String]) -> Result<(), DialogError> {
        self.perform(action.parse()?, args)
    }

    pub fn perform(&self, action: DialogAction, args: &[String]) -> Result<(), DialogError> {
        debug!("Performing {} on {} dialog {}", action, self.kind, self.handle);
        let effect =
            self.with_window(|w| self.classifier.perform_action(self.kind, w, action, args))?;
        if effect == ActionEffect::Closes {
            self.wait_for_window_to_disappear()?;
        }
        Ok(())
    }

    /// Force the window closed and wait for it to go away.
    pub fn dismiss(&self) -> Result<(), DialogError> {
        info!("Dismissing {} dialog {}", self.kind, self.handle);
        self.with_window(|w| w.force_close().map_err(DialogError::from))?;
        self.wait_for_window_to_disappear()
    }

    /// Wait until the window no longer exists, then fire the dismissed signal.
    pub fn wait_for_window_to_disappear(&self) -> Result<(), DialogError> {
        let kind = self.kind;
        let handle = self.handle;
        let mut executor = TryUntilTimeout::new(self.dismiss_timeout)
            .with_message(move || format!("waiting for {} dialog {} to close", kind, handle));
        executor.try_until(|| Ok(!self.exists()))?;
        self.fire_dismissed();
        Ok(())
    }

    /// Subscribe to the dismissed signal. Runs immediately if already dismissed.
    pub fn on_dismissed(&self, listener: DismissListener) {
        let mut listeners = self.listeners.lock();
        if !self.is_dismissed() {
            listeners.push(listener);
            return;
        }
        drop(listeners);
        listener(self);
    }

    fn fire_dismissed(&self) {
        let listeners = {
            let mut guard = self.listeners.lock();
            if self.dismissed.swap(true, Ordering::SeqCst) {
                return;
            }
            std::mem::take(&mut *guard)
        };
        for listener in listeners {
            listener(self);
        }
    }

    /// Release the window. Idempotent.
    pub fn dispose(&self) {
        if let Some(mut window) = self.window.lock().take() {
            window.dispose();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.window.lock().is_none()
    }
}

impl fmt::Debug for NativeDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeDialog")
            .field("kind", &self.kind)
            .field("classifier", &self.classifier.name())
            .field("handle", &self.handle)
            .field("dismissed", &self.is_dismissed())
            .finish()
    }
}
