//! Per-type callbacks run for every matching dialog.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::{debug, warn};

use dialogwatch_protocols::DialogError;

use super::{Watchable, WatchedObject};
use crate::panic;

/// User callback for objects of type `T`.
pub type HandlerAction<T> = Arc<dyn Fn(&T) -> Result<(), DialogError> + Send + Sync>;

/// Runs a [`HandlerAction`] for each matching object.
///
/// Failures and panics in the action are logged and never escape. Unless
/// auto-dispose is turned off, the object is disposed after the action ran.
pub struct WatchableObjectHandler<T: Watchable> {
    action: HandlerAction<T>,
    enabled: AtomicBool,
    handle_once: AtomicBool,
    auto_dispose: AtomicBool,
    handle_count: AtomicU64,
}

impl<T: Watchable> WatchableObjectHandler<T> {
    pub fn new(action: HandlerAction<T>) -> Self {
        Self {
            action,
            enabled: AtomicBool::new(true),
            handle_once: AtomicBool::new(false),
            auto_dispose: AtomicBool::new(true),
            handle_count: AtomicU64::new(0),
        }
    }

    pub fn action(&self) -> &HandlerAction<T> {
        &self.action
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Whether the handler is removed after its first invocation.
    pub fn handle_once(&self) -> bool {
        self.handle_once.load(Ordering::SeqCst)
    }

    pub fn set_handle_once(&self, once: bool) {
        self.handle_once.store(once, Ordering::SeqCst);
    }

    pub fn auto_dispose(&self) -> bool {
        self.auto_dispose.load(Ordering::SeqCst)
    }

    pub fn set_auto_dispose(&self, auto_dispose: bool) {
        self.auto_dispose.store(auto_dispose, Ordering::SeqCst);
    }

    /// Successful invocations since creation or the last reset.
    pub fn handle_count(&self) -> u64 {
        self.handle_count.load(Ordering::SeqCst)
    }

    /// Re-enable and zero the counter.
    pub fn reset(&self) {
        self.enabled.store(true, Ordering::SeqCst);
        self.handle_count.store(0, Ordering::SeqCst);
    }

    pub fn handle_object(&self, object: &T) {
        match panic::catch(|| (self.action)(object)) {
            Ok(Ok(())) => {
                let count = self.handle_count.fetch_add(1, Ordering::SeqCst) + 1;
                debug!(count, "Handled {}", type_name::<T>());
            }
            Ok(Err(e)) => warn!("Unexpected error handling {}: {}", type_name::<T>(), e),
            Err(message) => warn!("Handler for {} panicked: {}", type_name::<T>(), message),
        }
        if self.auto_dispose() {
            object.dispose();
        }
    }
}

impl<T: Watchable> fmt::Debug for WatchableObjectHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchableObjectHandler")
            .field("type", &type_name::<T>())
            .field("enabled", &self.is_enabled())
            .field("handle_once", &self.handle_once())
            .field("auto_dispose", &self.auto_dispose())
            .field("handle_count", &self.handle_count())
            .finish()
    }
}

/// Type-erased view used by the watcher's tables.
pub(crate) trait ErasedHandler: Send + Sync {
    fn handle(&self, object: &WatchedObject);
    fn is_enabled(&self) -> bool;
    fn set_enabled(&self, enabled: bool);
    fn handle_once(&self) -> bool;
    fn reset(&self);
}

impl<T: Watchable> ErasedHandler for WatchableObjectHandler<T> {
    fn handle(&self, object: &WatchedObject) {
        match object.downcast::<T>() {
            Some(typed) => self.handle_object(&typed),
            None => warn!(
                "Handler for {} received a {}",
                type_name::<T>(),
                object.type_name()
            ),
        }
    }

    fn is_enabled(&self) -> bool {
        WatchableObjectHandler::is_enabled(self)
    }

    fn set_enabled(&self, enabled: bool) {
        WatchableObjectHandler::set_enabled(self, enabled);
    }

    fn handle_once(&self) -> bool {
        WatchableObjectHandler::handle_once(self)
    }

    fn reset(&self) {
        WatchableObjectHandler::reset(self);
    }
}
