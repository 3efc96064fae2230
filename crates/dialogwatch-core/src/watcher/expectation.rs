//! One-shot expectations that a dialog will appear.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::{Watchable, WatchedObject};
use crate::panic;
use crate::retry::{DEFAULT_MAX_SLEEP, TryUntilTimeout};

/// Timeout used when an expectation is created with a zero timeout.
pub const DEFAULT_EXPECTATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Extra condition the expected object must meet.
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

struct ExpectationState<T> {
    object: Option<Arc<T>>,
    timed_out: bool,
}

/// A pending wait for the next object of type `T`.
///
/// The poller fulfills the expectation; any number of caller threads may
/// wait on it. Waiting polls with back-off until the object is set and the
/// predicate holds, or the timeout elapses. A timeout is reported through
/// [`Expectation::timeout_reached`], never as an error.
pub struct Expectation<T: Watchable> {
    timeout: Duration,
    max_sleep: Duration,
    predicate: Predicate<T>,
    state: Mutex<ExpectationState<T>>,
}

impl<T: Watchable> Expectation<T> {
    /// A zero `timeout` means [`DEFAULT_EXPECTATION_TIMEOUT`].
    /// Without a predicate the object only has to still exist.
    pub fn new(timeout: Duration, predicate: Option<Predicate<T>>) -> Self {
        let timeout = if timeout.is_zero() {
            DEFAULT_EXPECTATION_TIMEOUT
        } else {
            timeout
        };
        let predicate: Predicate<T> = match predicate {
            Some(predicate) => predicate,
            None => Arc::new(|object: &T| object.exists()),
        };
        Self {
            timeout,
            max_sleep: DEFAULT_MAX_SLEEP,
            predicate,
            state: Mutex::new(ExpectationState {
                object: None,
                timed_out: false,
            }),
        }
    }

    /// Cap the back-off between two checks while waiting.
    pub fn with_max_sleep(mut self, max_sleep: Duration) -> Self {
        self.max_sleep = max_sleep;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Wait for the expected object and return it.
    ///
    /// On timeout this returns whatever was observed last, possibly `None`.
    pub fn object(&self) -> Option<Arc<T>> {
        self.wait_until_satisfied();
        self.state.lock().object.clone()
    }

    /// Block until satisfied or timed out. Returns whether it was satisfied.
    pub fn wait_until_satisfied(&self) -> bool {
        let mut executor = TryUntilTimeout::new(self.timeout).with_max_sleep(self.max_sleep);
        let satisfied = executor
            .try_until(|| Ok(self.is_satisfied()))
            .unwrap_or_default();
        let timed_out = executor.did_time_out();
        self.state.lock().timed_out = timed_out;
        if timed_out {
            debug!(
                timeout_ms = self.timeout.as_millis() as u64,
                "Expectation for {} timed out",
                type_name::<T>()
            );
        }
        satisfied
    }

    /// Whether an object was delivered and currently meets the predicate.
    pub fn is_satisfied(&self) -> bool {
        let Some(object) = self.state.lock().object.clone() else {
            return false;
        };
        match panic::catch(|| (self.predicate)(&object)) {
            Ok(matched) => matched,
            Err(message) => {
                warn!("Predicate for {} panicked: {}", type_name::<T>(), message);
                false
            }
        }
    }

    /// Whether the last wait ended because the timeout elapsed.
    pub fn timeout_reached(&self) -> bool {
        self.state.lock().timed_out
    }

    pub fn has_object(&self) -> bool {
        self.state.lock().object.is_some()
    }

    /// Forget the delivered object and the timeout flag.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.object = None;
        state.timed_out = false;
    }

    /// Dispose the delivered object, if any. Idempotent.
    pub fn dispose(&self) {
        let object = self.state.lock().object.take();
        if let Some(object) = object {
            object.dispose();
        }
    }

    pub(crate) fn set_object(&self, object: Arc<T>) {
        self.state.lock().object = Some(object);
    }
}

impl<T: Watchable> fmt::Debug for Expectation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation")
            .field("type", &type_name::<T>())
            .field("timeout", &self.timeout)
            .field("has_object", &self.has_object())
            .field("timeout_reached", &self.timeout_reached())
            .finish()
    }
}

/// Type-erased view used by the watcher's tables.
pub(crate) trait ErasedExpectation: Send + Sync {
    /// Deliver `object`. False when it is not a `T`.
    fn fulfill(&self, object: &WatchedObject) -> bool;
    fn timeout_reached(&self) -> bool;
}

impl<T: Watchable> ErasedExpectation for Expectation<T> {
    fn fulfill(&self, object: &WatchedObject) -> bool {
        match object.downcast::<T>() {
            Some(typed) => {
                self.set_object(typed);
                true
            }
            None => false,
        }
    }

    fn timeout_reached(&self) -> bool {
        Expectation::timeout_reached(self)
    }
}
