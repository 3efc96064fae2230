//! Arbitration between handlers and expectations.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use dialogwatch_config::Config;
use dialogwatch_protocols::DialogError;

use super::expectation::{DEFAULT_EXPECTATION_TIMEOUT, ErasedExpectation, Expectation, Predicate};
use super::handler::{ErasedHandler, HandlerAction, WatchableObjectHandler};
use super::{Watchable, WatchedObject};
use crate::dialog::NativeDialog;
use crate::factory::DialogFactory;
use crate::manager::DialogFoundListener;
use crate::retry::DEFAULT_MAX_SLEEP;

/// Expectation defaults.
#[derive(Debug, Clone)]
pub struct WatcherOptions {
    /// Used when an expectation is created without a timeout, or with zero.
    pub default_timeout: Duration,
    /// Back-off ceiling while waiting on an expectation.
    pub max_retry_sleep: Duration,
}

impl Default for WatcherOptions {
    fn default() -> Self {
        Self {
            default_timeout: DEFAULT_EXPECTATION_TIMEOUT,
            max_retry_sleep: DEFAULT_MAX_SLEEP,
        }
    }
}

impl WatcherOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_timeout: config.expectation.default_timeout(),
            max_retry_sleep: config.expectation.max_retry_sleep(),
        }
    }
}

/// Outcome of dispatching one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A pending expectation received the object.
    Fulfilled,
    /// An enabled handler ran.
    Handled,
    /// Nothing claimed the object; it is left to the caller.
    Unhandled,
}

struct HandlerSlot {
    type_name: &'static str,
    typed: Arc<dyn Any + Send + Sync>,
    erased: Arc<dyn ErasedHandler>,
}

impl HandlerSlot {
    fn new<T: Watchable>(handler: Arc<WatchableObjectHandler<T>>) -> Self {
        Self {
            type_name: short_type_name::<T>(),
            typed: Arc::clone(&handler) as Arc<dyn Any + Send + Sync>,
            erased: handler,
        }
    }
}

struct ExpectationSlot {
    typed: Arc<dyn Any + Send + Sync>,
    erased: Arc<dyn ErasedExpectation>,
}

impl ExpectationSlot {
    fn new<T: Watchable>(expectation: Arc<Expectation<T>>) -> Self {
        Self {
            typed: Arc::clone(&expectation) as Arc<dyn Any + Send + Sync>,
            erased: expectation,
        }
    }
}

#[derive(Default)]
struct Tables {
    handlers: HashMap<TypeId, HandlerSlot>,
    expectations: HashMap<TypeId, ExpectationSlot>,
}

/// Per-type handlers and expectations for dialogs raised by a manager.
///
/// Each watchable type has at most one handler and at most one pending
/// expectation. A pending expectation disables the type's handler until
/// [`DialogWatcher::reset_handler`] is called. Dispatch offers each new
/// object to the expectation first, then to an enabled handler.
pub struct DialogWatcher {
    factory: Arc<DialogFactory>,
    options: WatcherOptions,
    tables: Mutex<Tables>,
}

impl DialogWatcher {
    pub fn new(factory: Arc<DialogFactory>, options: WatcherOptions) -> Self {
        Self {
            factory,
            options,
            tables: Mutex::new(Tables::default()),
        }
    }

    pub fn factory(&self) -> &Arc<DialogFactory> {
        &self.factory
    }

    pub fn options(&self) -> &WatcherOptions {
        &self.options
    }

    /// Install `action` for `T`, replacing any existing handler.
    ///
    /// The new handler starts disabled while an expectation for `T` is pending.
    pub fn set_handler<T: Watchable>(&self, action: HandlerAction<T>) -> Arc<WatchableObjectHandler<T>> {
        let handler = Arc::new(WatchableObjectHandler::new(action));
        let mut tables = self.tables.lock();
        if tables.expectations.contains_key(&TypeId::of::<T>()) {
            handler.set_enabled(false);
        }
        let replaced = tables
            .handlers
            .insert(TypeId::of::<T>(), HandlerSlot::new(Arc::clone(&handler)))
            .is_some();
        info!(replaced, "Handler set for watchable type {}", short_type_name::<T>());
        handler
    }

    pub fn clear_handler<T: Watchable>(&self) {
        if self.tables.lock().handlers.remove(&TypeId::of::<T>()).is_some() {
            info!("Handler cleared for watchable type {}", short_type_name::<T>());
        }
    }

    /// Drop any pending expectation for `T` and re-enable its handler.
    pub fn reset_handler<T: Watchable>(&self) {
        let mut tables = self.tables.lock();
        if tables.expectations.remove(&TypeId::of::<T>()).is_some() {
            debug!("Pending expectation removed for watchable type {}", short_type_name::<T>());
        }
        if let Some(slot) = tables.handlers.get(&TypeId::of::<T>()) {
            slot.erased.reset();
            info!("Handler reset for watchable type {}", short_type_name::<T>());
        }
    }

    pub fn get_handler<T: Watchable>(&self) -> Option<Arc<WatchableObjectHandler<T>>> {
        let typed = Arc::clone(&self.tables.lock().handlers.get(&TypeId::of::<T>())?.typed);
        typed.downcast::<WatchableObjectHandler<T>>().ok()
    }

    /// Expect the next `T` within the default timeout.
    pub fn expect<T: Watchable>(&self) -> Arc<Expectation<T>> {
        self.expect_with(self.options.default_timeout, None)
    }

    /// Expect the next `T` within `timeout`. Zero means the default timeout.
    pub fn expect_within<T: Watchable>(&self, timeout: Duration) -> Arc<Expectation<T>> {
        self.expect_with(timeout, None)
    }

    /// Expect the next `T` that satisfies `predicate`.
    pub fn expect_matching<T: Watchable>(&self, predicate: Predicate<T>) -> Arc<Expectation<T>> {
        self.expect_with(self.options.default_timeout, Some(predicate))
    }

    /// Create an expectation for `T`, or return the one already pending.
    ///
    /// Creating one disables the handler for `T`.
    pub fn expect_with<T: Watchable>(
        &self,
        timeout: Duration,
        predicate: Option<Predicate<T>>,
    ) -> Arc<Expectation<T>> {
        let mut tables = self.tables.lock();
        if let Some(slot) = tables.expectations.get(&TypeId::of::<T>()) {
            if let Ok(existing) = Arc::clone(&slot.typed).downcast::<Expectation<T>>() {
                return existing;
            }
        }

        let timeout = if timeout.is_zero() {
            self.options.default_timeout
        } else {
            timeout
        };
        let expectation =
            Arc::new(Expectation::new(timeout, predicate).with_max_sleep(self.options.max_retry_sleep));
        tables
            .expectations
            .insert(TypeId::of::<T>(), ExpectationSlot::new(Arc::clone(&expectation)));
        if let Some(slot) = tables.handlers.get(&TypeId::of::<T>()) {
            slot.erased.set_enabled(false);
            info!(
                "Handler for watchable type {} disabled and expectation set",
                short_type_name::<T>()
            );
        }
        expectation
    }

    pub fn is_expecting<T: Watchable>(&self) -> bool {
        self.tables.lock().expectations.contains_key(&TypeId::of::<T>())
    }

    /// Installed handlers, enabled or not.
    pub fn total_handler_count(&self) -> usize {
        self.tables.lock().handlers.len()
    }

    /// Names of the types whose handler is currently enabled, sorted.
    pub fn actively_handled_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .tables
            .lock()
            .handlers
            .values()
            .filter(|slot| slot.erased.is_enabled())
            .map(|slot| slot.type_name)
            .collect();
        names.sort_unstable();
        names
    }

    /// Offer `object` to the expectation for its type, then to the handler.
    ///
    /// User code runs without the tables locked, so handlers may call back
    /// into the watcher.
    pub fn dispatch(&self, object: WatchedObject) -> Dispatch {
        let type_id = object.type_id();
        let handler = {
            let mut tables = self.tables.lock();
            let live_expectation = tables
                .expectations
                .get(&type_id)
                .is_some_and(|slot| !slot.erased.timeout_reached());
            if live_expectation {
                if let Some(slot) = tables.expectations.remove(&type_id) {
                    drop(tables);
                    info!("{} found meeting expectation", object.type_name());
                    slot.erased.fulfill(&object);
                    return Dispatch::Fulfilled;
                }
            }
            match tables.handlers.get(&type_id) {
                Some(slot) if slot.erased.is_enabled() => Arc::clone(&slot.erased),
                _ => {
                    debug!("No active handler or expectation for {}", object.type_name());
                    return Dispatch::Unhandled;
                }
            }
        };

        info!("Handling {} with handler", object.type_name());
        handler.handle(&object);

        if handler.handle_once() {
            let mut tables = self.tables.lock();
            let installed = tables
                .handlers
                .get(&type_id)
                .is_some_and(|slot| Arc::ptr_eq(&slot.erased, &handler));
            if installed {
                tables.handlers.remove(&type_id);
                debug!("One-shot handler for {} removed", object.type_name());
            }
        }
        Dispatch::Handled
    }
}

impl DialogFoundListener for DialogWatcher {
    fn on_dialog_found(&self, dialog: Arc<NativeDialog>) -> Result<(), DialogError> {
        let kind = dialog.kind();
        let object = self
            .factory
            .create_dialog(dialog)
            .ok_or(DialogError::UnhandleableKind(kind))?;
        self.dispatch(object);
        Ok(())
    }
}

impl fmt::Debug for DialogWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.lock();
        f.debug_struct("DialogWatcher")
            .field("handlers", &tables.handlers.len())
            .field("expectations", &tables.expectations.len())
            .field("options", &self.options)
            .finish()
    }
}

/// `AlertDialog` rather than `dialogwatch_core::dialogs::javascript::AlertDialog`.
/// Generic arguments are dropped: `Tagged<a::B>` is `Tagged`.
fn short_type_name<T>() -> &'static str {
    let name = type_name::<T>();
    let path = name.split('<').next().unwrap_or(name);
    path.rsplit("::").next().unwrap_or(path)
}
