//! Watcher: routes found dialogs to per-type handlers and expectations.

mod dialog_watcher;
mod expectation;
mod handler;
mod watchable;

pub use dialog_watcher::{DialogWatcher, Dispatch, WatcherOptions};
pub use expectation::{DEFAULT_EXPECTATION_TIMEOUT, Expectation, Predicate};
pub use handler::{HandlerAction, WatchableObjectHandler};
pub use watchable::{Watchable, WatchedObject};

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
