//! # dialogwatch Core
//!
//! Detects and drives the modal dialogs a browser raises: JavaScript
//! `alert()` / `confirm()`, VBScript `MsgBox`, HTTP authentication prompts
//! and Firefox's session-restore prompt.
//!
//! ## Pipeline
//!
//! - [`window`] - Uniform window abstraction over the native window manager
//!   and the accessibility tree
//! - [`classifier`] - Per-browser recognizers that map a window to a [`DialogKind`]
//! - [`manager`] - Background poller raising each classified dialog once
//! - [`factory`] / [`dialogs`] - Typed wrappers keyed by dialog kind
//! - [`watcher`] - Per-type handlers and expectations
//! - [`session`] - Wires the above to a running browser window
//!
//! [`DialogKind`]: dialogwatch_protocols::DialogKind

pub mod classifier;
pub mod dialog;
pub mod dialogs;
pub mod factory;
pub mod keys;
pub mod manager;
pub mod retry;
pub mod session;
pub mod watcher;
pub mod window;

mod panic;

pub use dialog::{ActionEffect, DialogClassifier, NativeDialog};
pub use dialogs::{
    AlertDialog, ConfirmDialog, Dialog, LogonDialog, MessageDialog, RestoreSessionDialog,
    VbScriptAbortRetryIgnoreDialog, VbScriptMsgBox, VbScriptOkOnlyDialog,
    VbScriptRetryCancelDialog, VbScriptYesNoCancelDialog, VbScriptYesNoDialog,
};
pub use factory::DialogFactory;
pub use manager::{DialogFoundListener, DialogManager, ManagerOptions, ManagerState};
pub use retry::TryUntilTimeout;
pub use session::{WatchSession, create_dialog_watcher};
pub use watcher::{
    DialogWatcher, Dispatch, Expectation, HandlerAction, Predicate, Watchable,
    WatchableObjectHandler, WatcherOptions,
};
pub use window::{Window, WindowSystem};
