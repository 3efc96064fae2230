//! # dialogwatch Protocols
//!
//! Interface definitions shared by every dialogwatch crate.
//! Contains only vocabulary and capability traits - no implementations.
//!
//! ## Capabilities
//!
//! - [`WindowManager`] - Native window manager (enumeration, text, class, input delivery)
//! - [`AccessibilityApi`] - Accessibility tree (roles, states, children, actions)
//!
//! ## Vocabulary
//!
//! - [`DialogKind`] - Stable identifiers for recognized dialog shapes
//! - [`DialogProperty`] / [`DialogAction`] - Property and action identifiers
//! - [`AccessibleRole`] / [`AccessibleState`] - Accessibility roles and states

pub mod capability;
pub mod dialog;
pub mod error;
pub mod role;
pub mod window;

pub use capability::{AccessibilityApi, AccessibleRef, KeyStroke, WindowManager};
pub use dialog::{BrowserKind, DialogAction, DialogKind, DialogProperty, Platform};
pub use error::{DialogError, WindowError};
pub use role::{AccessibleRole, AccessibleState};
pub use window::{EnumerationMethod, Rect, WindowHandle};
