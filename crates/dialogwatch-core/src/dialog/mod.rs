//! Native dialogs and the classifier contract.
//!
//! A [`DialogClassifier`] decides whether a candidate top-level window is a
//! dialog it understands and, in the same call, which [`DialogKind`] it is.
//! The resulting [`NativeDialog`] routes generic property reads and actions
//! back to the classifier that recognized it.

use dialogwatch_protocols::{DialogAction, DialogError, DialogKind, DialogProperty};

use crate::window::Window;

mod native;

pub use native::{DEFAULT_DISMISS_TIMEOUT, DismissListener, NativeDialog};

/// What an action did to the dialog window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    /// The window stays open (e.g. text was typed).
    None,
    /// The action answers the dialog; its window is expected to disappear.
    Closes,
}

/// Recognizes one family of dialogs and implements their vocabulary.
///
/// The property and action sets valid for a dialog depend on its resolved
/// kind, so both operations receive the kind that [`DialogClassifier::classify`]
/// returned.
pub trait DialogClassifier: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// `Some(kind)` when `candidate` is a dialog this classifier handles.
    ///
    /// Any window opened to inspect the candidate is released before returning.
    fn classify(&self, candidate: &dyn Window) -> Option<DialogKind>;

    fn get_property(
        &self,
        kind: DialogKind,
        window: &dyn Window,
        property: DialogProperty,
    ) -> Result<String, DialogError>;

    fn perform_action(
        &self,
        kind: DialogKind,
        window: &dyn Window,
        action: DialogAction,
        args: &[String],
    ) -> Result<ActionEffect, DialogError>;
}

/// Error for a property the kind does not expose.
pub fn unsupported_property(kind: DialogKind, property: DialogProperty) -> DialogError {
    DialogError::InvalidArgument(format!("Property {} is not valid for {}", property, kind))
}

/// Error for an action the kind does not support.
pub fn unsupported_action(kind: DialogKind, action: DialogAction) -> DialogError {
    DialogError::InvalidArgument(format!("Action {} is not valid for {}", action, kind))
}

#[cfg(test)]
#[path = "dialog_tests.rs"]
mod tests;
