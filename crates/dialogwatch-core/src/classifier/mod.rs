//! Dialog classifiers for the supported browsers.
//!
//! Each browser has an ordered list of classifiers. The poller tries them in
//! order and the first match wins, so more specific shapes come first.

use std::sync::Arc;

use dialogwatch_protocols::{BrowserKind, DialogAction, DialogError, DialogKind, Platform};

use crate::dialog::{ActionEffect, DialogClassifier};
use crate::window::Window;

mod firefox;
mod ie;

pub use firefox::{FirefoxJavaScriptClassifier, FirefoxLogonClassifier, FirefoxRestoreSessionClassifier};
pub use ie::{IeJavaScriptClassifier, IeLogonClassifier, IeVbScriptClassifier};

/// Classifiers for `browser`, in the order they are tried.
pub fn classifiers_for(browser: BrowserKind, platform: Platform) -> Vec<Arc<dyn DialogClassifier>> {
    match browser {
        BrowserKind::InternetExplorer => vec![
            Arc::new(IeJavaScriptClassifier),
            Arc::new(IeVbScriptClassifier),
            Arc::new(IeLogonClassifier),
        ],
        BrowserKind::Firefox => vec![
            Arc::new(FirefoxJavaScriptClassifier::new(platform)),
            Arc::new(FirefoxLogonClassifier::new(platform)),
            Arc::new(FirefoxRestoreSessionClassifier::new(platform)),
        ],
    }
}

/// Children of `window` whose class is `class`, in enumeration order.
fn children_of_class(window: &dyn Window, class: &str) -> Vec<Box<dyn Window>> {
    window.child_windows(&|w| w.class_name() == class)
}

fn item_ids(windows: &[Box<dyn Window>]) -> Vec<i32> {
    windows.iter().map(|w| w.item_id()).collect()
}

/// Text of the first child of class `class` with item id `item_id`.
fn control_text(window: &dyn Window, class: &str, item_id: Option<i32>) -> Result<String, DialogError> {
    let controls = window.child_windows(&|w| {
        w.class_name() == class && item_id.is_none_or(|id| w.item_id() == id)
    });
    controls
        .first()
        .map(|control| control.text())
        .ok_or_else(|| missing_control(class, item_id))
}

/// Press the push button with item id `item_id`.
///
/// Returns [`ActionEffect::Closes`] so the caller waits for the dialog to go away.
fn press_button(window: &dyn Window, class: &str, item_id: i32) -> Result<ActionEffect, DialogError> {
    let buttons = window.child_windows(&|w| w.class_name() == class && w.item_id() == item_id);
    let button = buttons
        .first()
        .ok_or_else(|| missing_control(class, Some(item_id)))?;
    button.press()?;
    Ok(ActionEffect::Closes)
}

fn missing_control(class: &str, item_id: Option<i32>) -> DialogError {
    match item_id {
        Some(id) => DialogError::ControlNotFound(format!("{} with item id {}", class, id)),
        None => DialogError::ControlNotFound(class.to_string()),
    }
}

/// The text argument of a `Set*` action.
fn text_argument<'a>(kind: DialogKind, action: DialogAction, args: &'a [String]) -> Result<&'a str, DialogError> {
    args.first().map(String::as_str).ok_or_else(|| {
        DialogError::InvalidArgument(format!("Action {} on {} requires a text argument", action, kind))
    })
}
