//! Window abstraction.
//!
//! A [`Window`] is a transient, ownership-free view of a native window or an
//! accessibility node. State queries (`exists`, `visible`, `enabled`) are live
//! and never cached. Windows are released with [`Window::dispose`]; dropping a
//! window disposes it.

use std::fmt;

use dialogwatch_protocols::{AccessibleState, EnumerationMethod, WindowError, WindowHandle};

mod accessible;
mod native;
mod system;

pub use accessible::AccessibleWindow;
pub use native::NativeWindow;
pub use system::{AccessibilitySession, DEFAULT_KEYSTROKE_DELAY, WindowSystem, class_for_role};

/// Predicate applied to candidate child windows.
pub type WindowFilter<'a> = &'a dyn Fn(&dyn Window) -> bool;

/// Polymorphic handle to a native window.
pub trait Window: Send + Sync + fmt::Debug {
    fn handle(&self) -> WindowHandle;

    fn parent_handle(&self) -> WindowHandle;

    /// Owner (transient-for) window.
    fn owner_handle(&self) -> WindowHandle;

    fn class_name(&self) -> String;

    fn text(&self) -> String;

    fn exists(&self) -> bool;

    fn visible(&self) -> bool;

    fn enabled(&self) -> bool;

    fn is_top_level(&self) -> bool;

    fn process_id(&self) -> u32;

    /// Control identifier within the dialog.
    fn item_id(&self) -> i32;

    /// How this window was discovered.
    fn enumeration_method(&self) -> EnumerationMethod;

    /// How this window's children are discovered.
    fn child_enumeration_method(&self) -> EnumerationMethod;

    /// Accessibility states; empty for natively enumerated windows.
    fn states(&self) -> Vec<AccessibleState> {
        Vec::new()
    }

    fn set_focus(&self) -> bool;

    /// Not top-level and of the platform's push-button class.
    fn is_pressable(&self) -> bool;

    /// Whether this window is a visible dialog belonging to `main`.
    fn is_dialog_window_for(&self, main: &dyn Window) -> bool;

    /// Descendants accepted by `filter`, in enumeration order.
    ///
    /// Rejected candidates are released before this returns.
    fn child_windows(&self, filter: WindowFilter<'_>) -> Vec<Box<dyn Window>>;

    /// Click the window. A no-op unless [`Window::is_pressable`].
    fn press(&self) -> Result<(), WindowError>;

    /// Type `text` into the window.
    fn send_keystrokes(&self, text: &str) -> Result<(), WindowError>;

    /// Ask the window to close.
    fn force_close(&self) -> Result<(), WindowError>;

    /// Release any held native reference. Idempotent.
    fn dispose(&mut self);
}

/// Filter accepting every candidate.
pub fn any_window(_: &dyn Window) -> bool {
    true
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
