//! Platform capability interfaces.
//!
//! The raw X11 / Win32 / AT-SPI / MSAA bindings live behind these two traits.
//! Everything above them (window abstraction, classifiers, poller) is
//! platform-neutral.

use crate::error::WindowError;
use crate::role::{AccessibleRole, AccessibleState};
use crate::window::{Rect, WindowHandle};

/// Opaque reference to a node in an accessibility tree.
///
/// Every reference handed out by [`AccessibilityApi::window_root`] or
/// [`AccessibilityApi::children`] is owned by the caller and must be passed to
/// [`AccessibilityApi::release`] exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessibleRef(pub u64);

/// A single key delivered to a native input queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    /// Virtual key (upper-cased for letters).
    pub key: char,
    /// Hold shift around the key.
    pub shift: bool,
}

impl KeyStroke {
    /// Build the stroke that types `c`.
    pub fn for_char(c: char) -> Self {
        Self {
            key: c.to_ascii_uppercase(),
            shift: c.is_ascii_uppercase(),
        }
    }
}

/// Native window manager capability.
///
/// All queries are live: implementations must not cache answers, because
/// dialogs can vanish between two calls.
pub trait WindowManager: Send + Sync {
    /// Every top-level window on the desktop, in enumeration order.
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>, WindowError>;

    /// Direct and nested child windows, in enumeration order.
    fn child_windows(&self, parent: WindowHandle) -> Result<Vec<WindowHandle>, WindowError>;

    /// Whether the handle still names a live window.
    fn is_window(&self, handle: WindowHandle) -> bool;

    fn class_name(&self, handle: WindowHandle) -> String;

    fn text(&self, handle: WindowHandle) -> String;

    fn is_visible(&self, handle: WindowHandle) -> bool;

    fn is_enabled(&self, handle: WindowHandle) -> bool;

    /// Parent window, or [`WindowHandle::NONE`] for top-level windows.
    fn parent(&self, handle: WindowHandle) -> WindowHandle;

    /// Owner window (GW_OWNER on Windows, WM_TRANSIENT_FOR on X11).
    fn owner(&self, handle: WindowHandle) -> WindowHandle;

    fn process_id(&self, handle: WindowHandle) -> u32;

    /// Dialog control identifier (GetDlgCtrlID); zero when not applicable.
    fn control_id(&self, handle: WindowHandle) -> i32;

    fn bounds(&self, handle: WindowHandle) -> Option<Rect>;

    /// Give keyboard focus to the window; `false` if the manager refused.
    fn focus(&self, handle: WindowHandle) -> bool;

    /// Activate and click a button control.
    fn click(&self, handle: WindowHandle) -> Result<(), WindowError>;

    /// Post one character message to the window (WM_CHAR).
    fn post_char(&self, handle: WindowHandle, c: char) -> Result<(), WindowError>;

    /// Inject keystrokes into the focused window's input queue (SendInput).
    fn send_input(&self, strokes: &[KeyStroke]) -> Result<(), WindowError>;

    /// Ask the window to close (WM_CLOSE / WM_DELETE_WINDOW).
    fn close(&self, handle: WindowHandle) -> Result<(), WindowError>;
}

/// Accessibility tree capability.
pub trait AccessibilityApi: Send + Sync {
    /// Open the process-wide connection. Paired with [`AccessibilityApi::disconnect`].
    fn connect(&self) -> Result<(), WindowError>;

    fn disconnect(&self);

    /// Root accessible node of a top-level window, as a new reference.
    fn window_root(&self, window: WindowHandle) -> Option<AccessibleRef>;

    /// Whether the node still exists.
    fn is_valid(&self, node: AccessibleRef) -> bool;

    fn name(&self, node: AccessibleRef) -> String;

    fn role(&self, node: AccessibleRef) -> AccessibleRole;

    fn states(&self, node: AccessibleRef) -> Vec<AccessibleState>;

    /// Text content when the node implements the text interface.
    fn text(&self, node: AccessibleRef) -> Option<String>;

    fn supports_editable_text(&self, node: AccessibleRef) -> bool;

    fn set_text(&self, node: AccessibleRef, text: &str) -> Result<(), WindowError>;

    fn action_count(&self, node: AccessibleRef) -> usize;

    fn do_action(&self, node: AccessibleRef, index: usize) -> Result<(), WindowError>;

    fn set_focus(&self, node: AccessibleRef) -> bool;

    /// Direct children in tree order, each as a new reference.
    fn children(&self, node: AccessibleRef) -> Vec<AccessibleRef>;

    /// Drop one reference.
    fn release(&self, node: AccessibleRef);
}
