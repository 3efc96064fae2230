//! Native window identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque native window handle (HWND on Windows, XID on X11).
///
/// The zero handle means "no window", matching both platforms' conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(pub u64);

impl WindowHandle {
    /// The null handle.
    pub const NONE: WindowHandle = WindowHandle(0);

    /// Whether this is the null handle.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Raw handle value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl From<u64> for WindowHandle {
    fn from(raw: u64) -> Self {
        WindowHandle(raw)
    }
}

/// Window geometry in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// How a window (or its children) is discovered and queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumerationMethod {
    /// Native window manager API (EnumChildWindows, XQueryTree, ...).
    #[default]
    #[serde(alias = "native")]
    WindowManagementApi,
    /// Accessibility API (MSAA, AT-SPI).
    #[serde(alias = "accessibility")]
    AssistiveTechnologyApi,
}

impl EnumerationMethod {
    /// Whether this is the native window manager API.
    pub fn is_native(self) -> bool {
        self == EnumerationMethod::WindowManagementApi
    }
}
