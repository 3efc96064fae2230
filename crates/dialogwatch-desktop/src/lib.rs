//! # dialogwatch Desktop
//!
//! Concrete providers for the window manager and accessibility capabilities.
//!
//! - [`X11Desktop`] drives a live X11 session through `wmctrl`, `xprop`,
//!   `xwininfo` and `xdotool`.
//! - [`SimulatedDesktop`] is an in-memory desktop with scripted windows and
//!   accessibility trees. It records every input it receives so callers can
//!   assert on clicks, posted characters and reference bookkeeping.

pub mod simulated;
pub mod x11;

pub use simulated::{NodeSpec, SimulatedDesktop, WindowSpec};
pub use x11::X11Desktop;
