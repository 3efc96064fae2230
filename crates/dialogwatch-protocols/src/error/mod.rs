//! Error types for the dialogwatch protocol layer.

mod dialog;
mod window;

pub use dialog::*;
pub use window::*;
