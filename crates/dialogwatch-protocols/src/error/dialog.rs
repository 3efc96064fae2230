//! Dialog handling errors.

use thiserror::Error;

use super::WindowError;
use crate::dialog::DialogKind;

/// Boxed cause carried by [`DialogError::Timeout`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Timeout while {message}")]
    Timeout {
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },

    #[error("Could not find Dialog instance for {0}")]
    UnhandleableKind(DialogKind),

    #[error("Control not found: {0}")]
    ControlNotFound(String),

    #[error("Dialog has been disposed")]
    Disposed,

    #[error("No browser window found with class '{0}'")]
    NoBrowserWindow(String),

    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DialogError {
    pub fn timeout(message: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::Timeout {
            message: message.into(),
            source: source.map(Into::into),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
