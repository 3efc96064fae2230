//! Window capability errors.

use thiserror::Error;

use crate::window::WindowHandle;

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("Platform not supported: {0}")]
    PlatformNotSupported(String),

    #[error("Failed to list windows: {0}")]
    ListFailed(String),

    #[error("Window not found: {0}")]
    NotFound(WindowHandle),

    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("Window action failed: {0}")]
    ActionFailed(String),

    #[error("Accessibility error: {0}")]
    Accessibility(String),
}

impl WindowError {
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_error_platform() {
        let err = WindowError::PlatformNotSupported("windows".to_string());
        assert!(err.to_string().contains("not supported"));
        assert!(err.to_string().contains("windows"));
    }

    #[test]
    fn test_window_error_not_found_shows_hex_handle() {
        let err = WindowError::NotFound(WindowHandle(0x1f));
        assert_eq!(err.to_string(), "Window not found: 0x0000001f");
    }

    #[test]
    fn test_window_error_command_failed() {
        let err = WindowError::command_failed("wmctrl", "exit status 1");
        assert!(err.to_string().contains("wmctrl"));
        assert!(err.to_string().contains("exit status 1"));
    }

    #[test]
    fn test_window_error_debug() {
        let err = WindowError::Accessibility("bus closed".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Accessibility"));
    }
}
