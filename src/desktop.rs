//! Window manager for the current session.

use std::sync::Arc;

use dialogwatch_desktop::X11Desktop;
use dialogwatch_protocols::WindowManager;

pub(crate) fn window_manager() -> anyhow::Result<Arc<dyn WindowManager>> {
    Ok(Arc::new(X11Desktop::new()?))
}
