//! Window factory and platform capability holder.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use dialogwatch_protocols::{
    AccessibilityApi, AccessibleRole, EnumerationMethod, Platform, WindowError, WindowHandle,
    WindowManager,
};

use super::{NativeWindow, Window, WindowFilter};

/// Default delay between characters posted to a native input queue.
pub const DEFAULT_KEYSTROKE_DELAY: Duration = Duration::from_millis(50);

/// Platform capabilities plus the settings every window needs.
///
/// Windows created by the system hold an `Arc` to it, so it outlives them.
pub struct WindowSystem {
    window_manager: Arc<dyn WindowManager>,
    accessibility: Option<Arc<dyn AccessibilityApi>>,
    platform: Platform,
    keystroke_delay: Duration,
}

impl WindowSystem {
    pub fn new(window_manager: Arc<dyn WindowManager>, platform: Platform) -> Self {
        Self {
            window_manager,
            accessibility: None,
            platform,
            keystroke_delay: DEFAULT_KEYSTROKE_DELAY,
        }
    }

    /// Enable accessibility-based child enumeration.
    pub fn with_accessibility(mut self, accessibility: Arc<dyn AccessibilityApi>) -> Self {
        self.accessibility = Some(accessibility);
        self
    }

    pub fn with_keystroke_delay(mut self, delay: Duration) -> Self {
        self.keystroke_delay = delay;
        self
    }

    pub fn window_manager(&self) -> &Arc<dyn WindowManager> {
        &self.window_manager
    }

    pub fn accessibility(&self) -> Option<&Arc<dyn AccessibilityApi>> {
        self.accessibility.as_ref()
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn keystroke_delay(&self) -> Duration {
        self.keystroke_delay
    }

    /// Class name a window of `role` reports under `method`.
    ///
    /// Only the native Windows API uses its own class names; accessibility
    /// enumeration reports role names everywhere.
    pub fn class_for_role(&self, role: AccessibleRole, method: EnumerationMethod) -> &'static str {
        class_for_role(self.platform, role, method)
    }

    /// Wrap a native handle.
    pub fn window(
        self: &Arc<Self>,
        handle: WindowHandle,
        child_method: EnumerationMethod,
    ) -> Box<dyn Window> {
        Box::new(NativeWindow::new(Arc::clone(self), handle, child_method))
    }

    /// Every top-level window accepted by `filter`, in enumeration order.
    ///
    /// Rejected windows are released before this returns.
    pub fn top_level_windows(
        self: &Arc<Self>,
        child_method: EnumerationMethod,
        filter: WindowFilter<'_>,
    ) -> Result<Vec<Box<dyn Window>>, WindowError> {
        let handles = self.window_manager.top_level_windows()?;
        let mut accepted = Vec::new();
        for handle in handles {
            let mut window = self.window(handle, child_method);
            if filter(window.as_ref()) {
                accepted.push(window);
            } else {
                window.dispose();
            }
        }
        Ok(accepted)
    }

    /// First top-level window whose class is `class_name`.
    pub fn find_top_level(
        self: &Arc<Self>,
        class_name: &str,
        child_method: EnumerationMethod,
    ) -> Result<Option<Box<dyn Window>>, WindowError> {
        let mut found = self.top_level_windows(child_method, &|w| w.class_name() == class_name)?;
        debug!(class = class_name, matches = found.len(), "Searched top-level windows");
        if found.is_empty() {
            return Ok(None);
        }
        Ok(Some(found.swap_remove(0)))
    }

    /// Open the accessibility connection for the lifetime of the returned session.
    pub fn connect_accessibility(&self) -> Result<Option<AccessibilitySession>, WindowError> {
        match &self.accessibility {
            Some(api) => {
                api.connect()?;
                info!("Accessibility connection opened");
                Ok(Some(AccessibilitySession {
                    api: Arc::clone(api),
                }))
            }
            None => Ok(None),
        }
    }
}

impl fmt::Debug for WindowSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowSystem")
            .field("platform", &self.platform)
            .field("accessibility", &self.accessibility.is_some())
            .field("keystroke_delay", &self.keystroke_delay)
            .finish()
    }
}

/// Class name a window of `role` reports under `method` on `platform`.
pub fn class_for_role(
    platform: Platform,
    role: AccessibleRole,
    method: EnumerationMethod,
) -> &'static str {
    if platform.is_windows() && method.is_native() {
        match role {
            AccessibleRole::PushButton => return "Button",
            AccessibleRole::Text => return "Edit",
            AccessibleRole::Label => return "Static",
            _ => {}
        }
    }
    role.as_str()
}

/// Scoped accessibility connection; disconnects on drop.
pub struct AccessibilitySession {
    api: Arc<dyn AccessibilityApi>,
}

impl fmt::Debug for AccessibilitySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessibilitySession").finish_non_exhaustive()
    }
}

impl Drop for AccessibilitySession {
    fn drop(&mut self) {
        self.api.disconnect();
        info!("Accessibility connection closed");
    }
}
