//! Window backed by the native window manager.

use std::fmt;
use std::sync::Arc;
use std::thread;

use tracing::trace;

use dialogwatch_protocols::{AccessibleRole, EnumerationMethod, WindowError, WindowHandle};

use super::accessible::accessible_descendants;
use super::{Window, WindowFilter, WindowSystem};
use crate::keys::escape_send_keys;

/// Window identified by a native handle.
pub struct NativeWindow {
    system: Arc<WindowSystem>,
    handle: WindowHandle,
    child_method: EnumerationMethod,
    disposed: bool,
}

impl NativeWindow {
    pub fn new(
        system: Arc<WindowSystem>,
        handle: WindowHandle,
        child_method: EnumerationMethod,
    ) -> Self {
        Self {
            system,
            handle,
            child_method,
            disposed: false,
        }
    }

    fn native_children(&self, filter: WindowFilter<'_>) -> Vec<Box<dyn Window>> {
        let handles = match self.system.window_manager().child_windows(self.handle) {
            Ok(handles) => handles,
            Err(e) => {
                trace!("Child enumeration of {} failed: {}", self.handle, e);
                return Vec::new();
            }
        };
        let mut accepted: Vec<Box<dyn Window>> = Vec::new();
        for handle in handles {
            let mut child =
                NativeWindow::new(Arc::clone(&self.system), handle, EnumerationMethod::WindowManagementApi);
            if filter(&child) {
                accepted.push(Box::new(child));
            } else {
                child.dispose();
            }
        }
        accepted
    }
}

impl Window for NativeWindow {
    fn handle(&self) -> WindowHandle {
        self.handle
    }

    fn parent_handle(&self) -> WindowHandle {
        self.system.window_manager().parent(self.handle)
    }

    fn owner_handle(&self) -> WindowHandle {
        self.system.window_manager().owner(self.handle)
    }

    fn class_name(&self) -> String {
        self.system.window_manager().class_name(self.handle)
    }

    fn text(&self) -> String {
        self.system.window_manager().text(self.handle)
    }

    fn exists(&self) -> bool {
        !self.disposed && self.system.window_manager().is_window(self.handle)
    }

    fn visible(&self) -> bool {
        self.system.window_manager().is_visible(self.handle)
    }

    fn enabled(&self) -> bool {
        self.system.window_manager().is_enabled(self.handle)
    }

    fn is_top_level(&self) -> bool {
        self.parent_handle().is_none()
    }

    fn process_id(&self) -> u32 {
        self.system.window_manager().process_id(self.handle)
    }

    fn item_id(&self) -> i32 {
        self.system.window_manager().control_id(self.handle)
    }

    fn enumeration_method(&self) -> EnumerationMethod {
        EnumerationMethod::WindowManagementApi
    }

    fn child_enumeration_method(&self) -> EnumerationMethod {
        self.child_method
    }

    fn set_focus(&self) -> bool {
        self.system.window_manager().focus(self.handle)
    }

    fn is_pressable(&self) -> bool {
        !self.is_top_level()
            && self.class_name()
                == self
                    .system
                    .class_for_role(AccessibleRole::PushButton, self.enumeration_method())
    }

    fn is_dialog_window_for(&self, main: &dyn Window) -> bool {
        let main_handle = main.handle();
        (self.owner_handle() == main_handle || self.parent_handle() == main_handle)
            && self.visible()
    }

    fn child_windows(&self, filter: WindowFilter<'_>) -> Vec<Box<dyn Window>> {
        match self.child_method {
            EnumerationMethod::WindowManagementApi => self.native_children(filter),
            EnumerationMethod::AssistiveTechnologyApi => {
                accessible_descendants(&self.system, self.handle, filter)
            }
        }
    }

    fn press(&self) -> Result<(), WindowError> {
        if !self.is_pressable() {
            trace!("Ignoring press on non-button window {}", self.handle);
            return Ok(());
        }
        self.system.window_manager().click(self.handle)
    }

    fn send_keystrokes(&self, text: &str) -> Result<(), WindowError> {
        let delay = self.system.keystroke_delay();
        for c in escape_send_keys(text).chars() {
            self.system.window_manager().post_char(self.handle, c)?;
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
        Ok(())
    }

    fn force_close(&self) -> Result<(), WindowError> {
        self.system.window_manager().close(self.handle)
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

impl fmt::Debug for NativeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeWindow")
            .field("handle", &self.handle)
            .field("child_method", &self.child_method)
            .field("disposed", &self.disposed)
            .finish()
    }
}
