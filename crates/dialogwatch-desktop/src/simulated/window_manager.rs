use dialogwatch_protocols::{KeyStroke, Rect, WindowError, WindowHandle, WindowManager};

use super::{DesktopState, SimulatedDesktop};

impl SimulatedDesktop {
    fn query<T: Default>(&self, handle: WindowHandle, f: impl FnOnce(&super::SimWindow) -> T) -> T {
        self.state.lock().live_window(handle).map(f).unwrap_or_default()
    }
}

fn collect_children(state: &DesktopState, parent: WindowHandle, out: &mut Vec<WindowHandle>) {
    for window in state.windows.iter().filter(|w| w.alive && w.parent == parent) {
        out.push(window.handle);
        collect_children(state, window.handle, out);
    }
}

impl WindowManager for SimulatedDesktop {
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>, WindowError> {
        let state = self.state.lock();
        if let Some(message) = &state.enumeration_failure {
            return Err(WindowError::ListFailed(message.clone()));
        }
        Ok(state
            .windows
            .iter()
            .filter(|w| w.alive && w.parent.is_none())
            .map(|w| w.handle)
            .collect())
    }

    fn child_windows(&self, parent: WindowHandle) -> Result<Vec<WindowHandle>, WindowError> {
        let state = self.state.lock();
        if state.live_window(parent).is_none() {
            return Err(WindowError::NotFound(parent));
        }
        let mut children = Vec::new();
        collect_children(&state, parent, &mut children);
        Ok(children)
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        self.is_alive(handle)
    }

    fn class_name(&self, handle: WindowHandle) -> String {
        self.query(handle, |w| w.spec.class_name.clone())
    }

    fn text(&self, handle: WindowHandle) -> String {
        self.query(handle, |w| w.spec.text.clone())
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        self.query(handle, |w| w.spec.visible)
    }

    fn is_enabled(&self, handle: WindowHandle) -> bool {
        self.query(handle, |w| w.spec.enabled)
    }

    fn parent(&self, handle: WindowHandle) -> WindowHandle {
        self.query(handle, |w| w.parent)
    }

    fn owner(&self, handle: WindowHandle) -> WindowHandle {
        self.query(handle, |w| w.spec.owner)
    }

    fn process_id(&self, handle: WindowHandle) -> u32 {
        self.query(handle, |w| w.spec.process_id)
    }

    fn control_id(&self, handle: WindowHandle) -> i32 {
        self.query(handle, |w| w.spec.control_id)
    }

    fn bounds(&self, handle: WindowHandle) -> Option<Rect> {
        self.query(handle, |w| w.spec.bounds)
    }

    fn focus(&self, handle: WindowHandle) -> bool {
        let mut state = self.state.lock();
        if state.live_window(handle).is_none() {
            return false;
        }
        state.focused = Some(handle);
        true
    }

    fn click(&self, handle: WindowHandle) -> Result<(), WindowError> {
        let mut state = self.state.lock();
        let closes = state
            .live_window(handle)
            .ok_or(WindowError::NotFound(handle))?
            .closes;
        state.clicks.push(handle);
        if let Some(target) = closes {
            state.destroy(target);
        }
        Ok(())
    }

    fn post_char(&self, handle: WindowHandle, c: char) -> Result<(), WindowError> {
        let mut state = self.state.lock();
        match state.window_mut(handle).filter(|w| w.alive) {
            Some(window) => {
                window.posted.push(c);
                Ok(())
            }
            None => Err(WindowError::NotFound(handle)),
        }
    }

    fn send_input(&self, strokes: &[KeyStroke]) -> Result<(), WindowError> {
        self.state.lock().input.extend_from_slice(strokes);
        Ok(())
    }

    fn close(&self, handle: WindowHandle) -> Result<(), WindowError> {
        let mut state = self.state.lock();
        if state.live_window(handle).is_none() {
            return Err(WindowError::NotFound(handle));
        }
        state.destroy(handle);
        Ok(())
    }
}
