use tracing::trace;

use dialogwatch_protocols::{
    AccessibilityApi, AccessibleRef, AccessibleRole, AccessibleState, WindowError, WindowHandle,
};

use super::SimulatedDesktop;

impl AccessibilityApi for SimulatedDesktop {
    fn connect(&self) -> Result<(), WindowError> {
        let mut state = self.state.lock();
        state.connected = true;
        state.connects += 1;
        Ok(())
    }

    fn disconnect(&self) {
        let mut state = self.state.lock();
        state.connected = false;
        state.disconnects += 1;
    }

    fn window_root(&self, window: WindowHandle) -> Option<AccessibleRef> {
        let mut state = self.state.lock();
        let id = *state.roots.get(&window)?;
        state.acquire(id);
        Some(AccessibleRef(id))
    }

    fn is_valid(&self, node: AccessibleRef) -> bool {
        self.state.lock().node(node.0).is_some()
    }

    fn name(&self, node: AccessibleRef) -> String {
        self.state
            .lock()
            .node(node.0)
            .map(|n| n.spec.name.clone())
            .unwrap_or_default()
    }

    fn role(&self, node: AccessibleRef) -> AccessibleRole {
        self.state
            .lock()
            .node(node.0)
            .map(|n| n.spec.role)
            .unwrap_or(AccessibleRole::Invalid)
    }

    fn states(&self, node: AccessibleRef) -> Vec<AccessibleState> {
        self.state
            .lock()
            .node(node.0)
            .map(|n| n.spec.states.clone())
            .unwrap_or_default()
    }

    fn text(&self, node: AccessibleRef) -> Option<String> {
        self.state.lock().node(node.0).and_then(|n| n.spec.text.clone())
    }

    fn supports_editable_text(&self, node: AccessibleRef) -> bool {
        self.state
            .lock()
            .node(node.0)
            .map(|n| n.spec.editable)
            .unwrap_or(false)
    }

    fn set_text(&self, node: AccessibleRef, text: &str) -> Result<(), WindowError> {
        let mut state = self.state.lock();
        match state.nodes.get_mut(&node.0) {
            Some(n) if n.spec.editable => {
                n.spec.text = Some(text.to_string());
                Ok(())
            }
            Some(_) => Err(WindowError::Accessibility(format!(
                "node {} does not support editable text",
                node.0
            ))),
            None => Err(WindowError::Accessibility(format!("node {} is gone", node.0))),
        }
    }

    fn action_count(&self, node: AccessibleRef) -> usize {
        self.state
            .lock()
            .node(node.0)
            .map(|n| n.spec.actions)
            .unwrap_or(0)
    }

    fn do_action(&self, node: AccessibleRef, index: usize) -> Result<(), WindowError> {
        let mut state = self.state.lock();
        let (actions, closes) = state
            .node(node.0)
            .map(|n| (n.spec.actions, n.closes))
            .ok_or_else(|| WindowError::Accessibility(format!("node {} is gone", node.0)))?;
        if index >= actions {
            return Err(WindowError::ActionFailed(format!(
                "node {} has no action {}",
                node.0, index
            )));
        }
        state.actions.push((node.0, index));
        if let Some(window) = closes {
            state.destroy(window);
        }
        Ok(())
    }

    fn set_focus(&self, node: AccessibleRef) -> bool {
        let mut state = self.state.lock();
        if state.node(node.0).is_none() {
            return false;
        }
        state.focused_node = Some(node.0);
        true
    }

    fn children(&self, node: AccessibleRef) -> Vec<AccessibleRef> {
        let mut state = self.state.lock();
        let children = state
            .node(node.0)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in &children {
            state.acquire(*child);
        }
        children.into_iter().map(AccessibleRef).collect()
    }

    fn release(&self, node: AccessibleRef) {
        let mut state = self.state.lock();
        match state.outstanding.get_mut(&node.0) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    state.outstanding.remove(&node.0);
                }
            }
            _ => {
                trace!(node = node.0, "release of unowned accessible reference");
                state.over_released += 1;
            }
        }
    }
}
