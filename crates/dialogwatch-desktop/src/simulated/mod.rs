//! In-memory desktop.
//!
//! Windows and accessibility nodes are scripted through [`WindowSpec`] and
//! [`NodeSpec`]. Buttons and accessible actions can be wired to close a
//! window, which is how a dialog "goes away" after being answered.

use std::collections::HashMap;

use parking_lot::Mutex;

use dialogwatch_protocols::{AccessibleRole, AccessibleState, KeyStroke, Rect, WindowHandle};

mod accessibility;
mod window_manager;

const FIRST_HANDLE: u64 = 0x0040_0000;
const FIRST_NODE: u64 = 1;

/// Description of a window to add to the desktop.
#[derive(Debug, Clone)]
pub struct WindowSpec {
    pub class_name: String,
    pub text: String,
    pub owner: WindowHandle,
    pub process_id: u32,
    pub control_id: i32,
    pub visible: bool,
    pub enabled: bool,
    pub bounds: Option<Rect>,
}

impl WindowSpec {
    pub fn new(class_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            text: text.into(),
            owner: WindowHandle::NONE,
            process_id: 0,
            control_id: 0,
            visible: true,
            enabled: true,
            bounds: None,
        }
    }

    /// Owner window (transient-for).
    pub fn owner(mut self, owner: WindowHandle) -> Self {
        self.owner = owner;
        self
    }

    pub fn process_id(mut self, pid: u32) -> Self {
        self.process_id = pid;
        self
    }

    pub fn control_id(mut self, id: i32) -> Self {
        self.control_id = id;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Description of an accessibility node to add to the desktop.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub role: AccessibleRole,
    pub name: String,
    pub states: Vec<AccessibleState>,
    pub text: Option<String>,
    pub editable: bool,
    pub actions: usize,
}

impl NodeSpec {
    /// A visible, enabled node. Push buttons get one action.
    pub fn new(role: AccessibleRole, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
            states: vec![
                AccessibleState::Visible,
                AccessibleState::Showing,
                AccessibleState::Enabled,
                AccessibleState::Sensitive,
            ],
            text: None,
            editable: false,
            actions: usize::from(role == AccessibleRole::PushButton),
        }
    }

    pub fn hidden(mut self) -> Self {
        self.states
            .retain(|s| !matches!(s, AccessibleState::Visible | AccessibleState::Showing));
        self
    }

    pub fn state(mut self, state: AccessibleState) -> Self {
        if !self.states.contains(&state) {
            self.states.push(state);
        }
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Implements the editable-text interface.
    pub fn editable(mut self) -> Self {
        self.editable = true;
        if self.text.is_none() {
            self.text = Some(String::new());
        }
        self.state(AccessibleState::Editable)
    }
}

#[derive(Debug)]
struct SimWindow {
    handle: WindowHandle,
    parent: WindowHandle,
    spec: WindowSpec,
    alive: bool,
    closes: Option<WindowHandle>,
    posted: String,
}

#[derive(Debug)]
struct SimNode {
    window: WindowHandle,
    spec: NodeSpec,
    children: Vec<u64>,
    closes: Option<WindowHandle>,
}

#[derive(Debug, Default)]
struct DesktopState {
    windows: Vec<SimWindow>,
    nodes: HashMap<u64, SimNode>,
    roots: HashMap<WindowHandle, u64>,
    next_handle: u64,
    next_node: u64,
    outstanding: HashMap<u64, usize>,
    over_released: usize,
    focused: Option<WindowHandle>,
    focused_node: Option<u64>,
    clicks: Vec<WindowHandle>,
    actions: Vec<(u64, usize)>,
    input: Vec<KeyStroke>,
    enumeration_failure: Option<String>,
    connected: bool,
    connects: usize,
    disconnects: usize,
}

impl DesktopState {
    fn window(&self, handle: WindowHandle) -> Option<&SimWindow> {
        self.windows.iter().find(|w| w.handle == handle)
    }

    fn window_mut(&mut self, handle: WindowHandle) -> Option<&mut SimWindow> {
        self.windows.iter_mut().find(|w| w.handle == handle)
    }

    fn live_window(&self, handle: WindowHandle) -> Option<&SimWindow> {
        self.window(handle).filter(|w| w.alive)
    }

    /// Destroy a window and everything below it.
    fn destroy(&mut self, handle: WindowHandle) {
        let mut doomed = vec![handle];
        while let Some(current) = doomed.pop() {
            for window in self.windows.iter_mut() {
                if window.handle == current {
                    window.alive = false;
                } else if window.parent == current && window.alive {
                    doomed.push(window.handle);
                }
            }
        }
        let dead: Vec<WindowHandle> = self
            .windows
            .iter()
            .filter(|w| !w.alive)
            .map(|w| w.handle)
            .collect();
        self.nodes.retain(|_, node| !dead.contains(&node.window));
        self.roots.retain(|window, _| !dead.contains(window));
    }

    fn node(&self, id: u64) -> Option<&SimNode> {
        self.nodes.get(&id)
    }

    fn acquire(&mut self, id: u64) {
        *self.outstanding.entry(id).or_insert(0) += 1;
    }
}

/// Scriptable in-memory desktop implementing both capability traits.
#[derive(Debug)]
pub struct SimulatedDesktop {
    state: Mutex<DesktopState>,
}

impl SimulatedDesktop {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DesktopState {
                next_handle: FIRST_HANDLE,
                next_node: FIRST_NODE,
                ..DesktopState::default()
            }),
        }
    }

    /// Add a top-level window.
    pub fn add_window(&self, spec: WindowSpec) -> WindowHandle {
        self.insert_window(WindowHandle::NONE, spec)
    }

    /// Add a child control under `parent`.
    pub fn add_child(&self, parent: WindowHandle, spec: WindowSpec) -> WindowHandle {
        self.insert_window(parent, spec)
    }

    fn insert_window(&self, parent: WindowHandle, spec: WindowSpec) -> WindowHandle {
        let mut state = self.state.lock();
        let handle = WindowHandle(state.next_handle);
        state.next_handle += 1;
        let spec = if spec.process_id == 0 && !parent.is_none() {
            let pid = state.window(parent).map(|p| p.spec.process_id).unwrap_or(0);
            spec.process_id(pid)
        } else {
            spec
        };
        state.windows.push(SimWindow {
            handle,
            parent,
            spec,
            alive: true,
            closes: None,
            posted: String::new(),
        });
        handle
    }

    /// Clicking `button` destroys `window`.
    pub fn close_on_click(&self, button: WindowHandle, window: WindowHandle) {
        if let Some(b) = self.state.lock().window_mut(button) {
            b.closes = Some(window);
        }
    }

    /// Destroy a window as if the user closed it.
    pub fn destroy_window(&self, handle: WindowHandle) {
        self.state.lock().destroy(handle);
    }

    pub fn set_window_text(&self, handle: WindowHandle, text: impl Into<String>) {
        if let Some(w) = self.state.lock().window_mut(handle) {
            w.spec.text = text.into();
        }
    }

    pub fn set_window_visible(&self, handle: WindowHandle, visible: bool) {
        if let Some(w) = self.state.lock().window_mut(handle) {
            w.spec.visible = visible;
        }
    }

    /// Make top-level enumeration fail until cleared with `None`.
    pub fn fail_enumeration(&self, message: Option<&str>) {
        self.state.lock().enumeration_failure = message.map(str::to_string);
    }

    /// Attach the accessibility root of a top-level window.
    pub fn add_accessible_root(&self, window: WindowHandle, spec: NodeSpec) -> u64 {
        let mut state = self.state.lock();
        let id = Self::insert_node(&mut state, window, spec);
        state.roots.insert(window, id);
        id
    }

    /// Attach an accessibility node under `parent`.
    pub fn add_accessible_child(&self, parent: u64, spec: NodeSpec) -> u64 {
        let mut state = self.state.lock();
        let window = state
            .node(parent)
            .map(|n| n.window)
            .unwrap_or(WindowHandle::NONE);
        let id = Self::insert_node(&mut state, window, spec);
        if let Some(p) = state.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        id
    }

    fn insert_node(state: &mut DesktopState, window: WindowHandle, spec: NodeSpec) -> u64 {
        let id = state.next_node;
        state.next_node += 1;
        state.nodes.insert(
            id,
            SimNode {
                window,
                spec,
                children: Vec::new(),
                closes: None,
            },
        );
        id
    }

    /// Performing any action on `node` destroys `window`.
    pub fn close_on_action(&self, node: u64, window: WindowHandle) {
        if let Some(n) = self.state.lock().nodes.get_mut(&node) {
            n.closes = Some(window);
        }
    }

    pub fn is_alive(&self, handle: WindowHandle) -> bool {
        self.state.lock().live_window(handle).is_some()
    }

    /// Characters posted to a window's message queue.
    pub fn posted_text(&self, handle: WindowHandle) -> String {
        self.state
            .lock()
            .window(handle)
            .map(|w| w.posted.clone())
            .unwrap_or_default()
    }

    /// Keystrokes injected into the global input queue.
    pub fn sent_input(&self) -> Vec<KeyStroke> {
        self.state.lock().input.clone()
    }

    /// Buttons clicked, in order.
    pub fn clicks(&self) -> Vec<WindowHandle> {
        self.state.lock().clicks.clone()
    }

    /// Accessible actions performed as `(node, action index)`, in order.
    pub fn performed_actions(&self) -> Vec<(u64, usize)> {
        self.state.lock().actions.clone()
    }

    pub fn focused_window(&self) -> Option<WindowHandle> {
        self.state.lock().focused
    }

    pub fn focused_node(&self) -> Option<u64> {
        self.state.lock().focused_node
    }

    pub fn node_text(&self, node: u64) -> Option<String> {
        self.state.lock().node(node).and_then(|n| n.spec.text.clone())
    }

    /// Accessibility references handed out and not yet released.
    pub fn outstanding_references(&self) -> usize {
        self.state.lock().outstanding.values().sum()
    }

    /// Releases of references that were never handed out (or already released).
    pub fn over_releases(&self) -> usize {
        self.state.lock().over_released
    }

    pub fn is_connected(&self) -> bool {
        self.state.lock().connected
    }

    /// `(connect calls, disconnect calls)`.
    pub fn connection_counts(&self) -> (usize, usize) {
        let state = self.state.lock();
        (state.connects, state.disconnects)
    }
}

impl Default for SimulatedDesktop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "simulated_tests.rs"]
mod tests;
