//! Window backed by an accessibility tree node.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use dialogwatch_protocols::{
    AccessibilityApi, AccessibleRef, AccessibleRole, AccessibleState, EnumerationMethod, KeyStroke,
    WindowError, WindowHandle,
};

use super::{Window, WindowFilter, WindowSystem};
use crate::keys::escape_send_keys;

/// Deepest accessibility subtree searched for children.
const MAX_SEARCH_DEPTH: usize = 32;

/// Owned accessibility reference, released exactly once.
struct AccessibleNode {
    api: Arc<dyn AccessibilityApi>,
    node: Option<AccessibleRef>,
}

impl AccessibleNode {
    fn new(api: Arc<dyn AccessibilityApi>, node: AccessibleRef) -> Self {
        Self {
            api,
            node: Some(node),
        }
    }

    fn get(&self) -> Option<AccessibleRef> {
        self.node
    }

    fn release(&mut self) {
        if let Some(node) = self.node.take() {
            self.api.release(node);
        }
    }
}

impl Drop for AccessibleNode {
    fn drop(&mut self) {
        self.release();
    }
}

/// Window discovered through the accessibility API.
///
/// Its class name is its role name and its item id is its index in the
/// search result that produced it.
pub struct AccessibleWindow {
    system: Arc<WindowSystem>,
    node: AccessibleNode,
    top_level: WindowHandle,
    item_id: i32,
    is_root: bool,
}

impl AccessibleWindow {
    /// Root node of a native top-level window, if the window exposes one.
    pub fn root(system: &Arc<WindowSystem>, top_level: WindowHandle) -> Option<Self> {
        let api = system.accessibility()?;
        let node = api.window_root(top_level)?;
        Some(Self {
            system: Arc::clone(system),
            node: AccessibleNode::new(Arc::clone(api), node),
            top_level,
            item_id: 0,
            is_root: true,
        })
    }

    fn api(&self) -> &Arc<dyn AccessibilityApi> {
        &self.node.api
    }

    pub fn role(&self) -> AccessibleRole {
        match self.node.get() {
            Some(node) => self.api().role(node),
            None => AccessibleRole::Invalid,
        }
    }

    fn has_state(&self, state: AccessibleState) -> bool {
        self.states().contains(&state)
    }
}

impl Window for AccessibleWindow {
    fn handle(&self) -> WindowHandle {
        match (self.is_root, self.node.get()) {
            (true, _) => self.top_level,
            (false, Some(node)) => WindowHandle(node.0),
            (false, None) => WindowHandle::NONE,
        }
    }

    fn parent_handle(&self) -> WindowHandle {
        if self.is_root {
            WindowHandle::NONE
        } else {
            self.top_level
        }
    }

    fn owner_handle(&self) -> WindowHandle {
        if self.is_root {
            self.system.window_manager().owner(self.top_level)
        } else {
            WindowHandle::NONE
        }
    }

    fn class_name(&self) -> String {
        self.role().as_str().to_string()
    }

    fn text(&self) -> String {
        let Some(node) = self.node.get() else {
            return String::new();
        };
        match self.role() {
            AccessibleRole::Text | AccessibleRole::PasswordText => {
                self.api().text(node).unwrap_or_default()
            }
            _ => self.api().name(node),
        }
    }

    fn exists(&self) -> bool {
        self.node.get().is_some_and(|node| self.api().is_valid(node))
    }

    fn visible(&self) -> bool {
        self.has_state(AccessibleState::Visible)
    }

    fn enabled(&self) -> bool {
        self.has_state(AccessibleState::Enabled) || self.has_state(AccessibleState::Sensitive)
    }

    fn is_top_level(&self) -> bool {
        self.is_root
    }

    fn process_id(&self) -> u32 {
        self.system.window_manager().process_id(self.top_level)
    }

    fn item_id(&self) -> i32 {
        self.item_id
    }

    fn enumeration_method(&self) -> EnumerationMethod {
        EnumerationMethod::AssistiveTechnologyApi
    }

    fn child_enumeration_method(&self) -> EnumerationMethod {
        EnumerationMethod::AssistiveTechnologyApi
    }

    fn states(&self) -> Vec<AccessibleState> {
        match self.node.get() {
            Some(node) => self.api().states(node),
            None => Vec::new(),
        }
    }

    fn set_focus(&self) -> bool {
        self.node.get().is_some_and(|node| self.api().set_focus(node))
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
        let wm = self.system.window_manager();
        (wm.owner(self.top_level) == main_handle || wm.parent(self.top_level) == main_handle)
            && wm.is_visible(self.top_level)
    }

    fn child_windows(&self, filter: WindowFilter<'_>) -> Vec<Box<dyn Window>> {
        let mut found = Vec::new();
        if let Some(node) = self.node.get() {
            let mut search = DescendantSearch {
                system: &self.system,
                api: self.api(),
                top_level: self.top_level,
                filter,
                next_index: 0,
                found: &mut found,
            };
            search.collect(node, 0);
        }
        found
    }

    fn press(&self) -> Result<(), WindowError> {
        if !self.is_pressable() {
            return Ok(());
        }
        let node = self.node.get().ok_or(WindowError::NotFound(self.handle()))?;
        if self.api().action_count(node) == 0 {
            return Err(WindowError::ActionFailed(format!(
                "{} exposes no actions",
                self.class_name()
            )));
        }
        self.api().do_action(node, 0)
    }

    fn send_keystrokes(&self, text: &str) -> Result<(), WindowError> {
        let node = self.node.get().ok_or(WindowError::NotFound(self.handle()))?;
        if self.api().supports_editable_text(node) {
            return self.api().set_text(node, text);
        }
        if !self.api().set_focus(node) {
            return Err(WindowError::ActionFailed(format!(
                "could not focus {} to type into it",
                self.class_name()
            )));
        }
        let strokes: Vec<KeyStroke> = escape_send_keys(text).chars().map(KeyStroke::for_char).collect();
        self.system.window_manager().send_input(&strokes)
    }

    fn force_close(&self) -> Result<(), WindowError> {
        if self.is_root {
            self.system.window_manager().close(self.top_level)
        } else {
            Ok(())
        }
    }

    fn dispose(&mut self) {
        self.node.release();
    }
}

impl fmt::Debug for AccessibleWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessibleWindow")
            .field("node", &self.node.get())
            .field("top_level", &self.top_level)
            .field("item_id", &self.item_id)
            .field("is_root", &self.is_root)
            .finish()
    }
}

/// Visible descendants of a top-level window's accessibility root accepted by `filter`.
pub(crate) fn accessible_descendants(
    system: &Arc<WindowSystem>,
    top_level: WindowHandle,
    filter: WindowFilter<'_>,
) -> Vec<Box<dyn Window>> {
    match AccessibleWindow::root(system, top_level) {
        Some(root) => root.child_windows(filter),
        None => {
            trace!("No accessibility root for {}", top_level);
            Vec::new()
        }
    }
}

/// Pre-order search of visible nodes of any role.
///
/// Hidden nodes are never returned but their subtrees are still searched.
/// A candidate's item id is its index among all visible nodes visited,
/// whether or not the filter accepts it. Rejected and hidden candidates are
/// released once their subtree has been searched.
struct DescendantSearch<'a, 'f> {
    system: &'a Arc<WindowSystem>,
    api: &'a Arc<dyn AccessibilityApi>,
    top_level: WindowHandle,
    filter: WindowFilter<'f>,
    next_index: i32,
    found: &'a mut Vec<Box<dyn Window>>,
}

impl DescendantSearch<'_, '_> {
    fn collect(&mut self, parent: AccessibleRef, depth: usize) {
        if depth >= MAX_SEARCH_DEPTH {
            return;
        }
        for child in self.api.children(parent) {
            let candidate = AccessibleWindow {
                system: Arc::clone(self.system),
                node: AccessibleNode::new(Arc::clone(self.api), child),
                top_level: self.top_level,
                item_id: self.next_index,
                is_root: false,
            };
            let rejected = if !candidate.visible() {
                Some(candidate)
            } else {
                self.next_index += 1;
                if (self.filter)(&candidate) {
                    self.found.push(Box::new(candidate));
                    None
                } else {
                    Some(candidate)
                }
            };
            self.collect(child, depth + 1);
            drop(rejected);
        }
    }
}
