//! Accessibility roles and states.
//!
//! Windows discovered through an accessibility API report their role name as
//! their class name, so [`AccessibleRole::as_str`] is load-bearing: classifiers
//! compare against it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Accessible role of a node in an accessibility tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Matches any role in child searches.
    AnyRole,
    /// The node is gone or the query failed.
    Invalid,
    Application,
    Frame,
    Dialog,
    Alert,
    Window,
    Panel,
    Filler,
    Label,
    Text,
    PasswordText,
    PushButton,
    CheckBox,
    ComboBox,
    List,
    ListItem,
    Separator,
    Unknown,
}

impl AccessibleRole {
    /// Role name, used as the class name of accessibility-enumerated windows.
    pub fn as_str(self) -> &'static str {
        match self {
            AccessibleRole::AnyRole => "AnyRole",
            AccessibleRole::Invalid => "Invalid",
            AccessibleRole::Application => "Application",
            AccessibleRole::Frame => "Frame",
            AccessibleRole::Dialog => "Dialog",
            AccessibleRole::Alert => "Alert",
            AccessibleRole::Window => "Window",
            AccessibleRole::Panel => "Panel",
            AccessibleRole::Filler => "Filler",
            AccessibleRole::Label => "Label",
            AccessibleRole::Text => "Text",
            AccessibleRole::PasswordText => "PasswordText",
            AccessibleRole::PushButton => "PushButton",
            AccessibleRole::CheckBox => "CheckBox",
            AccessibleRole::ComboBox => "ComboBox",
            AccessibleRole::List => "List",
            AccessibleRole::ListItem => "ListItem",
            AccessibleRole::Separator => "Separator",
            AccessibleRole::Unknown => "Unknown",
        }
    }

    /// Whether `self` satisfies a search for `wanted`.
    pub fn matches(self, wanted: AccessibleRole) -> bool {
        wanted == AccessibleRole::AnyRole || self == wanted
    }
}

impl fmt::Display for AccessibleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State flags reported for an accessible node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessibleState {
    Active,
    Editable,
    Enabled,
    Focusable,
    Focused,
    Modal,
    Sensitive,
    SelectableText,
    Showing,
    Visible,
}
