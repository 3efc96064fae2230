//! Firefox dialogs.
//!
//! Firefox draws its own dialog controls, so children come from the
//! accessibility tree: class names are role names and item ids are indices
//! in the dialog's visible accessible subtree. Those indices differ between
//! the Windows and Unix-like builds.

use tracing::debug;

use dialogwatch_protocols::{
    AccessibleRole, AccessibleState, DialogAction, DialogError, DialogKind, DialogProperty,
    EnumerationMethod, Platform,
};

use super::{children_of_class, control_text, item_ids, press_button, text_argument};
use crate::dialog::{ActionEffect, DialogClassifier, unsupported_action, unsupported_property};
use crate::window::{Window, class_for_role};

const RESTORE_SESSION_TITLE_PREFIX: &str = "Firefox - ";

fn accessible_class(platform: Platform, role: AccessibleRole) -> &'static str {
    class_for_role(platform, role, EnumerationMethod::AssistiveTechnologyApi)
}

/// JavaScript `alert()` and `confirm()`.
#[derive(Debug)]
pub struct FirefoxJavaScriptClassifier {
    platform: Platform,
    ok_button: i32,
    cancel_button: i32,
    message_role: AccessibleRole,
}

impl FirefoxJavaScriptClassifier {
    pub fn new(platform: Platform) -> Self {
        if platform.is_windows() {
            Self {
                platform,
                ok_button: 10,
                cancel_button: 11,
                message_role: AccessibleRole::Text,
            }
        } else {
            Self {
                platform,
                ok_button: 1,
                cancel_button: 2,
                message_role: AccessibleRole::Label,
            }
        }
    }

    fn button_class(&self) -> &'static str {
        accessible_class(self.platform, AccessibleRole::PushButton)
    }

    fn message_class(&self) -> &'static str {
        accessible_class(self.platform, self.message_role)
    }
}

impl DialogClassifier for FirefoxJavaScriptClassifier {
    fn name(&self) -> &'static str {
        "firefox-javascript"
    }

    fn classify(&self, candidate: &dyn Window) -> Option<DialogKind> {
        let buttons = item_ids(&children_of_class(candidate, self.button_class()));
        let labels = children_of_class(candidate, self.message_class()).len();
        debug!(?buttons, labels, "Inspecting JavaScript dialog candidate {}", candidate.handle());
        if labels != 1 {
            return None;
        }
        match buttons.as_slice() {
            [ok] if *ok == self.ok_button => Some(DialogKind::Alert),
            [ok, cancel] if *ok == self.ok_button && *cancel == self.cancel_button => {
                Some(DialogKind::Confirm)
            }
            _ => None,
        }
    }

    fn get_property(
        &self,
        kind: DialogKind,
        window: &dyn Window,
        property: DialogProperty,
    ) -> Result<String, DialogError> {
        match property {
            DialogProperty::Title => Ok(window.text()),
            DialogProperty::Message => control_text(window, self.message_class(), None),
            other => Err(unsupported_property(kind, other)),
        }
    }

    fn perform_action(
        &self,
        kind: DialogKind,
        window: &dyn Window,
        action: DialogAction,
        _args: &[String],
    ) -> Result<ActionEffect, DialogError> {
        let button = match (kind, action) {
            (_, DialogAction::ClickOk) => self.ok_button,
            (DialogKind::Confirm, DialogAction::ClickCancel) => self.cancel_button,
            _ => return Err(unsupported_action(kind, action)),
        };
        press_button(window, self.button_class(), button)
    }
}

/// HTTP authentication prompt.
#[derive(Debug)]
pub struct FirefoxLogonClassifier {
    platform: Platform,
    ok_button: i32,
    cancel_button: i32,
}

impl FirefoxLogonClassifier {
    pub fn new(platform: Platform) -> Self {
        let (ok_button, cancel_button) = if platform.is_windows() { (14, 15) } else { (1, 2) };
        Self {
            platform,
            ok_button,
            cancel_button,
        }
    }

    fn field_class(&self, property: DialogProperty) -> Option<&'static str> {
        match property {
            DialogProperty::UserName => Some(accessible_class(self.platform, AccessibleRole::Text)),
            DialogProperty::Password => Some(AccessibleRole::PasswordText.as_str()),
            _ => None,
        }
    }

    /// First input field of class `class`.
    fn input_field(window: &dyn Window, class: &str) -> Result<Box<dyn Window>, DialogError> {
        // Read-only realm text reports the same role as the input fields.
        let mut fields = window.child_windows(&|w| {
            w.class_name() == class && !w.states().contains(&AccessibleState::SelectableText)
        });
        if fields.is_empty() {
            return Err(DialogError::ControlNotFound(class.to_string()));
        }
        Ok(fields.swap_remove(0))
    }
}

impl DialogClassifier for FirefoxLogonClassifier {
    fn name(&self) -> &'static str {
        "firefox-logon"
    }

    fn classify(&self, candidate: &dyn Window) -> Option<DialogKind> {
        let password_fields = children_of_class(candidate, AccessibleRole::PasswordText.as_str());
        (!password_fields.is_empty()).then_some(DialogKind::Logon)
    }

    fn get_property(
        &self,
        kind: DialogKind,
        window: &dyn Window,
        property: DialogProperty,
    ) -> Result<String, DialogError> {
        let class = self.field_class(property).ok_or_else(|| unsupported_property(kind, property))?;
        Ok(Self::input_field(window, class)?.text())
    }

    fn perform_action(
        &self,
        kind: DialogKind,
        window: &dyn Window,
        action: DialogAction,
        args: &[String],
    ) -> Result<ActionEffect, DialogError> {
        let button_class = accessible_class(self.platform, AccessibleRole::PushButton);
        let property = match action {
            DialogAction::ClickOk => return press_button(window, button_class, self.ok_button),
            DialogAction::ClickCancel => {
                return press_button(window, button_class, self.cancel_button);
            }
            DialogAction::SetUserName => DialogProperty::UserName,
            DialogAction::SetPassword => DialogProperty::Password,
            _ => return Err(unsupported_action(kind, action)),
        };
        let text = text_argument(kind, action, args)?;
        let class = self.field_class(property).ok_or_else(|| unsupported_action(kind, action))?;
        Self::input_field(window, class)?.send_keystrokes(text)?;
        Ok(ActionEffect::None)
    }
}

/// "Restore previous session" prompt shown after a crash.
#[derive(Debug)]
pub struct FirefoxRestoreSessionClassifier {
    platform: Platform,
    restore_button: i32,
    new_session_button: i32,
}

impl FirefoxRestoreSessionClassifier {
    pub fn new(platform: Platform) -> Self {
        let (restore_button, new_session_button) =
            if platform.is_windows() { (10, 11) } else { (2, 1) };
        Self {
            platform,
            restore_button,
            new_session_button,
        }
    }
}

impl DialogClassifier for FirefoxRestoreSessionClassifier {
    fn name(&self) -> &'static str {
        "firefox-restore-session"
    }

    fn classify(&self, candidate: &dyn Window) -> Option<DialogKind> {
        if !candidate.text().starts_with(RESTORE_SESSION_TITLE_PREFIX) {
            return None;
        }
        let buttons =
            children_of_class(candidate, accessible_class(self.platform, AccessibleRole::PushButton));
        (buttons.len() == 2).then_some(DialogKind::FirefoxRestoreSession)
    }

    fn get_property(
        &self,
        kind: DialogKind,
        _window: &dyn Window,
        property: DialogProperty,
    ) -> Result<String, DialogError> {
        Err(unsupported_property(kind, property))
    }

    fn perform_action(
        &self,
        kind: DialogKind,
        window: &dyn Window,
        action: DialogAction,
        _args: &[String],
    ) -> Result<ActionEffect, DialogError> {
        let button = match action {
            DialogAction::ClickRestoreSession => self.restore_button,
            DialogAction::ClickStartNewSession => self.new_session_button,
            _ => return Err(unsupported_action(kind, action)),
        };
        press_button(
            window,
            accessible_class(self.platform, AccessibleRole::PushButton),
            button,
        )
    }
}
