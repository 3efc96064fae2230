//! Internet Explorer dialogs.
//!
//! IE raises plain Win32 dialogs, so children are native windows with Win32
//! class names and control ids.

use tracing::debug;

use dialogwatch_protocols::{
    AccessibleRole, DialogAction, DialogError, DialogKind, DialogProperty, EnumerationMethod,
    Platform,
};

use super::{children_of_class, control_text, item_ids, press_button, text_argument};
use crate::dialog::{ActionEffect, DialogClassifier, unsupported_action, unsupported_property};
use crate::window::{Window, class_for_role};

/// Control id of the message label in Win32 message boxes.
const MESSAGE_LABEL_ID: i32 = 0xFFFF;

/// Win32 dialog button ids (IDOK, IDCANCEL, IDABORT, IDRETRY, IDIGNORE, IDYES, IDNO).
const ID_OK: i32 = 1;
const ID_CANCEL: i32 = 2;
const ID_ABORT: i32 = 3;
const ID_RETRY: i32 = 4;
const ID_IGNORE: i32 = 5;
const ID_YES: i32 = 6;
const ID_NO: i32 = 7;

const SYS_CREDENTIAL_CLASS: &str = "SysCredential";
const USER_NAME_EDIT_ID: i32 = 0x3EB;
const PASSWORD_EDIT_ID: i32 = 0x3ED;

fn native_class(role: AccessibleRole) -> &'static str {
    class_for_role(Platform::Windows, role, EnumerationMethod::WindowManagementApi)
}

fn button_class() -> &'static str {
    native_class(AccessibleRole::PushButton)
}

/// Button ids and number of message labels of a message box.
fn message_box_shape(candidate: &dyn Window) -> (Vec<i32>, usize) {
    let buttons = children_of_class(candidate, button_class());
    let labels = candidate.child_windows(&|w| {
        w.class_name() == native_class(AccessibleRole::Label) && w.item_id() == MESSAGE_LABEL_ID
    });
    (item_ids(&buttons), labels.len())
}

fn is_vbscript_title(title: &str) -> bool {
    title.to_lowercase().contains("vbscript")
}

/// Title and message properties shared by every IE message box.
fn message_box_property(
    kind: DialogKind,
    window: &dyn Window,
    property: DialogProperty,
) -> Result<String, DialogError> {
    match property {
        DialogProperty::Title => Ok(window.text()),
        DialogProperty::Message => control_text(
            window,
            native_class(AccessibleRole::Label),
            Some(MESSAGE_LABEL_ID),
        ),
        other => Err(unsupported_property(kind, other)),
    }
}

/// JavaScript `alert()` and `confirm()`.
#[derive(Debug, Default)]
pub struct IeJavaScriptClassifier;

impl DialogClassifier for IeJavaScriptClassifier {
    fn name(&self) -> &'static str {
        "ie-javascript"
    }

    fn classify(&self, candidate: &dyn Window) -> Option<DialogKind> {
        if is_vbscript_title(&candidate.text()) {
            return None;
        }
        let (buttons, labels) = message_box_shape(candidate);
        debug!(?buttons, labels, "Inspecting JavaScript dialog candidate {}", candidate.handle());
        match (buttons.as_slice(), labels) {
            ([ID_CANCEL], 1) => Some(DialogKind::Alert),
            ([ID_OK, ID_CANCEL], 1) => Some(DialogKind::Confirm),
            _ => None,
        }
    }

    fn get_property(
        &self,
        kind: DialogKind,
        window: &dyn Window,
        property: DialogProperty,
    ) -> Result<String, DialogError> {
        message_box_property(kind, window, property)
    }

    fn perform_action(
        &self,
        kind: DialogKind,
        window: &dyn Window,
        action: DialogAction,
        _args: &[String],
    ) -> Result<ActionEffect, DialogError> {
        // The alert's single OK button carries IDCANCEL.
        let button = match (kind, action) {
            (DialogKind::Alert, DialogAction::ClickOk) => ID_CANCEL,
            (DialogKind::Confirm, DialogAction::ClickOk) => ID_OK,
            (DialogKind::Alert | DialogKind::Confirm, DialogAction::ClickCancel) => ID_CANCEL,
            _ => return Err(unsupported_action(kind, action)),
        };
        press_button(window, button_class(), button)
    }
}

/// VBScript `MsgBox` variants.
///
/// The button count selects the family and the ordered button ids select
/// the variant. Two-button boxes without a known id pair fall back to
/// OK/Cancel; three-button boxes to Yes/No/Cancel.
#[derive(Debug, Default)]
pub struct IeVbScriptClassifier;

impl IeVbScriptClassifier {
    fn kind_for_buttons(buttons: &[i32]) -> Option<DialogKind> {
        match buttons {
            [ID_CANCEL] => Some(DialogKind::VbScriptOkOnly),
            [ID_RETRY, ID_CANCEL] => Some(DialogKind::VbScriptRetryCancel),
            [ID_YES, ID_NO] => Some(DialogKind::VbScriptYesNo),
            [_, _] => Some(DialogKind::VbScriptOkCancel),
            [ID_ABORT, ID_RETRY, ID_IGNORE] => Some(DialogKind::VbScriptAbortRetryIgnore),
            [_, _, _] => Some(DialogKind::VbScriptYesNoCancel),
            _ => None,
        }
    }

    fn button_for(kind: DialogKind, action: DialogAction) -> Option<i32> {
        use DialogAction::*;
        use DialogKind::*;
        match (kind, action) {
            (VbScriptOkOnly, ClickOk) => Some(ID_CANCEL),
            (VbScriptOkCancel, ClickOk) => Some(ID_OK),
            (VbScriptOkCancel, ClickCancel) => Some(ID_CANCEL),
            (VbScriptYesNo, ClickYes) => Some(ID_YES),
            (VbScriptYesNo, ClickNo) => Some(ID_NO),
            (VbScriptRetryCancel, ClickRetry) => Some(ID_RETRY),
            (VbScriptRetryCancel, ClickCancel) => Some(ID_CANCEL),
            (VbScriptYesNoCancel, ClickYes) => Some(ID_YES),
            (VbScriptYesNoCancel, ClickNo) => Some(ID_NO),
            (VbScriptYesNoCancel, ClickCancel) => Some(ID_CANCEL),
            (VbScriptAbortRetryIgnore, ClickAbort) => Some(ID_ABORT),
            (VbScriptAbortRetryIgnore, ClickRetry) => Some(ID_RETRY),
            (VbScriptAbortRetryIgnore, ClickIgnore) => Some(ID_IGNORE),
            _ => None,
        }
    }
}

impl DialogClassifier for IeVbScriptClassifier {
    fn name(&self) -> &'static str {
        "ie-vbscript"
    }

    fn classify(&self, candidate: &dyn Window) -> Option<DialogKind> {
        if !is_vbscript_title(&candidate.text()) {
            return None;
        }
        let (buttons, labels) = message_box_shape(candidate);
        debug!(?buttons, labels, "Inspecting VBScript dialog candidate {}", candidate.handle());
        if labels != 1 {
            return None;
        }
        Self::kind_for_buttons(&buttons)
    }

    fn get_property(
        &self,
        kind: DialogKind,
        window: &dyn Window,
        property: DialogProperty,
    ) -> Result<String, DialogError> {
        message_box_property(kind, window, property)
    }

    fn perform_action(
        &self,
        kind: DialogKind,
        window: &dyn Window,
        action: DialogAction,
        _args: &[String],
    ) -> Result<ActionEffect, DialogError> {
        let button = Self::button_for(kind, action).ok_or_else(|| unsupported_action(kind, action))?;
        press_button(window, button_class(), button)
    }
}

/// Windows credential prompt for HTTP authentication.
#[derive(Debug, Default)]
pub struct IeLogonClassifier;

impl IeLogonClassifier {
    /// The credential sub-window hosting the user name and password edits.
    fn credential_window(window: &dyn Window) -> Option<Box<dyn Window>> {
        let mut found = children_of_class(window, SYS_CREDENTIAL_CLASS);
        if found.is_empty() {
            None
        } else {
            Some(found.swap_remove(0))
        }
    }

    fn edit_id(property: DialogProperty) -> Option<i32> {
        match property {
            DialogProperty::UserName => Some(USER_NAME_EDIT_ID),
            DialogProperty::Password => Some(PASSWORD_EDIT_ID),
            _ => None,
        }
    }

    fn credential_edit(window: &dyn Window, edit_id: i32) -> Result<Box<dyn Window>, DialogError> {
        let credentials = Self::credential_window(window)
            .ok_or_else(|| DialogError::ControlNotFound(SYS_CREDENTIAL_CLASS.to_string()))?;
        let edit_class = native_class(AccessibleRole::Text);
        let mut edits =
            credentials.child_windows(&|w| w.class_name() == edit_class && w.item_id() == edit_id);
        if edits.is_empty() {
            return Err(DialogError::ControlNotFound(format!(
                "{} with item id {}",
                edit_class, edit_id
            )));
        }
        Ok(edits.swap_remove(0))
    }
}

impl DialogClassifier for IeLogonClassifier {
    fn name(&self) -> &'static str {
        "ie-logon"
    }

    fn classify(&self, candidate: &dyn Window) -> Option<DialogKind> {
        Self::credential_window(candidate).map(|_| DialogKind::Logon)
    }

    fn get_property(
        &self,
        kind: DialogKind,
        window: &dyn Window,
        property: DialogProperty,
    ) -> Result<String, DialogError> {
        let edit_id = Self::edit_id(property).ok_or_else(|| unsupported_property(kind, property))?;
        Ok(Self::credential_edit(window, edit_id)?.text())
    }

    fn perform_action(
        &self,
        kind: DialogKind,
        window: &dyn Window,
        action: DialogAction,
        args: &[String],
    ) -> Result<ActionEffect, DialogError> {
        let edit_id = match action {
            DialogAction::ClickOk => return press_button(window, button_class(), ID_OK),
            DialogAction::ClickCancel => return press_button(window, button_class(), ID_CANCEL),
            DialogAction::SetUserName => USER_NAME_EDIT_ID,
            DialogAction::SetPassword => PASSWORD_EDIT_ID,
            _ => return Err(unsupported_action(kind, action)),
        };
        let text = text_argument(kind, action, args)?;
        let edit = Self::credential_edit(window, edit_id)?;
        edit.set_focus();
        edit.send_keystrokes(text)?;
        Ok(ActionEffect::None)
    }
}
