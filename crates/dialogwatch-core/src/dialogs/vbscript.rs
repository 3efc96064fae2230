//! VBScript `MsgBox` variants.
//!
//! `MsgBox` with `vbOKCancel` has no wrapper; the manager still raises it
//! and the watcher reports it as an unhandleable kind.

use dialogwatch_protocols::{DialogAction, DialogError, DialogKind};

use super::{MessageDialog, VbScriptMsgBox, dialog_wrapper};

dialog_wrapper!(VbScriptOkOnlyDialog, DialogKind::VbScriptOkOnly);

impl MessageDialog for VbScriptOkOnlyDialog {}
impl VbScriptMsgBox for VbScriptOkOnlyDialog {}

impl VbScriptOkOnlyDialog {
    pub fn click_ok(&self) -> Result<(), DialogError> {
        self.click_button(DialogAction::ClickOk, "OK")
    }
}

dialog_wrapper!(VbScriptYesNoDialog, DialogKind::VbScriptYesNo);

impl MessageDialog for VbScriptYesNoDialog {}
impl VbScriptMsgBox for VbScriptYesNoDialog {}

impl VbScriptYesNoDialog {
    pub fn click_yes(&self) -> Result<(), DialogError> {
        self.click_button(DialogAction::ClickYes, "Yes")
    }

    pub fn click_no(&self) -> Result<(), DialogError> {
        self.click_button(DialogAction::ClickNo, "No")
    }
}

dialog_wrapper!(VbScriptYesNoCancelDialog, DialogKind::VbScriptYesNoCancel);

impl MessageDialog for VbScriptYesNoCancelDialog {}
impl VbScriptMsgBox for VbScriptYesNoCancelDialog {}

impl VbScriptYesNoCancelDialog {
    pub fn click_yes(&self) -> Result<(), DialogError> {
        self.click_button(DialogAction::ClickYes, "Yes")
    }

    pub fn click_no(&self) -> Result<(), DialogError> {
        self.click_button(DialogAction::ClickNo, "No")
    }

    pub fn click_cancel(&self) -> Result<(), DialogError> {
        self.click_button(DialogAction::ClickCancel, "Cancel")
    }
}

dialog_wrapper!(VbScriptRetryCancelDialog, DialogKind::VbScriptRetryCancel);

impl MessageDialog for VbScriptRetryCancelDialog {}
impl VbScriptMsgBox for VbScriptRetryCancelDialog {}

impl VbScriptRetryCancelDialog {
    pub fn click_retry(&self) -> Result<(), DialogError> {
        self.click_button(DialogAction::ClickRetry, "Retry")
    }

    pub fn click_cancel(&self) -> Result<(), DialogError> {
        self.click_button(DialogAction::ClickCancel, "Cancel")
    }
}

dialog_wrapper!(VbScriptAbortRetryIgnoreDialog, DialogKind::VbScriptAbortRetryIgnore);

impl MessageDialog for VbScriptAbortRetryIgnoreDialog {}
impl VbScriptMsgBox for VbScriptAbortRetryIgnoreDialog {}

impl VbScriptAbortRetryIgnoreDialog {
    pub fn click_abort(&self) -> Result<(), DialogError> {
        self.click_button(DialogAction::ClickAbort, "Abort")
    }

    pub fn click_retry(&self) -> Result<(), DialogError> {
        self.click_button(DialogAction::ClickRetry, "Retry")
    }

    pub fn click_ignore(&self) -> Result<(), DialogError> {
        self.click_button(DialogAction::ClickIgnore, "Ignore")
    }
}
