//! JavaScript `alert()` and `confirm()`.

use dialogwatch_protocols::{DialogAction, DialogError, DialogKind};

use super::{Dialog, MessageDialog, dialog_wrapper};

dialog_wrapper!(
    /// JavaScript `alert()` box.
    AlertDialog,
    DialogKind::Alert
);

impl MessageDialog for AlertDialog {}

impl AlertDialog {
    pub fn click_ok(&self) -> Result<(), DialogError> {
        self.native_dialog().perform(DialogAction::ClickOk, &[])
    }
}

dialog_wrapper!(
    /// JavaScript `confirm()` box.
    ConfirmDialog,
    DialogKind::Confirm
);

impl MessageDialog for ConfirmDialog {}

impl ConfirmDialog {
    pub fn click_ok(&self) -> Result<(), DialogError> {
        self.native_dialog().perform(DialogAction::ClickOk, &[])
    }

    pub fn click_cancel(&self) -> Result<(), DialogError> {
        self.native_dialog().perform(DialogAction::ClickCancel, &[])
    }
}
