//! Firefox "restore previous session" prompt.

use dialogwatch_protocols::{DialogAction, DialogError, DialogKind};

use super::{Dialog, dialog_wrapper};

dialog_wrapper!(RestoreSessionDialog, DialogKind::FirefoxRestoreSession);

impl RestoreSessionDialog {
    pub fn click_restore_session(&self) -> Result<(), DialogError> {
        self.native_dialog()
            .perform(DialogAction::ClickRestoreSession, &[])
    }

    pub fn click_start_new_session(&self) -> Result<(), DialogError> {
        self.native_dialog()
            .perform(DialogAction::ClickStartNewSession, &[])
    }
}
