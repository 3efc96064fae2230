//! HTTP authentication prompt.

use dialogwatch_protocols::{DialogAction, DialogError, DialogKind, DialogProperty};

use super::{Dialog, dialog_wrapper};

dialog_wrapper!(
    /// Credential prompt with user name and password fields.
    LogonDialog,
    DialogKind::Logon
);

impl LogonDialog {
    pub fn user_name(&self) -> Result<String, DialogError> {
        self.native_dialog().property(DialogProperty::UserName)
    }

    pub fn password(&self) -> Result<String, DialogError> {
        self.native_dialog().property(DialogProperty::Password)
    }

    /// Type `user_name` into the user name field. Special characters are sent literally.
    pub fn set_user_name(&self, user_name: &str) -> Result<(), DialogError> {
        self.native_dialog()
            .perform(DialogAction::SetUserName, &[user_name.to_string()])
    }

    pub fn set_password(&self, password: &str) -> Result<(), DialogError> {
        self.native_dialog()
            .perform(DialogAction::SetPassword, &[password.to_string()])
    }

    pub fn click_ok(&self) -> Result<(), DialogError> {
        self.native_dialog().perform(DialogAction::ClickOk, &[])
    }

    pub fn click_cancel(&self) -> Result<(), DialogError> {
        self.native_dialog().perform(DialogAction::ClickCancel, &[])
    }

    /// Fill in both fields and confirm.
    pub fn log_on(&self, user_name: &str, password: &str) -> Result<(), DialogError> {
        self.set_user_name(user_name)?;
        self.set_password(password)?;
        self.click_ok()
    }
}
