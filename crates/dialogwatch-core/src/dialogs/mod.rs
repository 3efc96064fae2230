//! Typed dialog wrappers.
//!
//! Each wrapper is a facade over a [`NativeDialog`] of one [`DialogKind`]
//! that turns generic property reads and actions into named methods.
//! Shared vocabulary lives in traits: [`MessageDialog`] for title and
//! message, [`VbScriptMsgBox`] for the click helper every VBScript message
//! box uses.

use std::sync::Arc;

use tracing::info;

use dialogwatch_protocols::{DialogAction, DialogError, DialogKind, DialogProperty, WindowHandle};

use crate::dialog::NativeDialog;
use crate::watcher::Watchable;

/// Declares a wrapper struct owning its native dialog.
macro_rules! dialog_wrapper {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            native: std::sync::Arc<$crate::dialog::NativeDialog>,
        }

        impl $crate::watcher::Watchable for $name {
            fn exists(&self) -> bool {
                self.native.exists()
            }

            fn dispose(&self) {
                self.native.dispose();
            }
        }

        impl $crate::dialogs::Dialog for $name {
            const KIND: dialogwatch_protocols::DialogKind = $kind;

            fn from_native(native: std::sync::Arc<$crate::dialog::NativeDialog>) -> Self {
                Self { native }
            }

            fn native_dialog(&self) -> &std::sync::Arc<$crate::dialog::NativeDialog> {
                &self.native
            }
        }
    };
}

pub(crate) use dialog_wrapper;

mod javascript;
mod logon;
mod restore_session;
mod vbscript;

pub use javascript::{AlertDialog, ConfirmDialog};
pub use logon::LogonDialog;
pub use restore_session::RestoreSessionDialog;
pub use vbscript::{
    VbScriptAbortRetryIgnoreDialog, VbScriptOkOnlyDialog, VbScriptRetryCancelDialog,
    VbScriptYesNoCancelDialog, VbScriptYesNoDialog,
};

/// A typed wrapper registered for one dialog kind.
pub trait Dialog: Watchable + Sized {
    /// Kind this wrapper is registered under.
    const KIND: DialogKind;

    fn from_native(native: Arc<NativeDialog>) -> Self;

    fn native_dialog(&self) -> &Arc<NativeDialog>;

    fn handle(&self) -> WindowHandle {
        self.native_dialog().handle()
    }

    /// Close the dialog without answering it and wait for it to go away.
    fn do_default_action(&self) -> Result<(), DialogError> {
        self.native_dialog().dismiss()
    }
}

/// Dialogs with a title and a message text.
pub trait MessageDialog: Dialog {
    fn title(&self) -> Result<String, DialogError> {
        self.native_dialog().property(DialogProperty::Title)
    }

    fn message(&self) -> Result<String, DialogError> {
        self.native_dialog().property(DialogProperty::Message)
    }
}

/// VBScript `MsgBox` variants.
pub trait VbScriptMsgBox: MessageDialog {
    /// Press the button behind `action` and wait for the box to close.
    fn click_button(&self, action: DialogAction, description: &str) -> Result<(), DialogError> {
        info!("Clicking {} button on {} dialog", description, Self::KIND);
        self.native_dialog().perform(action, &[])
    }
}

#[cfg(test)]
#[path = "dialogs_tests.rs"]
mod tests;
