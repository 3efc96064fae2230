//! Dialog vocabulary: kinds, property and action identifiers, browsers.
//!
//! Identifiers are opaque strings shared between classifiers and dialog
//! wrappers. They never cross a process boundary, but the string forms are
//! kept stable so logs and user registrations stay meaningful.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DialogError;
use crate::window::EnumerationMethod;

/// Stable identifier of a recognized native dialog shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogKind {
    /// JavaScript `alert()`.
    Alert,
    /// JavaScript `confirm()`.
    Confirm,
    /// HTTP authentication prompt.
    Logon,
    /// Firefox "restore previous session" prompt.
    FirefoxRestoreSession,
    VbScriptOkOnly,
    VbScriptOkCancel,
    VbScriptAbortRetryIgnore,
    VbScriptYesNoCancel,
    VbScriptYesNo,
    VbScriptRetryCancel,
}

impl DialogKind {
    /// Every kind, in declaration order.
    pub const ALL: [DialogKind; 10] = [
        DialogKind::Alert,
        DialogKind::Confirm,
        DialogKind::Logon,
        DialogKind::FirefoxRestoreSession,
        DialogKind::VbScriptOkOnly,
        DialogKind::VbScriptOkCancel,
        DialogKind::VbScriptAbortRetryIgnore,
        DialogKind::VbScriptYesNoCancel,
        DialogKind::VbScriptYesNo,
        DialogKind::VbScriptRetryCancel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DialogKind::Alert => "AlertDialog",
            DialogKind::Confirm => "ConfirmDialog",
            DialogKind::Logon => "LogonDialog",
            DialogKind::FirefoxRestoreSession => "FireFoxRestoreSessionDialog",
            DialogKind::VbScriptOkOnly => "VBScriptOKOnlyDialog",
            DialogKind::VbScriptOkCancel => "VBScriptOKCancelDialog",
            DialogKind::VbScriptAbortRetryIgnore => "VBScriptAbortRetryIgnoreDialog",
            DialogKind::VbScriptYesNoCancel => "VBScriptYesNoCancelDialog",
            DialogKind::VbScriptYesNo => "VBScriptYesNoDialog",
            DialogKind::VbScriptRetryCancel => "VBScriptRetryCancelDialog",
        }
    }

    /// Whether this kind belongs to the VBScript `MsgBox` family.
    pub fn is_vbscript(self) -> bool {
        matches!(
            self,
            DialogKind::VbScriptOkOnly
                | DialogKind::VbScriptOkCancel
                | DialogKind::VbScriptAbortRetryIgnore
                | DialogKind::VbScriptYesNoCancel
                | DialogKind::VbScriptYesNo
                | DialogKind::VbScriptRetryCancel
        )
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialogKind {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DialogKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DialogError::InvalidArgument(format!("Unknown dialog kind '{}'", s)))
    }
}

/// Readable property of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogProperty {
    Title,
    Message,
    UserName,
    Password,
}

impl DialogProperty {
    pub fn as_str(self) -> &'static str {
        match self {
            DialogProperty::Title => "TitleProperty",
            DialogProperty::Message => "MessageProperty",
            DialogProperty::UserName => "UserName",
            DialogProperty::Password => "Password",
        }
    }
}

impl fmt::Display for DialogProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialogProperty {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TitleProperty" => Ok(DialogProperty::Title),
            "MessageProperty" => Ok(DialogProperty::Message),
            "UserName" => Ok(DialogProperty::UserName),
            "Password" => Ok(DialogProperty::Password),
            other => Err(DialogError::InvalidArgument(format!(
                "Invalid property name '{}'",
                other
            ))),
        }
    }
}

/// Action that can be performed on a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogAction {
    ClickOk,
    ClickCancel,
    ClickYes,
    ClickNo,
    ClickAbort,
    ClickRetry,
    ClickIgnore,
    ClickRestoreSession,
    ClickStartNewSession,
    SetUserName,
    SetPassword,
}

impl DialogAction {
    pub fn as_str(self) -> &'static str {
        match self {
            DialogAction::ClickOk => "ClickOk",
            DialogAction::ClickCancel => "ClickCancel",
            DialogAction::ClickYes => "ClickYes",
            DialogAction::ClickNo => "ClickNo",
            DialogAction::ClickAbort => "ClickAbort",
            DialogAction::ClickRetry => "ClickRetry",
            DialogAction::ClickIgnore => "ClickIgnore",
            DialogAction::ClickRestoreSession => "ClickRestoreSession",
            DialogAction::ClickStartNewSession => "ClickStartNewSession",
            DialogAction::SetUserName => "SetUserName",
            DialogAction::SetPassword => "SetPassword",
        }
    }

    /// Whether the action takes a text argument.
    pub fn takes_text(self) -> bool {
        matches!(self, DialogAction::SetUserName | DialogAction::SetPassword)
    }
}

impl fmt::Display for DialogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialogAction {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s {
            "ClickOk" => DialogAction::ClickOk,
            "ClickCancel" => DialogAction::ClickCancel,
            "ClickYes" => DialogAction::ClickYes,
            "ClickNo" => DialogAction::ClickNo,
            "ClickAbort" => DialogAction::ClickAbort,
            "ClickRetry" => DialogAction::ClickRetry,
            "ClickIgnore" => DialogAction::ClickIgnore,
            "ClickRestoreSession" => DialogAction::ClickRestoreSession,
            "ClickStartNewSession" => DialogAction::ClickStartNewSession,
            "SetUserName" => DialogAction::SetUserName,
            "SetPassword" => DialogAction::SetPassword,
            other => {
                return Err(DialogError::InvalidArgument(format!(
                    "Invalid action name '{}'",
                    other
                )));
            }
        };
        Ok(action)
    }
}

/// Browser whose dialogs are being watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrowserKind {
    #[serde(alias = "ie")]
    InternetExplorer,
    Firefox,
}

impl BrowserKind {
    /// Class name of the browser's top-level frame window.
    pub fn main_window_class(self) -> &'static str {
        match self {
            BrowserKind::InternetExplorer => "IEFrame",
            BrowserKind::Firefox => "MozillaWindowClass",
        }
    }

    /// How the children of this browser's dialogs are discovered.
    ///
    /// Internet Explorer dialogs are plain Win32 dialogs; Firefox draws its
    /// own controls, which only the accessibility tree exposes.
    pub fn child_enumeration(self) -> EnumerationMethod {
        match self {
            BrowserKind::InternetExplorer => EnumerationMethod::WindowManagementApi,
            BrowserKind::Firefox => EnumerationMethod::AssistiveTechnologyApi,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BrowserKind::InternetExplorer => "Internet Explorer",
            BrowserKind::Firefox => "Firefox",
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BrowserKind {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ie" | "internet-explorer" | "internetexplorer" => Ok(BrowserKind::InternetExplorer),
            "firefox" | "ff" => Ok(BrowserKind::Firefox),
            other => Err(DialogError::InvalidArgument(format!(
                "Unknown browser '{}'",
                other
            ))),
        }
    }
}

/// Platform family; several control ids differ between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    /// Linux and macOS (X11 + AT-SPI).
    UnixLike,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::UnixLike
        }
    }

    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }
}

#[cfg(test)]
#[path = "dialog_tests.rs"]
mod tests;
