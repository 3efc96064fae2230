use super::*;

#[test]
fn test_kind_strings_are_stable() {
    assert_eq!(DialogKind::Alert.as_str(), "AlertDialog");
    assert_eq!(DialogKind::Logon.as_str(), "LogonDialog");
    assert_eq!(DialogKind::VbScriptYesNo.as_str(), "VBScriptYesNoDialog");
    assert_eq!(
        DialogKind::VbScriptAbortRetryIgnore.as_str(),
        "VBScriptAbortRetryIgnoreDialog"
    );
    assert_eq!(DialogKind::VbScriptOkCancel.as_str(), "VBScriptOKCancelDialog");
}

#[test]
fn test_kind_parse_every_variant() {
    for kind in DialogKind::ALL {
        let parsed: DialogKind = kind.as_str().parse().unwrap();
        assert_eq!(parsed, kind);
    }
}

#[test]
fn test_kind_parse_unknown() {
    let err = "NotADialog".parse::<DialogKind>().unwrap_err();
    assert!(matches!(err, DialogError::InvalidArgument(_)));
    assert!(err.to_string().contains("NotADialog"));
}

#[test]
fn test_vbscript_family() {
    assert!(DialogKind::VbScriptRetryCancel.is_vbscript());
    assert!(DialogKind::VbScriptOkCancel.is_vbscript());
    assert!(!DialogKind::Alert.is_vbscript());
    assert!(!DialogKind::Logon.is_vbscript());
}

#[test]
fn test_property_parse() {
    assert_eq!("TitleProperty".parse::<DialogProperty>().unwrap(), DialogProperty::Title);
    assert_eq!("Password".parse::<DialogProperty>().unwrap(), DialogProperty::Password);
    let err = "Color".parse::<DialogProperty>().unwrap_err();
    assert!(err.to_string().contains("Invalid property name 'Color'"));
}

#[test]
fn test_action_parse() {
    assert_eq!("ClickOk".parse::<DialogAction>().unwrap(), DialogAction::ClickOk);
    assert_eq!(
        "ClickStartNewSession".parse::<DialogAction>().unwrap(),
        DialogAction::ClickStartNewSession
    );
    let err = "ClickMaybe".parse::<DialogAction>().unwrap_err();
    assert!(matches!(err, DialogError::InvalidArgument(_)));
}

#[test]
fn test_action_takes_text() {
    assert!(DialogAction::SetUserName.takes_text());
    assert!(DialogAction::SetPassword.takes_text());
    assert!(!DialogAction::ClickOk.takes_text());
}

#[test]
fn test_browser_main_window_class() {
    assert_eq!(BrowserKind::InternetExplorer.main_window_class(), "IEFrame");
    assert_eq!(BrowserKind::Firefox.main_window_class(), "MozillaWindowClass");
}

#[test]
fn test_browser_child_enumeration() {
    assert!(BrowserKind::InternetExplorer.child_enumeration().is_native());
    assert!(!BrowserKind::Firefox.child_enumeration().is_native());
}

#[test]
fn test_browser_parse() {
    assert_eq!("ie".parse::<BrowserKind>().unwrap(), BrowserKind::InternetExplorer);
    assert_eq!("Firefox".parse::<BrowserKind>().unwrap(), BrowserKind::Firefox);
    assert!("netscape".parse::<BrowserKind>().is_err());
}

#[test]
fn test_browser_serde_kebab_case() {
    let json = serde_json::to_string(&BrowserKind::InternetExplorer).unwrap();
    assert_eq!(json, "\"internet-explorer\"");
    let parsed: BrowserKind = serde_json::from_str("\"ie\"").unwrap();
    assert_eq!(parsed, BrowserKind::InternetExplorer);
}

#[test]
fn test_platform_current_matches_cfg() {
    assert_eq!(Platform::current().is_windows(), cfg!(windows));
}
