//! Dialog wrapper factory.
//!
//! Maps each dialog kind to the constructor of its typed wrapper. Kinds are
//! registered explicitly; a second registration for the same kind fails at
//! registration time.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use dialogwatch_protocols::{DialogError, DialogKind};

use crate::dialog::NativeDialog;
use crate::dialogs::{
    AlertDialog, ConfirmDialog, Dialog, LogonDialog, RestoreSessionDialog,
    VbScriptAbortRetryIgnoreDialog, VbScriptOkOnlyDialog, VbScriptRetryCancelDialog,
    VbScriptYesNoCancelDialog, VbScriptYesNoDialog,
};
use crate::watcher::WatchedObject;

type Constructor = Arc<dyn Fn(Arc<NativeDialog>) -> WatchedObject + Send + Sync>;

struct Registration {
    type_name: &'static str,
    construct: Constructor,
}

/// Kind-keyed registry of wrapper constructors.
#[derive(Default)]
pub struct DialogFactory {
    registrations: DashMap<DialogKind, Registration>,
}

impl DialogFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory with every built-in wrapper registered.
    pub fn builtin() -> Result<Self, DialogError> {
        let factory = Self::new();
        factory.register::<AlertDialog>()?;
        factory.register::<ConfirmDialog>()?;
        factory.register::<LogonDialog>()?;
        factory.register::<RestoreSessionDialog>()?;
        factory.register::<VbScriptOkOnlyDialog>()?;
        factory.register::<VbScriptYesNoDialog>()?;
        factory.register::<VbScriptYesNoCancelDialog>()?;
        factory.register::<VbScriptRetryCancelDialog>()?;
        factory.register::<VbScriptAbortRetryIgnoreDialog>()?;
        Ok(factory)
    }

    /// Register wrapper `D` under its kind.
    pub fn register<D: Dialog>(&self) -> Result<(), DialogError> {
        match self.registrations.entry(D::KIND) {
            Entry::Occupied(existing) => Err(DialogError::Configuration(format!(
                "Dialog kind {} is already registered to {}; cannot register {}",
                D::KIND,
                existing.get().type_name,
                type_name::<D>()
            ))),
            Entry::Vacant(slot) => {
                debug!("Registered {} for {} dialogs", type_name::<D>(), D::KIND);
                slot.insert(Registration {
                    type_name: type_name::<D>(),
                    construct: Arc::new(|native: Arc<NativeDialog>| WatchedObject::new(D::from_native(native))),
                });
                Ok(())
            }
        }
    }

    /// Wrap `native` in the wrapper registered for its kind.
    ///
    /// `None` means the kind has no wrapper; callers report it as unhandleable.
    pub fn create_dialog(&self, native: Arc<NativeDialog>) -> Option<WatchedObject> {
        let construct = Arc::clone(&self.registrations.get(&native.kind())?.construct);
        Some(construct(native))
    }

    pub fn is_registered(&self, kind: DialogKind) -> bool {
        self.registrations.contains_key(&kind)
    }

    /// Registered kinds in declaration order.
    pub fn kinds(&self) -> Vec<DialogKind> {
        DialogKind::ALL
            .into_iter()
            .filter(|kind| self.is_registered(*kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl fmt::Debug for DialogFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogFactory")
            .field("kinds", &self.kinds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dialogwatch_desktop::{SimulatedDesktop, WindowSpec};
    use dialogwatch_protocols::{EnumerationMethod, Platform};

    use super::*;
    use crate::classifier::{IeJavaScriptClassifier, IeVbScriptClassifier};
    use crate::dialog::DialogClassifier;
    use crate::window::WindowSystem;

    fn native(title: &str, buttons: &[i32], classifier: Arc<dyn DialogClassifier>) -> Arc<NativeDialog> {
        let desktop = Arc::new(SimulatedDesktop::new());
        let system = Arc::new(WindowSystem::new(desktop.clone(), Platform::Windows));
        let dialog = desktop.add_window(WindowSpec::new("#32770", title));
        for id in buttons {
            desktop.add_child(dialog, WindowSpec::new("Button", "").control_id(*id));
        }
        desktop.add_child(dialog, WindowSpec::new("Static", "Hello").control_id(0xFFFF));
        let window = system.window(dialog, EnumerationMethod::WindowManagementApi);
        let kind = classifier.classify(window.as_ref()).unwrap();
        Arc::new(NativeDialog::new(kind, classifier, window, Duration::from_secs(1)))
    }

    #[test]
    fn test_builtin_registers_every_wrapped_kind() {
        let factory = DialogFactory::builtin().unwrap();
        assert_eq!(factory.len(), 9);
        assert!(!factory.is_registered(DialogKind::VbScriptOkCancel));
        assert_eq!(factory.kinds().first(), Some(&DialogKind::Alert));
        assert!(!factory.kinds().contains(&DialogKind::VbScriptOkCancel));
    }

    #[test]
    fn test_duplicate_registration_is_configuration_error() {
        let factory = DialogFactory::new();
        factory.register::<AlertDialog>().unwrap();
        let err = factory.register::<AlertDialog>().unwrap_err();
        assert!(matches!(err, DialogError::Configuration(_)));
        assert!(err.to_string().contains("AlertDialog"));
        assert_eq!(factory.len(), 1);
    }

    #[test]
    fn test_create_dialog_uses_registered_wrapper() {
        let factory = DialogFactory::builtin().unwrap();
        let created = factory
            .create_dialog(native("Message from webpage", &[1, 2], Arc::new(IeJavaScriptClassifier)))
            .unwrap();
        assert!(created.is::<ConfirmDialog>());
        let confirm = created.downcast::<ConfirmDialog>().unwrap();
        assert_eq!(confirm.native_dialog().kind(), DialogKind::Confirm);
        assert!(created.downcast::<AlertDialog>().is_none());
    }

    #[test]
    fn test_create_dialog_without_wrapper_returns_none() {
        let factory = DialogFactory::builtin().unwrap();
        let ok_cancel = native("VBScript", &[1, 2], Arc::new(IeVbScriptClassifier));
        assert_eq!(ok_cancel.kind(), DialogKind::VbScriptOkCancel);
        assert!(factory.create_dialog(ok_cancel).is_none());

        let empty = DialogFactory::new();
        assert!(empty.is_empty());
        assert!(
            empty
                .create_dialog(native("Message from webpage", &[2], Arc::new(IeJavaScriptClassifier)))
                .is_none()
        );
    }
}
