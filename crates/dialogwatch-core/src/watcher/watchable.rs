//! Objects that handlers and expectations can watch.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

/// A transient browser-owned UI object, such as a dialog.
pub trait Watchable: Any + Send + Sync {
    /// Whether the underlying object is still on screen.
    fn exists(&self) -> bool;

    /// Release native resources. Idempotent.
    fn dispose(&self);
}

/// Type-erased watchable tagged with its concrete type.
///
/// Handlers and expectations are keyed by the concrete type, so dispatch
/// looks the type up here and downcasts to reach the typed object.
#[derive(Clone)]
pub struct WatchedObject {
    type_id: TypeId,
    type_name: &'static str,
    object: Arc<dyn Any + Send + Sync>,
    watchable: Arc<dyn Watchable>,
}

impl WatchedObject {
    pub fn new<T: Watchable>(object: T) -> Self {
        let object = Arc::new(object);
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            object: Arc::clone(&object) as Arc<dyn Any + Send + Sync>,
            watchable: object,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Watchable>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// The typed object, if it is a `T`.
    pub fn downcast<T: Watchable>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.object).downcast::<T>().ok()
    }

    pub fn exists(&self) -> bool {
        self.watchable.exists()
    }

    pub fn dispose(&self) {
        self.watchable.dispose();
    }
}

impl fmt::Debug for WatchedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchedObject")
            .field("type", &self.type_name)
            .field("exists", &self.exists())
            .finish()
    }
}
