//! Type-erased value payloads
//!
//! Each key in the trie stores a value of a caller-chosen type. The type is
//! erased at the node level and recovered by a checked downcast against the
//! type requested at the call site; a mismatch reads as absence.

use std::any::{Any, TypeId};
use std::sync::Arc;

/// A shared, type-tagged payload.
///
/// The payload sits behind an `Arc` so every snapshot whose nodes reference
/// it co-owns it: logically removing a key from a newer snapshot never
/// invalidates the value seen through an older one.
#[derive(Clone, Debug)]
pub(crate) struct AnyValue {
    type_id: TypeId,
    value: Arc<dyn Any + Send + Sync>,
}

impl AnyValue {
    pub(crate) fn new<T: Any + Send + Sync>(value: T) -> Self {
        AnyValue {
            type_id: TypeId::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// Borrow the payload as `T`, or `None` when the stored type differs.
    pub(crate) fn downcast_ref<T: Any>(&self) -> Option<&T> {
        if !self.is_type::<T>() {
            return None;
        }
        self.value.downcast_ref::<T>()
    }

    /// Clone out a shared handle on the payload as `T`.
    pub(crate) fn shared<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        if !self.is_type::<T>() {
            return None;
        }
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    fn is_type<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}
