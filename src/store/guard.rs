//! Read guards that pin a snapshot

use crate::trie::Trie;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A read-only handle on a value retrieved from a
/// [`TrieStore`](super::TrieStore).
///
/// The guard retains the snapshot the value was read from, so the value —
/// and everything reachable from the snapshot's root — stays alive for as
/// long as the guard is held, regardless of how many writes the store
/// publishes in the meantime. Dereferences to the value.
pub struct ValueGuard<T> {
    snapshot: Trie,
    value: Arc<T>,
}

impl<T> ValueGuard<T> {
    pub(crate) fn new(snapshot: Trie, value: Arc<T>) -> Self {
        ValueGuard { snapshot, value }
    }

    /// The snapshot this value was read from.
    ///
    /// The returned trie is frozen: it reflects the store's state at the
    /// moment of the lookup and is immune to later writes.
    pub fn snapshot(&self) -> &Trie {
        &self.snapshot
    }
}

impl<T> Deref for ValueGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> AsRef<T> for ValueGuard<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

// Guards share, never own exclusively: cloning one is a pointer copy and
// needs no `T: Clone`.
impl<T> Clone for ValueGuard<T> {
    fn clone(&self) -> Self {
        ValueGuard {
            snapshot: self.snapshot.clone(),
            value: Arc::clone(&self.value),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueGuard").field(&self.value).finish()
    }
}
