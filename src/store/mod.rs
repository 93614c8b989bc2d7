//! Snapshot store over the persistent trie
//!
//! This module wraps a single current [`Trie`](crate::trie::Trie) behind a
//! two-lock discipline: a brief snapshot lock readers and publishers take
//! for the pointer itself, and a writer lock serializing whole
//! compute-and-publish sequences. Values read from the store come back in
//! a [`ValueGuard`] pinning the snapshot they were found in.

mod guard;
mod trie_store;

pub use guard::ValueGuard;
pub use trie_store::TrieStore;
