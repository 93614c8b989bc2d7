//! Persistent copy-on-write trie
//!
//! This implements a structurally-shared trie where:
//! - Every mutation returns a new trie sharing all unmodified subtrees
//! - Existing handles are full snapshots and never change
//! - Each key stores a value of a caller-chosen type, recovered by a
//!   checked downcast

mod node;
mod tree;
mod value;

pub use tree::Trie;
