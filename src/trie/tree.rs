//! Persistent trie over immutable nodes
//!
//! Every mutating operation returns a new [`Trie`] that shares all
//! untouched subtrees with its receiver. Handles already held keep
//! reporting exactly what they reported before; nothing reachable from
//! them is ever modified.

use super::node::{Children, TrieNode};
use super::value::AnyValue;
use std::any::Any;
use std::sync::Arc;

/// An immutable handle to one version of the key/value mapping.
///
/// Keys are byte sequences, one trie edge per byte. Each key independently
/// stores a value of a caller-chosen type; the value is recovered only
/// when the same type is requested again.
///
/// Cloning a `Trie` copies a root pointer, not the structure.
#[derive(Clone, Debug, Default)]
pub struct Trie {
    root: Option<Arc<TrieNode>>,
}

impl Trie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Trie { root: None }
    }

    /// Whether the trie holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Look up `key` as a value of type `T`.
    ///
    /// Returns `None` when the key is absent, when it terminates on a
    /// prefix node that carries no value, or when the value was stored
    /// under a different type. A type mismatch is indistinguishable from
    /// absence.
    ///
    /// Runs in O(key length) with no allocation.
    pub fn get<T: Any>(&self, key: &[u8]) -> Option<&T> {
        self.lookup(key)?.value()?.downcast_ref::<T>()
    }

    /// Whether `key` holds a value of any type.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.lookup(key).map_or(false, TrieNode::is_value)
    }

    /// Store `value` under `key`, returning the resulting trie.
    ///
    /// The receiver is unchanged. Exactly the nodes along `key` are newly
    /// allocated; every subtree off the path is shared between the two
    /// versions. Writing to an existing key overwrites its value while
    /// keeping the node's children; writing to an interior prefix upgrades
    /// that node to a value carrier.
    ///
    /// An empty key assigns the value to the root node, preserving the
    /// root's existing children.
    pub fn put<T: Any + Send + Sync>(&self, key: &[u8], value: T) -> Trie {
        let value = AnyValue::new(value);

        if key.is_empty() {
            let children = match &self.root {
                Some(root) => root.children().clone(),
                None => Children::new(),
            };
            return Trie {
                root: Some(Arc::new(TrieNode::with_value(children, value))),
            };
        }

        // Record the existing node at every depth of the path; once the
        // path leaves the trie, the remaining depths record absence.
        let mut cursor = self.root.clone();
        let mut path: Vec<Option<Arc<TrieNode>>> = Vec::with_capacity(key.len() + 1);
        path.push(cursor.clone());
        for &byte in key {
            cursor = cursor.and_then(|node| node.child(byte).cloned());
            path.push(cursor.clone());
        }

        // Terminal: a value node that keeps whatever children already
        // live at that position.
        let children = match path[key.len()].as_ref() {
            Some(existing) => existing.children().clone(),
            None => Children::new(),
        };
        let mut rebuilt = Arc::new(TrieNode::with_value(children, value));

        // Rebuild bottom-up: clone-and-repoint where a node existed,
        // synthesize a single-edge node where it did not.
        for depth in (0..key.len()).rev() {
            let byte = key[depth];
            rebuilt = match path[depth].as_ref() {
                Some(existing) => Arc::new(existing.with_child(byte, rebuilt)),
                None => Arc::new(TrieNode::single(byte, rebuilt)),
            };
        }

        Trie {
            root: Some(rebuilt),
        }
    }

    /// Remove the value under `key`, returning the resulting trie.
    ///
    /// When the key is absent, or terminates on a node that carries no
    /// value, the receiver is returned unchanged (same root pointer).
    /// Otherwise the terminal node loses its value, and every node left
    /// with neither value nor children is pruned, bottom-up; a fully
    /// pruned trie becomes empty.
    pub fn remove(&self, key: &[u8]) -> Trie {
        let Some(root) = &self.root else {
            return self.clone();
        };

        // Record the path; an absent step means there is nothing to do.
        let mut path: Vec<Arc<TrieNode>> = Vec::with_capacity(key.len() + 1);
        path.push(Arc::clone(root));
        for &byte in key {
            let next = match path.last().and_then(|node| node.child(byte)) {
                Some(child) => Arc::clone(child),
                None => return self.clone(),
            };
            path.push(next);
        }

        if !path[key.len()].is_value() {
            return self.clone();
        }

        // Demote the terminal to a plain node; a childless one is pruned
        // outright.
        let terminal = &path[key.len()];
        let mut rebuilt: Option<Arc<TrieNode>> = if terminal.children().is_empty() {
            None
        } else {
            Some(Arc::new(TrieNode::inner(terminal.children().clone())))
        };

        // Rebuild ancestors bottom-up. A pruned child comes off its
        // parent's children mapping entirely; a parent left childless and
        // valueless is itself pruned.
        for depth in (0..key.len()).rev() {
            let byte = key[depth];
            let node = match rebuilt {
                Some(child) => path[depth].with_child(byte, child),
                None => path[depth].without_child(byte),
            };
            rebuilt = if node.children().is_empty() && !node.is_value() {
                None
            } else {
                Some(Arc::new(node))
            };
        }

        Trie { root: rebuilt }
    }

    /// Look up `key` and clone out a shared handle on its payload, for
    /// callers that need the value to outlive this trie borrow.
    pub(crate) fn get_shared<T: Any + Send + Sync>(&self, key: &[u8]) -> Option<Arc<T>> {
        self.lookup(key)?.value()?.shared()
    }

    /// Walk `key` byte-by-byte from the root.
    fn lookup(&self, key: &[u8]) -> Option<&TrieNode> {
        let mut node = self.root.as_ref()?;
        for &byte in key {
            node = node.child(byte)?;
        }
        Some(node)
    }
}
