//! Trie node types
//!
//! Nodes are immutable once constructed. Mutation in the owning
//! [`Trie`](super::Trie) is path-copying: the nodes along the touched path
//! are rebuilt through the builder methods here, and a node reachable from
//! an existing trie handle is never modified.

use super::value::AnyValue;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Child map: one shared edge per key byte.
pub(crate) type Children = BTreeMap<u8, Arc<TrieNode>>;

/// A node in the trie.
///
/// `Value` nodes terminate a stored key and carry its payload; `Inner`
/// nodes exist only to route to descendants. A node with neither a payload
/// nor children is never retained in a trie — removal prunes it.
#[derive(Clone, Debug)]
pub(crate) enum TrieNode {
    Inner { children: Children },
    Value { children: Children, value: AnyValue },
}

impl TrieNode {
    pub(crate) fn inner(children: Children) -> Self {
        TrieNode::Inner { children }
    }

    pub(crate) fn with_value(children: Children, value: AnyValue) -> Self {
        TrieNode::Value { children, value }
    }

    /// A fresh node holding a single child edge.
    pub(crate) fn single(byte: u8, child: Arc<TrieNode>) -> Self {
        let mut children = Children::new();
        children.insert(byte, child);
        TrieNode::Inner { children }
    }

    pub(crate) fn children(&self) -> &Children {
        match self {
            TrieNode::Inner { children } | TrieNode::Value { children, .. } => children,
        }
    }

    pub(crate) fn child(&self, byte: u8) -> Option<&Arc<TrieNode>> {
        self.children().get(&byte)
    }

    pub(crate) fn is_value(&self) -> bool {
        matches!(self, TrieNode::Value { .. })
    }

    pub(crate) fn value(&self) -> Option<&AnyValue> {
        match self {
            TrieNode::Value { value, .. } => Some(value),
            TrieNode::Inner { .. } => None,
        }
    }

    /// Rebuild this node with one child slot pointing at `child`.
    ///
    /// The children mapping is copied shallowly: sibling subtrees stay
    /// shared with the original node.
    pub(crate) fn with_child(&self, byte: u8, child: Arc<TrieNode>) -> TrieNode {
        let mut children = self.children().clone();
        children.insert(byte, child);
        self.rebuild(children)
    }

    /// Rebuild this node with one child edge removed.
    pub(crate) fn without_child(&self, byte: u8) -> TrieNode {
        let mut children = self.children().clone();
        children.remove(&byte);
        self.rebuild(children)
    }

    /// Same variant and payload, different children mapping.
    fn rebuild(&self, children: Children) -> TrieNode {
        match self {
            TrieNode::Inner { .. } => TrieNode::Inner { children },
            TrieNode::Value { value, .. } => TrieNode::Value {
                children,
                value: value.clone(),
            },
        }
    }
}
