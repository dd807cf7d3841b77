//! Arena node storage for the queue's tree and chains
//!
//! All nodes live in a single [`SlotMap`]. Links between nodes are
//! [`NodeKey`]s rather than pointers, so the arena is the one place a node's
//! lifetime is decided:
//!
//! - `left`, `right` and `chain_next` are *owning* edges: every live node is
//!   reachable through exactly one of them (or is the root).
//! - `parent` is a back-reference and owns nothing. For a tree-resident node it
//!   is the BST parent; for a non-head chain member it is the chain predecessor.
//!
//! Keys are generational, so a key that outlives its node resolves to `None`
//! instead of aliasing whatever reuses the slot.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key of a node in the queue's arena
    pub struct NodeKey;
}

/// One entry plus its tree and chain topology
#[derive(Debug, Clone)]
pub(crate) struct Node<T, P> {
    pub(crate) priority: P,
    pub(crate) value: T,
    /// Set on every node of a chain with at least two members, head included
    pub(crate) is_chain_member: bool,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) left: Option<NodeKey>,
    pub(crate) right: Option<NodeKey>,
    pub(crate) chain_next: Option<NodeKey>,
}

impl<T, P> Node<T, P> {
    fn detached(value: T, priority: P) -> Self {
        Self {
            priority,
            value,
            is_chain_member: false,
            parent: None,
            left: None,
            right: None,
            chain_next: None,
        }
    }
}

/// Slot-map backed arena holding every node of one queue
#[derive(Debug, Clone)]
pub(crate) struct NodeStore<T, P> {
    nodes: SlotMap<NodeKey, Node<T, P>>,
}

impl<T, P> Default for NodeStore<T, P> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<T, P> NodeStore<T, P> {
    /// Allocates an unlinked node and returns its key
    pub(crate) fn alloc(&mut self, value: T, priority: P) -> NodeKey {
        self.nodes.insert(Node::detached(value, priority))
    }

    /// Frees a node, handing back its contents, or `None` for a dead key
    ///
    /// The caller is responsible for unlinking it.
    pub(crate) fn free(&mut self, key: NodeKey) -> Option<Node<T, P>> {
        self.nodes.remove(key)
    }

    pub(crate) fn get(&self, key: NodeKey) -> Option<&Node<T, P>> {
        self.nodes.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node<T, P>> {
        self.nodes.get_mut(key)
    }

    /// Indexes a key that the tree structure guarantees is live
    ///
    /// A miss here means the links are corrupt, which is a bug in this crate.
    #[inline]
    pub(crate) fn node(&self, key: NodeKey) -> &Node<T, P> {
        &self.nodes[key]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, key: NodeKey) -> &mut Node<T, P> {
        &mut self.nodes[key]
    }

    /// Number of live nodes in the arena
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Drops every node at once, without walking the tree
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Follows `left` links from `key` down to the smallest tree node below it
    pub(crate) fn leftmost(&self, mut key: NodeKey) -> NodeKey {
        while let Some(left) = self.node(key).left {
            key = left;
        }
        key
    }

    /// Follows `chain_next` links from `key` to the last member of its chain
    pub(crate) fn chain_tail(&self, mut key: NodeKey) -> NodeKey {
        while let Some(next) = self.node(key).chain_next {
            key = next;
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_free() {
        let mut store: NodeStore<&str, i32> = NodeStore::default();

        let key = store.alloc("a", 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.node(key).value, "a");
        assert!(!store.node(key).is_chain_member);

        store.node_mut(key).priority = 7;
        assert_eq!(store.get(key).map(|n| n.priority), Some(7));

        let freed = store.free(key).unwrap();
        assert_eq!((freed.priority, freed.value), (7, "a"));
        assert_eq!(store.len(), 0);
        assert!(store.free(key).is_none());
    }

    #[test]
    fn test_stale_key_does_not_resolve() {
        let mut store: NodeStore<i32, i32> = NodeStore::default();

        let old = store.alloc(1, 1);
        assert!(store.free(old).is_some());
        let new = store.alloc(2, 2);

        // The slot may be reused, but the generation differs
        assert!(store.get(old).is_none());
        assert!(store.get_mut(old).is_none());
        assert_eq!(store.get(new).map(|n| n.value), Some(2));
    }

    #[test]
    fn test_leftmost_and_chain_tail() {
        let mut store: NodeStore<(), i32> = NodeStore::default();

        let root = store.alloc((), 5);
        let left = store.alloc((), 3);
        let left_left = store.alloc((), 1);
        store.node_mut(root).left = Some(left);
        store.node_mut(left).left = Some(left_left);
        assert_eq!(store.leftmost(root), left_left);
        assert_eq!(store.leftmost(left_left), left_left);

        let dup = store.alloc((), 1);
        let dup2 = store.alloc((), 1);
        store.node_mut(left_left).chain_next = Some(dup);
        store.node_mut(dup).chain_next = Some(dup2);
        assert_eq!(store.chain_tail(left_left), dup2);
        assert_eq!(store.chain_tail(dup2), dup2);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut store: NodeStore<String, i32> = NodeStore::default();
        let keys: Vec<_> = (0..10).map(|i| store.alloc(i.to_string(), i)).collect();
        assert_eq!(store.len(), 10);

        store.clear();
        assert_eq!(store.len(), 0);
        assert!(keys.iter().all(|k| store.get(*k).is_none()));
    }
}
