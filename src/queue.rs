//! Priority queue on an unbalanced binary search tree with duplicate chains
//!
//! The tree is keyed by priority and never holds two tree-resident nodes with
//! the same priority. An entry whose priority is already present is appended
//! to a singly linked *chain* hanging off the tree node that first received
//! that priority, so equal priorities are served in insertion order.
//!
//! ```text
//!            (5)
//!           /   \
//!        (2)=>2=>2  (9)
//!          \
//!          (3)
//! ```
//!
//! # Time Complexity
//!
//! | Operation    | Complexity          |
//! |--------------|---------------------|
//! | `insert`     | O(depth + m)        |
//! | `remove_min` | O(depth)            |
//! | `peek`       | O(depth)            |
//! | `clone`      | O(n)                |
//! | `==`         | O(n)                |
//! | `clear`      | O(n)                |
//!
//! Where `m` is the length of the chain for the inserted priority. The tree is
//! not rebalanced, so `depth` is O(n) for sorted input.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::atomic::{self, AtomicU64};

use log::trace;

use crate::cursor::Cursor;
use crate::error::QueueError;
use crate::store::{NodeKey, NodeStore};
use crate::traits::Heap;

/// One `(priority, value)` pair removed from the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry<T, P> {
    pub priority: P,
    pub value: T,
}

impl<T, P> Entry<T, P> {
    /// Splits the entry into `(priority, value)`
    pub fn into_parts(self) -> (P, T) {
        (self.priority, self.value)
    }
}

static NEXT_QUEUE_ID: AtomicU64 = AtomicU64::new(0);

/// Identity stamped into every cursor a queue hands out
fn next_queue_id() -> u64 {
    NEXT_QUEUE_ID.fetch_add(1, atomic::Ordering::Relaxed)
}

/// Where a new entry lands after descending the tree
enum Slot {
    Chain(NodeKey),
    Left(NodeKey),
    Right(NodeKey),
}

/// A min-priority queue that keeps equal priorities in FIFO order
///
/// # Example
///
/// ```rust
/// use ordered_multi_queue::OrderedMultiQueue;
///
/// let mut queue = OrderedMultiQueue::new();
/// queue.insert("A", 2);
/// queue.insert("B", 1);
/// queue.insert("C", 1);
/// queue.insert("D", 3);
///
/// assert_eq!(queue.render(), vec![(&1, &"B"), (&1, &"C"), (&2, &"A"), (&3, &"D")]);
/// assert_eq!(queue.remove_min().unwrap().value, "B");
/// assert_eq!(queue.remove_min().unwrap().value, "C");
/// assert_eq!(queue.len(), 2);
/// ```
pub struct OrderedMultiQueue<T, P> {
    pub(crate) store: NodeStore<T, P>,
    pub(crate) root: Option<NodeKey>,
    pub(crate) len: usize,
    /// Unique per queue value; clones get a fresh one
    pub(crate) id: u64,
    /// Bumped by every structural mutation; cursors compare against it
    pub(crate) generation: u64,
    /// Cursor driven by `begin`/`next`
    pub(crate) cursor: Cursor,
}

impl<T, P: Ord> OrderedMultiQueue<T, P> {
    /// Creates an empty queue
    pub fn new() -> Self {
        let id = next_queue_id();
        Self {
            store: NodeStore::default(),
            root: None,
            len: 0,
            id,
            generation: 0,
            cursor: Cursor::exhausted(id, 0),
        }
    }

    /// Adds `value` with the given priority. Never fails.
    ///
    /// If the priority is already present the entry goes to the tail of that
    /// priority's chain, behind every earlier entry with the same priority.
    pub fn insert(&mut self, value: T, priority: P) {
        match self.locate(&priority) {
            None => {
                let key = self.store.alloc(value, priority);
                self.root = Some(key);
                trace!("insert: new root");
            }
            Some(Slot::Chain(head)) => {
                let tail = self.store.chain_tail(head);
                let key = self.store.alloc(value, priority);
                {
                    let node = self.store.node_mut(key);
                    node.is_chain_member = true;
                    node.parent = Some(tail);
                }
                self.store.node_mut(tail).chain_next = Some(key);
                self.store.node_mut(head).is_chain_member = true;
                trace!("insert: appended to duplicate chain");
            }
            Some(Slot::Left(parent)) => {
                let key = self.attach_leaf(parent, value, priority);
                self.store.node_mut(parent).left = Some(key);
                trace!("insert: new left leaf");
            }
            Some(Slot::Right(parent)) => {
                let key = self.attach_leaf(parent, value, priority);
                self.store.node_mut(parent).right = Some(key);
                trace!("insert: new right leaf");
            }
        }

        self.len += 1;
        self.mutated();
    }

    /// Removes and returns the entry with the smallest priority
    ///
    /// Among entries sharing the smallest priority, the one inserted first is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::EmptyQueue`] if the queue has no entries.
    pub fn remove_min(&mut self) -> Result<Entry<T, P>, QueueError> {
        let root = self.root.ok_or(QueueError::EmptyQueue)?;
        let min = self.store.leftmost(root);

        // `leftmost` only returns live keys
        let node = self.store.free(min).ok_or(QueueError::EmptyQueue)?;
        debug_assert!(node.left.is_none(), "leftmost node has a left child");
        let (parent, right, heir) = (node.parent, node.right, node.chain_next);

        // The node taking over `min`'s tree position
        let replacement = match heir {
            Some(heir) => {
                // Promote the second chain member in place
                let promoted = self.store.node_mut(heir);
                debug_assert!(promoted.left.is_none() && promoted.right.is_none());
                promoted.parent = parent;
                promoted.right = right;
                promoted.is_chain_member = promoted.chain_next.is_some();
                if let Some(child) = right.and_then(|r| self.store.get_mut(r)) {
                    child.parent = Some(heir);
                }
                trace!("remove_min: promoted chain successor");
                Some(heir)
            }
            None => {
                if let Some(child) = right.and_then(|r| self.store.get_mut(r)) {
                    child.parent = parent;
                }
                trace!("remove_min: spliced out tree node");
                right
            }
        };

        match parent {
            Some(parent) => {
                let parent = self.store.node_mut(parent);
                debug_assert_eq!(parent.left, Some(min), "minimum is not a left child");
                parent.left = replacement;
            }
            None => self.root = replacement,
        }

        self.len -= 1;
        self.mutated();

        Ok(Entry {
            priority: node.priority,
            value: node.value,
        })
    }

    /// Returns the entry `remove_min` would return, without removing it
    ///
    /// No cursor moves and nothing is mutated.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::EmptyQueue`] if the queue has no entries.
    pub fn peek(&self) -> Result<(&P, &T), QueueError> {
        let root = self.root.ok_or(QueueError::EmptyQueue)?;
        let node = self.store.node(self.store.leftmost(root));
        Ok((&node.priority, &node.value))
    }

    fn mutated(&mut self) {
        self.generation = self.generation.wrapping_add(1);

        if cfg!(feature = "invariant-checks") {
            if let Err(violation) = self.validate() {
                panic!("queue invariant violated: {violation}");
            }
        }
    }

    /// Descends from the root to the slot where `priority` belongs
    ///
    /// Returns `None` only when the tree is empty.
    fn locate(&self, priority: &P) -> Option<Slot> {
        let mut at = self.root?;
        loop {
            let node = self.store.node(at);
            match priority.cmp(&node.priority) {
                Ordering::Equal => return Some(Slot::Chain(at)),
                Ordering::Less => match node.left {
                    Some(left) => at = left,
                    None => return Some(Slot::Left(at)),
                },
                Ordering::Greater => match node.right {
                    Some(right) => at = right,
                    None => return Some(Slot::Right(at)),
                },
            }
        }
    }
}

impl<T, P> OrderedMultiQueue<T, P> {
    /// Number of entries, chain members included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Releases every entry. Calling it on an empty queue is a no-op apart
    /// from invalidating outstanding cursors.
    pub fn clear(&mut self) {
        self.store.clear();
        self.root = None;
        self.len = 0;
        self.generation = self.generation.wrapping_add(1);
        self.cursor = Cursor::exhausted(self.id, self.generation);
        trace!("clear: queue emptied");
    }

    /// The tree-resident root entry, if any
    ///
    /// This is an inspection hook: the root is whatever priority happens to
    /// sit at the top of the unbalanced tree, not the minimum.
    pub fn root(&self) -> Option<(&P, &T)> {
        self.root.map(|key| {
            let node = self.store.node(key);
            (&node.priority, &node.value)
        })
    }

    /// All entries in ascending priority order, duplicates in insertion order
    pub fn render(&self) -> Vec<(&P, &T)> {
        self.iter().collect()
    }

    fn attach_leaf(&mut self, parent: NodeKey, value: T, priority: P) -> NodeKey {
        let key = self.store.alloc(value, priority);
        self.store.node_mut(key).parent = Some(parent);
        key
    }
}

impl<T: Clone, P: Clone> Clone for OrderedMultiQueue<T, P> {
    /// Deep copy with its own identity, so cursors of `self` are stale on it
    fn clone(&self) -> Self {
        let id = next_queue_id();
        Self {
            store: self.store.clone(),
            root: self.root,
            len: self.len,
            id,
            generation: 0,
            cursor: Cursor::exhausted(id, 0),
        }
    }

    /// Replaces the contents of `self` and invalidates its cursors
    fn clone_from(&mut self, source: &Self) {
        self.store.clone_from(&source.store);
        self.root = source.root;
        self.len = source.len;
        self.generation = self.generation.max(source.generation).wrapping_add(1);
        self.cursor = Cursor::exhausted(self.id, self.generation);
        trace!("clone_from: contents replaced");
    }
}

impl<T, P: Ord> Default for OrderedMultiQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq, P: PartialEq> PartialEq for OrderedMultiQueue<T, P> {
    /// Structural equality: same tree shape, and the same priorities, values
    /// and chain contents at every position
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }

        let mut stack = vec![(self.root, other.root)];
        while let Some(pair) = stack.pop() {
            let (a, b) = match pair {
                (None, None) => continue,
                (Some(a), Some(b)) => (self.store.node(a), other.store.node(b)),
                _ => return false,
            };
            if a.priority != b.priority || a.value != b.value {
                return false;
            }
            stack.push((a.chain_next, b.chain_next));
            stack.push((a.right, b.right));
            stack.push((a.left, b.left));
        }
        true
    }
}

impl<T: Eq, P: Eq> Eq for OrderedMultiQueue<T, P> {}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for OrderedMultiQueue<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// One line per entry in traversal order: `"<priority> value: <value>"`
impl<T: fmt::Display, P: fmt::Display> fmt::Display for OrderedMultiQueue<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (priority, value) in self.iter() {
            writeln!(f, "{priority} value: {value}")?;
        }
        Ok(())
    }
}

impl<T, P: Ord> Extend<(T, P)> for OrderedMultiQueue<T, P> {
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        for (value, priority) in iter {
            self.insert(value, priority);
        }
    }
}

impl<T, P: Ord> FromIterator<(T, P)> for OrderedMultiQueue<T, P> {
    fn from_iter<I: IntoIterator<Item = (T, P)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

/// Owning iterator that drains a queue in `remove_min` order
pub struct IntoIter<T, P> {
    queue: OrderedMultiQueue<T, P>,
}

impl<T, P: Ord> Iterator for IntoIter<T, P> {
    type Item = Entry<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.remove_min().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<T, P: Ord> ExactSizeIterator for IntoIter<T, P> {}

impl<T, P: Ord> FusedIterator for IntoIter<T, P> {}

impl<T, P: Ord> IntoIterator for OrderedMultiQueue<T, P> {
    type Item = Entry<T, P>;
    type IntoIter = IntoIter<T, P>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

impl<T, P: Ord> Heap<T, P> for OrderedMultiQueue<T, P> {
    fn new() -> Self {
        OrderedMultiQueue::new()
    }

    fn is_empty(&self) -> bool {
        OrderedMultiQueue::is_empty(self)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push(&mut self, priority: P, item: T) {
        self.insert(item, priority);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        OrderedMultiQueue::peek(self).ok()
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.remove_min().ok().map(Entry::into_parts)
    }
}
