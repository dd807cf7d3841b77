//! In-order traversal over the tree with chains expanded
//!
//! Traversal visits priorities in ascending order. At each priority it yields
//! the tree-resident node first and then the rest of its chain, oldest first.
//!
//! The position is kept in an explicit [`Cursor`]: the tree node currently
//! being visited (the *anchor*), the node to yield next (the anchor or one of
//! its chain members), and the identity and generation of the queue it was
//! made for.
//! Moving past a chain's last member uses the classic parent-pointer successor
//! walk, so no stack is needed and a cursor can be parked and resumed.
//!
//! Three ways to drive it:
//!
//! - [`OrderedMultiQueue::iter`] borrows the queue, so mutation during the
//!   walk is ruled out at compile time.
//! - [`OrderedMultiQueue::cursor`] and [`OrderedMultiQueue::advance`] use a
//!   detached handle. Any mutation of the queue makes the handle stale, and
//!   `advance` then fails with [`QueueError::StaleCursor`].
//! - [`OrderedMultiQueue::begin`] and [`OrderedMultiQueue::next`] drive the
//!   cursor embedded in the queue. A mutation between `begin` and exhaustion
//!   ends that traversal early.

use std::iter::FusedIterator;

use log::debug;

use crate::error::QueueError;
use crate::queue::OrderedMultiQueue;
use crate::store::{NodeKey, NodeStore};

/// Resumable traversal position for one queue
///
/// A cursor holds keys only and borrows nothing, so any number of them can
/// exist side by side. It is only meaningful for the queue that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    anchor: Option<NodeKey>,
    current: Option<NodeKey>,
    queue: u64,
    generation: u64,
}

impl Cursor {
    pub(crate) fn exhausted(queue: u64, generation: u64) -> Self {
        Self {
            anchor: None,
            current: None,
            queue,
            generation,
        }
    }

    /// Positions a cursor on the leftmost tree node under `root`
    pub(crate) fn start<T, P>(
        store: &NodeStore<T, P>,
        root: Option<NodeKey>,
        queue: u64,
        generation: u64,
    ) -> Self {
        let first = root.map(|root| store.leftmost(root));
        Self {
            anchor: first,
            current: first,
            queue,
            generation,
        }
    }

    fn made_by<T, P>(&self, queue: &OrderedMultiQueue<T, P>) -> bool {
        self.queue == queue.id && self.generation == queue.generation
    }

    /// True once every entry has been yielded
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Queue generation this cursor was created at
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the node to yield and moves past it
    ///
    /// A key that does not resolve in `store` comes back as the error and
    /// leaves the cursor where it was.
    fn step<T, P>(&mut self, store: &NodeStore<T, P>) -> Result<Option<NodeKey>, NodeKey> {
        let (Some(current), Some(anchor)) = (self.current, self.anchor) else {
            return Ok(None);
        };

        match store.get(current).ok_or(current)?.chain_next {
            Some(next) => self.current = Some(next),
            None => {
                let successor = successor(store, anchor)?;
                self.anchor = successor;
                self.current = successor;
            }
        }

        Ok(Some(current))
    }
}

/// In-order successor of a tree-resident node, or `None` past the maximum
fn successor<T, P>(store: &NodeStore<T, P>, key: NodeKey) -> Result<Option<NodeKey>, NodeKey> {
    let node = store.get(key).ok_or(key)?;
    if let Some(mut next) = node.right {
        while let Some(left) = store.get(next).ok_or(next)?.left {
            next = left;
        }
        return Ok(Some(next));
    }

    // Climb until we arrive at a parent from its left side
    let mut child = key;
    let mut parent = node.parent;
    while let Some(up) = parent {
        let up_node = store.get(up).ok_or(up)?;
        if up_node.left == Some(child) {
            return Ok(Some(up));
        }
        child = up;
        parent = up_node.parent;
    }
    Ok(None)
}

impl<T, P> OrderedMultiQueue<T, P> {
    /// Creates a detached cursor positioned on the smallest entry
    pub fn cursor(&self) -> Cursor {
        Cursor::start(&self.store, self.root, self.id, self.generation)
    }

    /// Yields the entry under `cursor` and moves it forward
    ///
    /// Returns `Ok(None)` once the traversal is finished, and keeps doing so.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::StaleCursor`] if the queue was mutated after the
    /// cursor was created, or if another queue created it. The cursor is left
    /// untouched.
    pub fn advance(&self, cursor: &mut Cursor) -> Result<Option<(&P, &T)>, QueueError> {
        if !cursor.made_by(self) {
            debug!(
                "rejecting stale cursor (cursor queue {} generation {}, queue {} generation {})",
                cursor.queue, cursor.generation, self.id, self.generation
            );
            return Err(self.stale(cursor));
        }

        match cursor.step(&self.store) {
            Ok(key) => Ok(key
                .and_then(|key| self.store.get(key))
                .map(|node| (&node.priority, &node.value))),
            Err(missing) => {
                debug!("rejecting cursor holding dead key {missing:?}");
                Err(self.stale(cursor))
            }
        }
    }

    fn stale(&self, cursor: &Cursor) -> QueueError {
        QueueError::StaleCursor {
            cursor: cursor.generation,
            queue: self.generation,
        }
    }

    /// Resets the embedded cursor to the smallest entry
    ///
    /// # Example
    ///
    /// ```rust
    /// use ordered_multi_queue::OrderedMultiQueue;
    ///
    /// let mut queue: OrderedMultiQueue<&str, i32> =
    ///     [("Jen", 2), ("Ben", 1), ("Sven", 2)].into_iter().collect();
    ///
    /// let mut seen = Vec::new();
    /// queue.begin();
    /// while let Some((priority, value)) = queue.next() {
    ///     seen.push((*priority, *value));
    /// }
    /// assert_eq!(seen, vec![(1, "Ben"), (2, "Jen"), (2, "Sven")]);
    /// ```
    pub fn begin(&mut self) {
        self.cursor = self.cursor();
    }

    /// Yields the entry under the embedded cursor and moves it forward
    ///
    /// Returns `None` at the end of the traversal. If the queue was mutated
    /// since the last [`begin`](Self::begin), the traversal is over and this
    /// returns `None` until `begin` is called again.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(&P, &T)> {
        if !self.cursor.made_by(self) {
            self.cursor = Cursor::exhausted(self.id, self.generation);
            return None;
        }

        let key = self.cursor.step(&self.store).ok().flatten()?;
        let node = self.store.get(key)?;
        Some((&node.priority, &node.value))
    }

    /// Borrowing iterator over `(priority, value)` in traversal order
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter {
            store: &self.store,
            cursor: self.cursor(),
            remaining: self.len,
        }
    }
}

/// Borrowing iterator returned by [`OrderedMultiQueue::iter`]
#[derive(Debug)]
pub struct Iter<'a, T, P> {
    store: &'a NodeStore<T, P>,
    cursor: Cursor,
    remaining: usize,
}

impl<T, P> Clone for Iter<'_, T, P> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, P> Iterator for Iter<'a, T, P> {
    type Item = (&'a P, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let store = self.store;
        let key = self.cursor.step(store).ok().flatten()?;
        self.remaining -= 1;
        let node = store.get(key)?;
        Some((&node.priority, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, P> ExactSizeIterator for Iter<'_, T, P> {}

impl<T, P> FusedIterator for Iter<'_, T, P> {}

impl<'a, T, P> IntoIterator for &'a OrderedMultiQueue<T, P> {
    type Item = (&'a P, &'a T);
    type IntoIter = Iter<'a, T, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
