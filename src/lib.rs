//! Ordered multi-queue: a priority queue on a binary search tree
//!
//! This crate provides [`OrderedMultiQueue`], a min-priority queue built
//! directly on an (unbalanced) binary search tree keyed by priority. Entries
//! that share a priority are kept in a FIFO chain hanging off the tree node
//! that first received that priority, so ties are always served in insertion
//! order.
//!
//! # Features
//!
//! - **Stable ties**: equal priorities come out oldest first
//! - **Resumable traversal**: in-order walks through an explicit [`Cursor`],
//!   a borrowing [`Iter`], or the queue's own `begin`/`next` cursor
//! - **Arena storage**: nodes live in a `slotmap` arena addressed by
//!   generational keys; there are no raw pointers and no recursion on drop
//! - **Structural copy and equality**: `Clone` is a full deep copy and `==`
//!   compares tree shape, priorities, values and chains
//! - **Heap interface**: implements [`Heap`], so it can back any consumer
//!   written against a push/peek/pop priority queue
//!
//! The tree is never rebalanced. Sorted input degrades it to a linked list,
//! which every operation tolerates because no walk recurses.
//!
//! # Cargo features
//!
//! - `invariant-checks`: run [`OrderedMultiQueue::validate`] after every
//!   mutation and panic on the first broken invariant
//!
//! # Example
//!
//! ```rust
//! use ordered_multi_queue::{OrderedMultiQueue, QueueError};
//!
//! let mut queue = OrderedMultiQueue::new();
//! queue.insert("write report", 2);
//! queue.insert("fix outage", 1);
//! queue.insert("reply to email", 2);
//!
//! assert_eq!(queue.peek(), Ok((&1, &"fix outage")));
//! assert_eq!(queue.remove_min().unwrap().value, "fix outage");
//! assert_eq!(queue.remove_min().unwrap().value, "write report");
//! assert_eq!(queue.remove_min().unwrap().value, "reply to email");
//! assert_eq!(queue.remove_min(), Err(QueueError::EmptyQueue));
//! ```

pub mod cursor;
pub mod error;
pub mod queue;
mod store;
pub mod traits;
mod validate;

pub use cursor::{Cursor, Iter};
pub use error::{InvariantViolation, QueueError};
pub use queue::{Entry, IntoIter, OrderedMultiQueue};
// Re-export the main trait for convenience
pub use traits::Heap;
