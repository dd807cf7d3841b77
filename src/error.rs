//! Error types for queue operations

use thiserror::Error;

/// Error type for queue operations
///
/// Everything except reading from an empty queue and reusing an outdated
/// cursor is total, so the taxonomy is deliberately small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `remove_min` or `peek` was called on a queue with no entries
    #[error("priority queue is empty")]
    EmptyQueue,

    /// The cursor was created before the queue was last mutated, or by a
    /// different queue
    #[error("cursor is stale: created at generation {cursor}, queue is at generation {queue}")]
    StaleCursor {
        /// Generation recorded when the cursor was created
        cursor: u64,
        /// Current generation of the queue
        queue: u64,
    },
}

/// A broken structural invariant found by [`OrderedMultiQueue::validate`]
///
/// These indicate a bug in the queue itself, never bad input.
///
/// [`OrderedMultiQueue::validate`]: crate::queue::OrderedMultiQueue::validate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("root is {root} but len is {len}")]
    RootLenMismatch { root: &'static str, len: usize },

    #[error("root node has a parent link")]
    RootHasParent,

    #[error("node key does not resolve to a live node")]
    DanglingKey,

    #[error("child's parent link does not point back at its tree parent")]
    BrokenParentLink,

    #[error("left child priority is not less than its parent's")]
    LeftOrder,

    #[error("right child priority is not greater than its parent's")]
    RightOrder,

    #[error("subtree priority escapes the bounds set by an ancestor")]
    SubtreeBounds,

    #[error("chain member has a different priority than its head")]
    ChainPriority,

    #[error("chain member owns tree children")]
    ChainMemberHasChildren,

    #[error("chain member's parent link is not its chain predecessor")]
    BrokenChainLink,

    #[error("chain membership flag is inconsistent with the chain shape")]
    ChainFlag,

    #[error("counted {counted} reachable entries but len is {len}")]
    LenMismatch { counted: usize, len: usize },

    #[error("arena holds {stored} nodes but {reachable} are reachable")]
    UnreachableNodes { stored: usize, reachable: usize },
}
