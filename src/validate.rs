//! Structural invariant checking
//!
//! [`OrderedMultiQueue::validate`] walks the whole node graph with an explicit
//! stack and reports the first broken invariant. It is O(n), so the mutators
//! only run it when the `invariant-checks` feature is enabled; tests call it
//! directly.

use crate::error::InvariantViolation;
use crate::queue::OrderedMultiQueue;
use crate::store::NodeKey;

/// A tree node still to be checked, with the bounds its ancestors impose
struct Pending<'a, P> {
    key: NodeKey,
    parent: Option<NodeKey>,
    lower: Option<&'a P>,
    upper: Option<&'a P>,
}

impl<T, P: Ord> OrderedMultiQueue<T, P> {
    /// Checks every structural invariant of the tree and its chains
    ///
    /// - the root is present iff `len() > 0`, and has no parent
    /// - strict BST ordering: left subtree < node < right subtree
    /// - every child's `parent` points back at its tree parent
    /// - chain members share the head's priority, own no tree children, and
    ///   point back at their chain predecessor
    /// - `is_chain_member` is set exactly on nodes of chains with two or more
    ///   members
    /// - `len()` equals the number of reachable entries, and the arena holds
    ///   no unreachable nodes
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root else {
            if self.len != 0 {
                return Err(InvariantViolation::RootLenMismatch {
                    root: "absent",
                    len: self.len,
                });
            }
            return self.check_reachable(0);
        };
        if self.len == 0 {
            return Err(InvariantViolation::RootLenMismatch {
                root: "present",
                len: 0,
            });
        }

        let mut counted = 0;
        let mut stack = vec![Pending {
            key: root,
            parent: None,
            lower: None,
            upper: None,
        }];

        while let Some(Pending {
            key,
            parent,
            lower,
            upper,
        }) = stack.pop()
        {
            let node = self.store.get(key).ok_or(InvariantViolation::DanglingKey)?;

            if node.parent != parent {
                return Err(match parent {
                    None => InvariantViolation::RootHasParent,
                    Some(_) => InvariantViolation::BrokenParentLink,
                });
            }
            if lower.is_some_and(|lower| node.priority <= *lower)
                || upper.is_some_and(|upper| node.priority >= *upper)
            {
                return Err(InvariantViolation::SubtreeBounds);
            }

            counted += self.check_chain(key)?;

            if let Some(left) = node.left {
                let child = self.store.get(left).ok_or(InvariantViolation::DanglingKey)?;
                if child.priority >= node.priority {
                    return Err(InvariantViolation::LeftOrder);
                }
                stack.push(Pending {
                    key: left,
                    parent: Some(key),
                    lower,
                    upper: Some(&node.priority),
                });
            }
            if let Some(right) = node.right {
                let child = self.store.get(right).ok_or(InvariantViolation::DanglingKey)?;
                if child.priority <= node.priority {
                    return Err(InvariantViolation::RightOrder);
                }
                stack.push(Pending {
                    key: right,
                    parent: Some(key),
                    lower: Some(&node.priority),
                    upper,
                });
            }
        }

        if counted != self.len {
            return Err(InvariantViolation::LenMismatch {
                counted,
                len: self.len,
            });
        }
        self.check_reachable(counted)
    }

    /// Checks the chain hanging off tree node `head`; returns its length
    fn check_chain(&self, head: NodeKey) -> Result<usize, InvariantViolation> {
        let head_node = self.store.node(head);
        if head_node.is_chain_member != head_node.chain_next.is_some() {
            return Err(InvariantViolation::ChainFlag);
        }

        let mut length = 1;
        let mut prev = head;
        let mut next = head_node.chain_next;
        while let Some(key) = next {
            let member = self.store.get(key).ok_or(InvariantViolation::DanglingKey)?;
            if member.priority != head_node.priority {
                return Err(InvariantViolation::ChainPriority);
            }
            if member.left.is_some() || member.right.is_some() {
                return Err(InvariantViolation::ChainMemberHasChildren);
            }
            if member.parent != Some(prev) {
                return Err(InvariantViolation::BrokenChainLink);
            }
            if !member.is_chain_member {
                return Err(InvariantViolation::ChainFlag);
            }
            length += 1;
            prev = key;
            next = member.chain_next;
        }
        Ok(length)
    }

    fn check_reachable(&self, reachable: usize) -> Result<(), InvariantViolation> {
        let stored = self.store.len();
        if stored != reachable {
            return Err(InvariantViolation::UnreachableNodes { stored, reachable });
        }
        Ok(())
    }
}
