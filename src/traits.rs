//! Common heap interface
//!
//! [`Heap`] is the minimal ordering primitive a consumer needs from a priority
//! queue: push an item with a priority, look at the minimum, and take it out.
//! Code written against this trait (a Huffman tree builder, a scheduler, a
//! shortest-path search) can be backed by
//! [`OrderedMultiQueue`](crate::OrderedMultiQueue) or by any other min-heap.
//!
//! Unlike `std::collections::BinaryHeap`, which stores values directly and is a
//! max-heap, implementors store `(priority, item)` pairs and serve the smallest
//! priority first.

/// Base trait for min-priority queues
///
/// # Example
///
/// ```rust
/// use ordered_multi_queue::{Heap, OrderedMultiQueue};
///
/// fn drain_all<H: Heap<&'static str, u32>>(mut heap: H) -> Vec<&'static str> {
///     let mut out = Vec::new();
///     while let Some((_, item)) = heap.pop() {
///         out.push(item);
///     }
///     out
/// }
///
/// let mut queue: OrderedMultiQueue<&str, u32> = Heap::new();
/// queue.push(3, "three");
/// queue.push(1, "one");
/// queue.push(1, "uno");
///
/// assert_eq!(drain_all(queue), vec!["one", "uno", "three"]);
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// Implementations with stable ordering return equal priorities in the
    /// order they were pushed.
    fn pop(&mut self) -> Option<(P, T)>;
}
