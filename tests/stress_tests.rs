//! Stress tests with large operation counts and degenerate tree shapes
//!
//! The tree is never rebalanced, so sorted input produces a path of depth n.
//! None of the walks recurse, so clone, equality, drop and traversal must all
//! cope with that depth.

use ordered_multi_queue::{OrderedMultiQueue, QueueError};

#[test]
fn test_massive_ascending_insert() {
    let mut queue = OrderedMultiQueue::new();
    for i in 0..10_000 {
        queue.insert(i, i);
    }
    assert_eq!(queue.len(), 10_000);
    assert_eq!(queue.root(), Some((&0, &0)));

    // Clone, compare and iterate over a right-leaning path
    let copy = queue.clone();
    assert!(copy == queue);
    assert!(queue.iter().map(|(p, _)| *p).eq(0..10_000));

    for i in 0..10_000 {
        assert_eq!(queue.remove_min().map(|e| e.value), Ok(i));
    }
    assert_eq!(queue.remove_min(), Err(QueueError::EmptyQueue));
    assert_eq!(copy.len(), 10_000);
}

#[test]
fn test_massive_descending_insert() {
    let mut queue = OrderedMultiQueue::new();
    for i in (0..10_000).rev() {
        queue.insert(i, i);
    }
    assert_eq!(queue.validate(), Ok(()));
    assert!(queue.render().into_iter().map(|(p, _)| *p).eq(0..10_000));

    queue.clear();
    assert!(queue.is_empty());
}

#[test]
fn test_long_duplicate_chain() {
    let mut queue = OrderedMultiQueue::new();
    for i in 0..5_000 {
        queue.insert(i, 42);
    }
    queue.insert(-1, 41);
    queue.insert(-2, 43);
    assert_eq!(queue.validate(), Ok(()));

    assert_eq!(queue.remove_min().map(|e| e.value), Ok(-1));
    for i in 0..5_000 {
        let entry = queue.remove_min().unwrap();
        assert_eq!((entry.priority, entry.value), (42, i));
    }
    assert_eq!(queue.remove_min().map(|e| e.value), Ok(-2));
    assert!(queue.is_empty());
}

#[test]
fn test_alternating_ops() {
    let mut queue = OrderedMultiQueue::new();
    let mut last = i32::MIN;

    for i in 0..2_000 {
        queue.insert(i, (i * 7919) % 1_000);
        queue.insert(i + 10_000, (i * 104_729) % 1_000);

        assert!(queue.remove_min().is_ok());
    }
    assert_eq!(queue.len(), 2_000);
    assert_eq!(queue.validate(), Ok(()));

    while let Ok(entry) = queue.remove_min() {
        assert!(entry.priority >= last);
        last = entry.priority;
    }
}

#[test]
fn test_pseudo_random_workload() {
    // Linear congruential generator so the run is reproducible
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        (state >> 33) as u32
    };

    let mut queue = OrderedMultiQueue::new();
    let mut inserted = 0usize;
    let mut removed = 0usize;

    for _ in 0..20_000 {
        if next() % 3 == 0 {
            if queue.remove_min().is_ok() {
                removed += 1;
            }
        } else {
            queue.insert(inserted, (next() % 500) as i32);
            inserted += 1;
        }
    }

    assert_eq!(queue.len(), inserted - removed);
    assert_eq!(queue.validate(), Ok(()));

    let mut last = (i32::MIN, 0usize);
    while let Ok(entry) = queue.remove_min() {
        let current = (entry.priority, entry.value);
        assert!(current > last, "{current:?} came out after {last:?}");
        last = current;
    }
}
