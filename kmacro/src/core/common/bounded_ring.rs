// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

/// A ring with a head (index 0) and a capacity that can change at runtime. Pushing onto
/// a full ring evicts the entry at the tail (the oldest one). Rotation moves entries
/// between the head and the tail without losing any of them.
///
/// ```text
/// push_head(d) on a full ring of capacity 3:
///
///   head            tail               head            tail
///   [ c ][ b ][ a ]          -->       [ d ][ c ][ b ]        a is evicted
///
/// rotate_next:
///
///   [ d ][ c ][ b ]          -->       [ c ][ b ][ d ]
/// ```
///
/// This is unlike a [`crate::KeySequence`], which grows without bound. The capacity of a
/// ring is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedRing<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedRing<T> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize { self.capacity }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn is_full(&self) -> bool { self.entries.len() >= self.capacity }

    #[must_use]
    pub fn head(&self) -> Option<&T> { self.entries.front() }

    pub fn head_mut(&mut self) -> Option<&mut T> { self.entries.front_mut() }

    /// Index 0 is the head.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> { self.entries.get(index) }

    /// Returns the evicted tail entry, if the ring was full.
    pub fn push_head(&mut self, value: T) -> Option<T> {
        let evicted = if self.is_full() {
            self.entries.pop_back()
        } else {
            None
        };
        self.entries.push_front(value);
        evicted
    }

    pub fn pop_head(&mut self) -> Option<T> { self.entries.pop_front() }

    /// The head moves to the tail, and the second entry becomes the head.
    pub fn rotate_next(&mut self) {
        if self.entries.len() > 1 {
            self.entries.rotate_left(1);
        }
    }

    /// The tail moves to the head.
    pub fn rotate_previous(&mut self) {
        if self.entries.len() > 1 {
            self.entries.rotate_right(1);
        }
    }

    /// Exchange the head with the second entry. Returns `false` if there are fewer than
    /// two entries.
    pub fn swap_head(&mut self) -> bool {
        if self.entries.len() < 2 {
            return false;
        }
        self.entries.swap(0, 1);
        true
    }

    /// Shrinking drops entries from the tail, and returns them (oldest last).
    pub fn set_capacity(&mut self, capacity: usize) -> Vec<T> {
        self.capacity = capacity.max(1);
        let keep = self.capacity.min(self.entries.len());
        self.entries.split_off(keep).into_iter().collect()
    }

    pub fn clear(&mut self) { self.entries.clear(); }

    /// Head first.
    pub fn iter(&self) -> impl Iterator<Item = &T> { self.entries.iter() }
}

impl<T> Default for BoundedRing<T> {
    fn default() -> Self { Self::new(1) }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ring_of(capacity: usize, head_first: &[char]) -> BoundedRing<char> {
        let mut ring = BoundedRing::new(capacity);
        for it in head_first.iter().rev() {
            ring.push_head(*it);
        }
        ring
    }

    fn contents(ring: &BoundedRing<char>) -> Vec<char> { ring.iter().copied().collect() }

    #[test]
    fn test_push_evicts_tail_when_full() {
        let mut ring = ring_of(3, &['c', 'b', 'a']);
        assert!(ring.is_full());
        assert_eq!(ring.push_head('d'), Some('a'));
        assert_eq!(contents(&ring), vec!['d', 'c', 'b']);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_rotate_is_reversible() {
        let mut ring = ring_of(4, &['a', 'b', 'c']);
        ring.rotate_next();
        assert_eq!(contents(&ring), vec!['b', 'c', 'a']);
        ring.rotate_previous();
        assert_eq!(contents(&ring), vec!['a', 'b', 'c']);

        let mut single = ring_of(4, &['a']);
        single.rotate_next();
        assert_eq!(contents(&single), vec!['a']);
    }

    #[test]
    fn test_swap_head() {
        let mut ring = ring_of(4, &['a', 'b', 'c']);
        assert!(ring.swap_head());
        assert_eq!(contents(&ring), vec!['b', 'a', 'c']);

        let mut single = ring_of(4, &['a']);
        assert!(!single.swap_head());
    }

    #[test]
    fn test_shrink_capacity_drops_tail() {
        let mut ring = ring_of(4, &['a', 'b', 'c', 'd']);
        assert_eq!(ring.set_capacity(2), vec!['c', 'd']);
        assert_eq!(contents(&ring), vec!['a', 'b']);
        assert_eq!(ring.capacity(), 2);

        assert!(ring.set_capacity(0).is_empty());
        assert_eq!(ring.capacity(), 1);
        assert_eq!(contents(&ring), vec!['a']);
    }

    #[test]
    fn test_pop_head() {
        let mut ring = ring_of(3, &['a', 'b']);
        assert_eq!(ring.pop_head(), Some('a'));
        assert_eq!(ring.head(), Some(&'b'));
        assert_eq!(ring.pop_head(), Some('b'));
        assert_eq!(ring.pop_head(), None);
        assert!(ring.is_empty());
    }
}
