//! Bounded undo history

use std::collections::VecDeque;

use tracing::debug;

use crate::layers::LayerId;
use crate::surface::PixelBuffer;

/// Pre-modification copy of one layer's pixels
#[derive(Debug, Clone)]
pub struct LayerSnapshot {
    /// Layer the snapshot was taken from
    pub layer_id: LayerId,
    pub buffer: PixelBuffer,
}

/// Bounded LIFO; pushing past capacity evicts the oldest entry
#[derive(Debug, Clone)]
pub struct HistoryStack<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> HistoryStack<T> {
    /// A capacity of zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            debug!("History full ({}), evicted oldest entry", self.capacity);
        }
    }

    /// Most recent entry, or `None` when there is nothing to undo
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    pub fn peek(&self) -> Option<&T> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, evicting the oldest entries if needed
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_lifo() {
        let mut history = HistoryStack::new(20);
        history.push(1);
        history.push(2);
        assert_eq!(history.pop(), Some(2));
        assert_eq!(history.pop(), Some(1));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn test_overflow_keeps_most_recent() {
        let mut history = HistoryStack::new(20);
        for i in 0..27 {
            history.push(i);
        }

        assert_eq!(history.len(), 20);
        let kept: Vec<_> = history.iter().copied().collect();
        assert_eq!(kept, (7..27).collect::<Vec<_>>());
        assert_eq!(history.peek(), Some(&26));
    }

    #[test]
    fn test_pop_empty_is_noop() {
        let mut history: HistoryStack<LayerSnapshot> = HistoryStack::new(20);
        assert!(history.pop().is_none());
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 20);
    }

    #[test]
    fn test_shrink_capacity_drops_oldest() {
        let mut history = HistoryStack::new(5);
        for i in 0..5 {
            history.push(i);
        }
        history.set_capacity(2);
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), [3, 4]);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut history = HistoryStack::new(0);
        history.push("a");
        history.push("b");
        assert_eq!(history.len(), 1);
        assert_eq!(history.pop(), Some("b"));
    }
}
