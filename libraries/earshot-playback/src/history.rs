//! Shuffle history tracking
//!
//! Remembers the queue positions left behind by shuffled "next" jumps so
//! "previous" can walk back through them.

use std::collections::VecDeque;

/// Bounded history of queue indices
///
/// Ring buffer: once full, the oldest entry is discarded.
#[derive(Debug, Clone)]
pub struct History {
    /// Visited indices (most recent = back)
    indices: VecDeque<usize>,

    /// Maximum history size
    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            indices: VecDeque::new(),
            max_size,
        }
    }

    /// Record a departed index
    ///
    /// If history is full, oldest entry is discarded
    pub fn push(&mut self, index: usize) {
        if self.max_size == 0 {
            return;
        }
        if self.indices.len() >= self.max_size {
            self.indices.pop_front();
        }
        self.indices.push_back(index);
    }

    /// Pop most recent index
    pub fn pop(&mut self) -> Option<usize> {
        self.indices.pop_back()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(50)
    }
}
