//! Insertion Order Module
//!
//! Tracks the order in which keys were (re-)inserted, which drives eviction.

use std::collections::VecDeque;

// == Insertion Order ==
/// FIFO record of cache keys.
///
/// Keys are stored in a VecDeque where:
/// - Front = earliest inserted (next eviction candidate)
/// - Back = most recently inserted
///
/// Reads never reorder keys; only [`insert`](Self::insert) does.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Insert ==
    /// Records `key` as the newest insertion, dropping any earlier position.
    pub fn insert(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }

    // == Pop Oldest ==
    /// Removes and returns the earliest-inserted key, if any.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    // == Peek Oldest ==
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.front().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
