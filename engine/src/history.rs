use std::collections::VecDeque;

use serde::Serialize;

use crate::roll::RollResult;

pub const DEFAULT_HISTORY_CAPACITY: usize = 20;
/// Largest capacity a config file may ask for.
pub const MAX_HISTORY_CAPACITY: usize = 1000;

/// Most-recent-first log of finished rolls, capped at `capacity` entries.
#[derive(Debug, Clone, Serialize)]
pub struct RollHistory {
    capacity: usize,
    entries: VecDeque<RollResult>,
}

impl Default for RollHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl RollHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    /// Record a roll, evicting the oldest once full.
    pub fn push(&mut self, roll: RollResult) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(roll);
    }

    pub fn latest(&self) -> Option<&RollResult> {
        self.entries.front()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &RollResult> {
        self.entries.iter()
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

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
