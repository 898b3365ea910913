use crate::logic::board::Board;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Visit counts of board fingerprints seen during one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounter {
    counts: HashMap<i64, u32>,
}

impl StateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more visit of the board's current position.
    pub fn record(&mut self, board: &Board) -> u32 {
        let count = self.counts.entry(board.encode()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, board: &Board) -> u32 {
        self.count_encoded(board.encode())
    }

    pub fn count_encoded(&self, encoded: i64) -> u32 {
        self.counts.get(&encoded).copied().unwrap_or(0)
    }

    /// Number of distinct positions recorded.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
