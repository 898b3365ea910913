use crate::logic::board::{Board, Player, Position};
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod search;


/// Scores a position from `maximizer`'s point of view. Larger is better for
/// `maximizer`.
pub trait Evaluator {
    fn evaluate(&self, board: &Board, maximizer: Player) -> i32;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u32,
    pub time_ms: u64,
}

/// Result of one engine turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOutcome {
    /// `false` when the side to move had no legal move; the opponent wins.
    pub has_further_play: bool,
    /// A piece was captured by the first move of the turn.
    pub reset_draw_counter: bool,
    /// Every `(from, to)` applied this turn, chain continuations included.
    pub moves_played: Vec<(Position, Position)>,
    pub stats: SearchStats,
}
