use crate::engine::config::{EngineConfig, WEIGHT_EDGE_ROW, WEIGHT_KING, WEIGHT_NORMAL};
use crate::engine::Evaluator;
use crate::logic::board::{Board, Player};
use crate::logic::state_counter::StateCounter;

/// Material with kings weighted above normals, plus a bonus for pieces
/// guarding the back edge row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicEvaluator {
    weight_normal: i32,
    weight_king: i32,
    weight_edge_row: i32,
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        Self::new(WEIGHT_NORMAL, WEIGHT_KING, WEIGHT_EDGE_ROW)
    }
}

impl HeuristicEvaluator {
    pub const fn new(weight_normal: i32, weight_king: i32, weight_edge_row: i32) -> Self {
        Self {
            weight_normal,
            weight_king,
            weight_edge_row,
        }
    }

    pub const fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.weight_normal,
            config.weight_king,
            config.weight_edge_row,
        )
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, board: &Board, maximizer: Player) -> i32 {
        let edge_row = maximizer.edge_row(board.size());
        let mut normals: i32 = 0;
        let mut kings: i32 = 0;
        let mut edge: i32 = 0;

        for (pos, cell) in board.pieces() {
            let own = cell.belongs_to(maximizer);
            let sign = if own { 1 } else { -1 };
            if cell.is_king() {
                kings += sign;
            } else {
                normals += sign;
            }
            if own && pos.row == edge_row {
                edge += 1;
            }
        }

        normals
            .saturating_mul(self.weight_normal)
            .saturating_add(kings.saturating_mul(self.weight_king))
            .saturating_add(edge.saturating_mul(self.weight_edge_row))
    }
}

/// Piece difference, every piece worth one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PieceCountEvaluator;

impl Evaluator for PieceCountEvaluator {
    fn evaluate(&self, board: &Board, maximizer: Player) -> i32 {
        board
            .pieces()
            .map(|(_, cell)| if cell.belongs_to(maximizer) { 1 } else { -1 })
            .sum()
    }
}

/// Repetition penalty for a side that is ahead on material: minus the number
/// of times the current position has been recorded. Zero otherwise.
pub fn state_value(board: &Board, counter: &StateCounter, maximizer: Player) -> i32 {
    let own = board.count(maximizer);
    let opponent = board.count(maximizer.opposite());
    if own > opponent {
        -i32::try_from(counter.count(board)).unwrap_or(i32::MAX)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Cell, Position};

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_heuristic_weights() {
        let mut board = Board::empty(8).unwrap();
        board.set(p(7, 0), Cell::BlackNormal); // black edge row
        board.set(p(4, 3), Cell::BlackKing);
        board.set(p(0, 1), Cell::WhiteNormal); // white edge row
        board.set(p(2, 3), Cell::WhiteNormal);

        let eval = HeuristicEvaluator::default();
        // Black: normals 1 - 2, kings 1, edge 1.
        assert_eq!(eval.evaluate(&board, Player::Black), -1000 + 3000 + 300);
        // White: normals 2 - 1, kings -1, edge 1.
        assert_eq!(eval.evaluate(&board, Player::White), 1000 - 3000 + 300);
    }

    #[test]
    fn test_edge_row_counts_only_own_pieces() {
        let mut board = Board::empty(8).unwrap();
        board.set(p(0, 1), Cell::BlackKing);
        let eval = HeuristicEvaluator::default();
        assert_eq!(eval.evaluate(&board, Player::White), -3000);
        assert_eq!(eval.evaluate(&board, Player::Black), 3000);
    }

    #[test]
    fn test_custom_weights() {
        let mut board = Board::empty(8).unwrap();
        board.set(p(3, 2), Cell::WhiteKing);
        let eval = HeuristicEvaluator::new(1, 10, 100);
        assert_eq!(eval.evaluate(&board, Player::White), 10);
    }

    #[test]
    fn test_huge_weights_saturate() {
        let board = Board::new(8).unwrap();
        let eval = HeuristicEvaluator::new(i32::MAX, i32::MAX, i32::MAX);
        assert_eq!(eval.evaluate(&board, Player::Black), i32::MAX);
        assert_eq!(eval.evaluate(&board, Player::White), i32::MAX);
    }

    #[test]
    fn test_piece_count() {
        let mut board = Board::empty(8).unwrap();
        board.set(p(3, 2), Cell::WhiteKing);
        board.set(p(5, 2), Cell::BlackNormal);
        board.set(p(5, 4), Cell::BlackNormal);
        assert_eq!(PieceCountEvaluator.evaluate(&board, Player::Black), 1);
        assert_eq!(PieceCountEvaluator.evaluate(&board, Player::White), -1);
    }

    #[test]
    fn test_state_value_penalises_only_the_side_ahead() {
        let mut board = Board::empty(8).unwrap();
        board.set(p(3, 2), Cell::WhiteKing);
        board.set(p(5, 2), Cell::BlackNormal);
        board.set(p(5, 4), Cell::BlackNormal);

        let mut counter = StateCounter::new();
        assert_eq!(state_value(&board, &counter, Player::Black), 0);

        counter.record(&board);
        counter.record(&board);
        assert_eq!(state_value(&board, &counter, Player::Black), -2);
        assert_eq!(state_value(&board, &counter, Player::White), 0);

        board.set(p(5, 4), Cell::Empty);
        assert_eq!(state_value(&board, &counter, Player::Black), 0);
    }
}
