use crate::logic::board::{Board, Cell, Position};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("position {0} is off the board")]
    OutOfBounds(Position),
    #[error("no piece at {0}")]
    NoPieceAtSource(Position),
    #[error("target square {0} is occupied")]
    TargetOccupied(Position),
    #[error("{from} -> {to} is not a one- or two-step diagonal move for this piece")]
    InvalidMovePattern { from: Position, to: Position },
    #[error("{from} -> {to} jumps over a square without an opponent piece")]
    NothingToCapture { from: Position, to: Position },
    #[error("{from} -> {to} is not among the legal moves")]
    IllegalMove { from: Position, to: Position },
    #[error("the piece on {0} must finish its capture chain")]
    ChainPending(Position),
    #[error("the game is already over")]
    GameOver,
}

/// What `Board::apply` did, and everything `Board::revoke` needs to undo it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The move captured and did not promote, so the piece may keep jumping.
    pub can_chain: bool,
    /// Piece removed from the jumped square, `Cell::Empty` for a step.
    pub removed: Cell,
    pub promoted: bool,
}

impl MoveOutcome {
    pub const fn is_capture(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Checks the geometry of `from -> to` against the current board without
/// mutating it.
pub fn validate_move(board: &Board, from: Position, to: Position) -> Result<(), MoveError> {
    if !board.contains(from) {
        return Err(MoveError::OutOfBounds(from));
    }
    if !board.contains(to) {
        return Err(MoveError::OutOfBounds(to));
    }

    let piece = board.cell(from);
    let Some(owner) = piece.owner() else {
        return Err(MoveError::NoPieceAtSource(from));
    };
    if !board.cell(to).is_empty() {
        return Err(MoveError::TargetOccupied(to));
    }

    let d_row = to.row as isize - from.row as isize;
    let d_col = to.col as isize - from.col as isize;
    let distance = d_row.abs();
    if distance != d_col.abs() || !(1..=2).contains(&distance) {
        return Err(MoveError::InvalidMovePattern { from, to });
    }
    if !piece.is_king() && d_row.signum() != owner.forward() {
        return Err(MoveError::InvalidMovePattern { from, to });
    }
    if distance == 2 && !board.cell(from.midpoint(to)).belongs_to(owner.opposite()) {
        return Err(MoveError::NothingToCapture { from, to });
    }
    Ok(())
}

impl Board {
    /// Moves the piece on `from` to `to`, removing a jumped piece and crowning
    /// a normal piece that reaches its promotion row. The board is untouched
    /// when an error is returned.
    pub fn apply(&mut self, from: Position, to: Position) -> Result<MoveOutcome, MoveError> {
        validate_move(self, from, to)?;

        let mut piece = self.cell(from);
        self.set(from, Cell::Empty);

        let is_capture = from.row_distance(to) == 2;
        let mut removed = Cell::Empty;
        if is_capture {
            let jumped = from.midpoint(to);
            removed = self.cell(jumped);
            self.set(jumped, Cell::Empty);
        }

        let promoted = match piece.owner() {
            Some(owner) if !piece.is_king() && to.row == owner.promotion_row(self.size()) => {
                piece = piece.promoted();
                true
            }
            _ => false,
        };
        self.set(to, piece);

        Ok(MoveOutcome {
            // A crowning move always ends the turn.
            can_chain: is_capture && !promoted,
            removed,
            promoted,
        })
    }

    /// Exact inverse of the `apply(from, to)` that produced `outcome`. Calls
    /// must unwind applies in last-in-first-out order.
    pub fn revoke(&mut self, from: Position, to: Position, outcome: MoveOutcome) {
        let mut piece = self.cell(to);
        debug_assert!(!piece.is_empty(), "revoke: no piece on {to}");
        debug_assert!(self.cell(from).is_empty(), "revoke: {from} is occupied");

        if outcome.promoted {
            piece = piece.demoted();
        }
        self.set(from, piece);
        self.set(to, Cell::Empty);

        if from.row_distance(to) == 2 {
            self.set(from.midpoint(to), outcome.removed);
        }
    }
}
