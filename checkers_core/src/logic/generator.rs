use crate::logic::board::{Board, Player, Position};
use serde::{Deserialize, Serialize};

/// Diagonal steps relative to the mover's forward direction. The first two are
/// the forward diagonals, the last two are only available to kings.
const DIAGONALS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Destinations reachable by one piece, split by move kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targets {
    pub normal: Vec<Position>,
    pub capture: Vec<Position>,
}

impl Targets {
    pub fn is_empty(&self) -> bool {
        self.normal.is_empty() && self.capture.is_empty()
    }
}

/// One origin square with every destination it may legally move to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub origin: Position,
    pub targets: Vec<Position>,
}

impl MoveEntry {
    pub const fn new(origin: Position, targets: Vec<Position>) -> Self {
        Self { origin, targets }
    }

    /// Iterates the entry as `(origin, target)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.targets.iter().map(move |&target| (self.origin, target))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub const fn new() -> Self {
        Self
    }

    /// Normal and capture destinations of the piece on `pos`. Read-only: the
    /// jumped piece stays on the board.
    pub fn targets_from(&self, board: &Board, pos: Position) -> Targets {
        let mut targets = Targets::default();
        let Some(piece) = board.get(pos) else {
            return targets;
        };
        let Some(owner) = piece.owner() else {
            return targets;
        };

        let sign = owner.forward();
        let directions = if piece.is_king() { 4 } else { 2 };

        for &(d_row, d_col) in DIAGONALS.iter().take(directions) {
            let (d_row, d_col) = (sign * d_row, sign * d_col);
            let Some(next) = board.step(pos, d_row, d_col) else {
                continue;
            };
            let neighbour = board.cell(next);
            if neighbour.is_empty() {
                targets.normal.push(next);
            } else if neighbour.belongs_to(owner.opposite()) {
                if let Some(landing) = board.step(next, d_row, d_col) {
                    if board.cell(landing).is_empty() {
                        targets.capture.push(landing);
                    }
                }
            }
        }
        targets
    }

    /// Capture destinations only; used when continuing a chain.
    pub fn captures_from(&self, board: &Board, pos: Position) -> Vec<Position> {
        self.targets_from(board, pos).capture
    }

    /// Legal moves for `player` with forced capture applied: if any piece can
    /// capture, only capturing pieces and their capture targets are returned.
    /// An empty result means `player` cannot move.
    pub fn moves_for(&self, board: &Board, player: Player) -> Vec<MoveEntry> {
        let mut normal_moves = Vec::new();
        let mut capture_moves = Vec::new();

        for (pos, _) in board.pieces_of(player) {
            let Targets { normal, capture } = self.targets_from(board, pos);
            if !normal.is_empty() {
                normal_moves.push(MoveEntry::new(pos, normal));
            }
            if !capture.is_empty() {
                capture_moves.push(MoveEntry::new(pos, capture));
            }
        }

        if capture_moves.is_empty() {
            normal_moves
        } else {
            capture_moves
        }
    }

    /// Returns `true` as soon as one piece of `player` has any destination.
    pub fn has_legal_moves(&self, board: &Board, player: Player) -> bool {
        board
            .pieces_of(player)
            .any(|(pos, _)| !self.targets_from(board, pos).is_empty())
    }
}
