use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Added to every square index when fingerprinting so each weight exceeds the
/// largest cell value.
const ENCODE_WEIGHT_OFFSET: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Row delta of a forward step.
    pub const fn forward(self) -> isize {
        match self {
            Self::Black => -1,
            Self::White => 1,
        }
    }

    /// Row on which this player's normal pieces are crowned.
    pub const fn promotion_row(self, size: usize) -> usize {
        match self {
            Self::Black => 0,
            Self::White => size - 1,
        }
    }

    /// Row scored by the edge-row term of the heuristic.
    pub const fn edge_row(self, size: usize) -> usize {
        match self {
            Self::Black => size - 1,
            Self::White => 0,
        }
    }

    pub const fn king(self) -> Cell {
        match self {
            Self::Black => Cell::BlackKing,
            Self::White => Cell::WhiteKing,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => write!(f, "Black"),
            Self::White => write!(f, "White"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    WhiteNormal = 1,
    BlackNormal = 2,
    WhiteKing = 3,
    BlackKing = 4,
}

impl Cell {
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_king(self) -> bool {
        matches!(self, Self::WhiteKing | Self::BlackKing)
    }

    /// Owning side, decided by the parity of the cell value.
    pub const fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            _ if self.value() % 2 == 0 => Some(Player::Black),
            _ => Some(Player::White),
        }
    }

    pub fn belongs_to(self, player: Player) -> bool {
        self.owner() == Some(player)
    }

    #[must_use]
    pub const fn promoted(self) -> Self {
        match self {
            Self::WhiteNormal => Self::WhiteKing,
            Self::BlackNormal => Self::BlackKing,
            other => other,
        }
    }

    #[must_use]
    pub const fn demoted(self) -> Self {
        match self {
            Self::WhiteKing => Self::WhiteNormal,
            Self::BlackKing => Self::BlackNormal,
            other => other,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::WhiteNormal => 'w',
            Self::BlackNormal => 'b',
            Self::WhiteKing => 'W',
            Self::BlackKing => 'B',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Empty),
            'w' => Some(Self::WhiteNormal),
            'b' => Some(Self::BlackNormal),
            'W' => Some(Self::WhiteKing),
            'B' => Some(Self::BlackKing),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Square halfway between `self` and `other` on a two-step diagonal.
    #[must_use]
    pub const fn midpoint(self, other: Self) -> Self {
        Self {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }

    pub const fn row_distance(self, other: Self) -> usize {
        self.row.abs_diff(other.row)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size {0} is not supported (must be even and at least 4)")]
    InvalidSize(usize),
    #[error("layout row {row} has {found} cells, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown layout symbol {0:?}")]
    UnknownSymbol(char),
    #[error("grid has {found} cells, expected {expected}")]
    GridLength { expected: usize, found: usize },
}

/// Wire form of `Board`, checked before it becomes one.
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    grid: Vec<Cell>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        Self::check_size(raw.size)?;
        let expected = raw
            .size
            .checked_mul(raw.size)
            .ok_or(BoardError::InvalidSize(raw.size))?;
        if raw.grid.len() != expected {
            return Err(BoardError::GridLength {
                expected,
                found: raw.grid.len(),
            });
        }
        Ok(Self {
            size: raw.size,
            grid: raw.grid,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    // Row-major, `size * size` cells.
    grid: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard(DEFAULT_BOARD_SIZE)
    }
}

impl Board {
    /// Board of the given size in the standard starting layout.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Self::check_size(size)?;
        Ok(Self::standard(size))
    }

    /// Board of the given size with no pieces on it.
    pub fn empty(size: usize) -> Result<Self, BoardError> {
        Self::check_size(size)?;
        Ok(Self {
            size,
            grid: vec![Cell::Empty; size * size],
        })
    }

    pub fn check_size(size: usize) -> Result<(), BoardError> {
        if size < 4 || size % 2 != 0 {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(())
    }

    fn standard(size: usize) -> Self {
        let mut grid = vec![Cell::Empty; size * size];
        let half = size / 2;
        for row in 0..size {
            let piece = if row + 1 < half {
                Cell::WhiteNormal
            } else if row > half {
                Cell::BlackNormal
            } else {
                continue;
            };
            for col in (0..size).filter(|col| (row + col) % 2 == 1) {
                grid[row * size + col] = piece;
            }
        }
        Self { size, grid }
    }

    /// Parses a `/`-separated layout such as `".b.b/..../w.w./...."`.
    pub fn from_layout(layout: &str) -> Result<Self, BoardError> {
        let rows: Vec<&str> = layout
            .split('/')
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        let size = rows.len();
        Self::check_size(size)?;

        let mut grid = Vec::with_capacity(size * size);
        for (row, text) in rows.iter().enumerate() {
            let found = text.chars().count();
            if found != size {
                return Err(BoardError::RaggedLayout {
                    row,
                    expected: size,
                    found,
                });
            }
            for symbol in text.chars() {
                grid.push(Cell::from_symbol(symbol).ok_or(BoardError::UnknownSymbol(symbol))?);
            }
        }
        Ok(Self { size, grid })
    }

    pub fn to_layout_string(&self) -> String {
        self.grid
            .chunks(self.size)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub fn is_on_board(&self, row: isize, col: isize) -> bool {
        let size = self.size as isize;
        (0..size).contains(&row) && (0..size).contains(&col)
    }

    /// Square reached from `pos` by `(d_row, d_col)`, if it is on the board.
    pub fn step(&self, pos: Position, d_row: isize, d_col: isize) -> Option<Position> {
        let row = pos.row as isize + d_row;
        let col = pos.col as isize + d_col;
        if self.is_on_board(row, col) {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "position {pos} is outside a {0}x{0} board",
            self.size
        );
        pos.row * self.size + pos.col
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.contains(pos) {
            self.grid.get(pos.row * self.size + pos.col).copied()
        } else {
            None
        }
    }

    /// Cell at `pos`. Panics when `pos` is off the board.
    pub fn cell(&self, pos: Position) -> Cell {
        self.grid[self.index(pos)]
    }

    /// Overwrites the cell at `pos`. Panics when `pos` is off the board.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let idx = self.index(pos);
        self.grid[idx] = cell;
    }

    /// Integer fingerprint: sum of `(row * size + col + 7) * value` over all cells.
    pub fn encode(&self) -> i64 {
        self.grid
            .iter()
            .enumerate()
            .map(|(idx, cell)| (idx as i64 + ENCODE_WEIGHT_OFFSET) * i64::from(cell.value()))
            .sum()
    }

    /// Independent copy of the grid for renderers and history.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.grid.chunks(self.size)
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(idx, &cell)| (Position::new(idx / self.size, idx % self.size), cell))
    }

    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.pieces().filter(move |(_, cell)| cell.belongs_to(player))
    }

    pub fn count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.size {
            write!(f, " {}", col % 10)?;
        }
        writeln!(f)?;
        for (row, cells) in self.rows().enumerate() {
            write!(f, "{:>2}", row)?;
            for cell in cells {
                write!(f, " {}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
