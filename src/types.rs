use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Row labels in board order. Their count caps the board size.
pub(crate) const ROW_LABELS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Letter for `row`, `?` past the last label.
pub(crate) fn row_label(row: usize) -> char {
    ROW_LABELS.chars().nth(row).unwrap_or('?')
}

/// Board action: a row-major cell index in `0..size * size`.
pub type Action = usize;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    /// Formats as the text-mode coordinate, e.g. `B3` for row 1, col 2.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", row_label(self.row), self.col + 1)
    }
}

/// One of the two sides. `A` is encoded as -1 and drawn as `x`,
/// `B` is encoded as +1 and drawn as `o`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    A,
    B,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::A => Cell::PlayerA,
            Player::B => Cell::PlayerB,
        }
    }

    pub fn value(self) -> i8 {
        self.cell().value()
    }

    pub fn symbol(self) -> char {
        self.cell().symbol()
    }
}

/// Content of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    PlayerA,
    PlayerB,
}

impl Cell {
    /// Numeric encoding: -1 for A, 0 for empty, +1 for B.
    pub fn value(self) -> i8 {
        match self {
            Cell::PlayerA => -1,
            Cell::Empty => 0,
            Cell::PlayerB => 1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::PlayerA => 'x',
            Cell::Empty => ' ',
            Cell::PlayerB => 'o',
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Token counts per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub a: usize,
    pub b: usize,
}

/// Result of one accepted `step`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    /// Copy of the board after the move, row by row.
    pub board: Vec<Vec<Cell>>,
    pub reward: i32,
    pub terminal: bool,
    /// Auxiliary info. Always empty for now.
    pub info: BTreeMap<String, String>,
    /// Contract:
    /// - Positions captured by the move, in ray order.
    /// - Never includes the placed cell itself.
    pub flipped: Vec<Position>,
}
