use crate::error::{Error, Result};
use crate::types::{Action, Cell, Player, Position, ROW_LABELS, Score};

const MIN_SIZE: usize = 4;
const MAX_SIZE: usize = ROW_LABELS.len();
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Square Reversi board stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates the initial board: A on the main diagonal of the center
    /// 2x2 block, B on the anti-diagonal.
    pub fn new(size: usize) -> Result<Self> {
        let mut board = Self::empty(size)?;
        let p = size / 2;
        board.set(p - 1, p - 1, Cell::PlayerA);
        board.set(p, p, Cell::PlayerA);
        board.set(p - 1, p, Cell::PlayerB);
        board.set(p, p - 1, Cell::PlayerB);
        Ok(board)
    }

    /// Creates a board with no tokens on it.
    pub fn empty(size: usize) -> Result<Self> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) || size % 2 != 0 {
            return Err(Error::InvalidBoardSize { size });
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of actions, i.e. `size * size`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `None` when `(row, col)` is off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Caller contract: `(row, col)` is on the board.
    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        debug_assert!(row < self.size && col < self.size);
        self.cells[row * self.size + col] = cell;
    }

    pub fn position_of(&self, action: Action) -> Result<Position> {
        if action >= self.len() {
            return Err(Error::ActionOutOfRange {
                action,
                size: self.size,
            });
        }
        Ok(Position::new(action / self.size, action % self.size))
    }

    pub fn action_of(&self, pos: Position) -> Result<Action> {
        if pos.row >= self.size || pos.col >= self.size {
            return Err(Error::InvalidCoordinate {
                input: format!("({}, {})", pos.row, pos.col),
            });
        }
        Ok(pos.row * self.size + pos.col)
    }

    /// True when any in-board cell among the 8 neighbours of `pos` holds a token.
    pub fn has_occupied_neighbour(&self, pos: Position) -> bool {
        DIRECTIONS.iter().any(|&(dr, dc)| {
            self.offset(pos, dr, dc)
                .and_then(|next| self.get(next.row, next.col))
                .is_some_and(|cell| !cell.is_empty())
        })
    }

    /// Cells that `player` would capture by placing at `pos`, computed
    /// against the current board.
    pub fn collect_flips(&self, pos: Position, player: Player) -> Vec<Position> {
        let me = player.cell();
        let opp = player.opponent().cell();
        let mut flips = Vec::new();

        for (dr, dc) in DIRECTIONS {
            let mut line = Vec::new();
            let mut next = self.offset(pos, dr, dc);

            while let Some(square) = next {
                match self.get(square.row, square.col) {
                    Some(cell) if cell == opp => line.push(square),
                    Some(cell) if cell == me => {
                        flips.append(&mut line);
                        break;
                    }
                    _ => break,
                }
                next = self.offset(square, dr, dc);
            }
        }

        flips
    }

    /// Places one token for `player` and flips captured tokens.
    /// Returns the flipped positions. Legality is the caller's concern.
    pub fn place(&mut self, pos: Position, player: Player) -> Vec<Position> {
        let flips = self.collect_flips(pos, player);
        self.set(pos.row, pos.col, player.cell());
        for square in &flips {
            self.set(square.row, square.col, player.cell());
        }
        flips
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn score(&self) -> Score {
        Score {
            a: self.count(Cell::PlayerA),
            b: self.count(Cell::PlayerB),
        }
    }

    pub fn empty_count(&self) -> usize {
        self.count(Cell::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Owned copy of the grid, row by row.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.size).map(<[Cell]>::to_vec).collect()
    }

    /// Flattened row-major -1/0/+1 encoding.
    pub fn to_values(&self) -> Vec<i8> {
        self.cells.iter().map(|cell| cell.value()).collect()
    }

    fn offset(&self, pos: Position, dr: isize, dc: isize) -> Option<Position> {
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        (row < self.size && col < self.size).then(|| Position::new(row, col))
    }

    /// Builds a board from rows of `x`, `o` and `.` characters.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::empty(rows.len()).unwrap();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    'x' => Cell::PlayerA,
                    'o' => Cell::PlayerB,
                    _ => Cell::Empty,
                };
                board.set(row, col, cell);
            }
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn new_places_starting_cross_for_every_even_size() {
        for size in [4, 6, 8, 10] {
            let board = Board::new(size).unwrap();
            let p = size / 2;

            assert_eq!(board.empty_count(), size * size - 4);
            assert_eq!(board.get(p - 1, p - 1), Some(Cell::PlayerA));
            assert_eq!(board.get(p, p), Some(Cell::PlayerA));
            assert_eq!(board.get(p - 1, p), Some(Cell::PlayerB));
            assert_eq!(board.get(p, p - 1), Some(Cell::PlayerB));
        }
    }

    #[test]
    fn odd_small_or_oversized_sizes_are_rejected() {
        for size in [0, 2, 3, 5, 7, 27, 28, 192] {
            assert!(matches!(
                Board::new(size),
                Err(Error::InvalidBoardSize { size: s }) if s == size
            ));
        }
    }

    #[test]
    fn largest_board_uses_last_row_letter() {
        let board = Board::new(26).unwrap();
        let frame = crate::render::format_board(&board, None);

        assert!(frame.lines().nth(27).unwrap().starts_with("Z |"));
        assert_eq!(Position::new(25, 25).to_string(), "Z26");
    }

    #[test]
    fn action_position_conversion_round_trips() {
        let board = Board::new(6).unwrap();
        for action in 0..board.len() {
            let position = board.position_of(action).unwrap();
            assert_eq!(board.action_of(position).unwrap(), action);
        }
        assert_eq!(board.position_of(9).unwrap(), pos(1, 3));
    }

    #[test]
    fn out_of_range_conversions_fail() {
        let board = Board::new(4).unwrap();
        assert!(matches!(
            board.position_of(16),
            Err(Error::ActionOutOfRange { action: 16, size: 4 })
        ));
        assert!(matches!(
            board.action_of(pos(0, 4)),
            Err(Error::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn neighbour_check_ignores_off_board_cells() {
        let board = Board::new(4).unwrap();

        assert!(board.has_occupied_neighbour(pos(0, 0)));
        assert!(board.has_occupied_neighbour(pos(3, 3)));

        let board = Board::from_rows(&["x...", "....", "....", "...."]);
        assert!(!board.has_occupied_neighbour(pos(3, 3)));
        assert!(!board.has_occupied_neighbour(pos(0, 0)));
        assert!(board.has_occupied_neighbour(pos(1, 1)));
    }

    #[test]
    fn flips_bounded_run_and_stops_at_anchor() {
        let mut board = Board::from_rows(&[
            "......", //
            ".oox..",
            "......",
            "......",
            "......",
            "......",
        ]);

        let flips = board.place(pos(1, 0), Player::A);

        assert_eq!(flips, vec![pos(1, 1), pos(1, 2)]);
        assert_eq!(board.count(Cell::PlayerA), 4);
        assert_eq!(board.count(Cell::PlayerB), 0);
    }

    #[test]
    fn opponent_tokens_past_the_anchor_are_left_alone() {
        let mut board = Board::from_rows(&[
            "......", //
            ".oxo..",
            "......",
            "......",
            "......",
            "......",
        ]);

        let flips = board.place(pos(1, 0), Player::A);

        assert_eq!(flips, vec![pos(1, 1)]);
        assert_eq!(board.get(1, 3), Some(Cell::PlayerB));
        assert_eq!(board.score(), Score { a: 3, b: 1 });
    }

    #[test]
    fn runs_ending_at_gap_or_edge_are_not_flipped() {
        let mut board = Board::from_rows(&[
            "......", //
            ".oo.x.",
            ".o....",
            ".o....",
            "......",
            "......",
        ]);
        let before = board.score();

        let flips = board.place(pos(1, 0), Player::A);

        assert!(flips.is_empty());
        assert_eq!(board.score().b, before.b);
        assert_eq!(board.get(1, 0), Some(Cell::PlayerA));
    }

    #[test]
    fn flips_from_several_directions_are_combined() {
        let mut board = Board::from_rows(&[
            "x.x.", //
            "oo..",
            "....",
            "x...",
        ]);

        let mut flips = board.place(pos(2, 0), Player::A);
        flips.sort_by_key(|p| (p.row, p.col));

        // up: (1,0) anchored by (0,0); up-right: (1,1) anchored by (0,2)
        assert_eq!(flips, vec![pos(1, 0), pos(1, 1)]);
        assert_eq!(board.count(Cell::PlayerB), 0);
    }

    #[test]
    fn scenario_on_starting_board_of_size_four() {
        let board = Board::new(4).unwrap();

        assert!(board.collect_flips(pos(0, 1), Player::A).is_empty());
        assert_eq!(board.collect_flips(pos(0, 1), Player::B), vec![pos(1, 1)]);
    }

    #[test]
    fn rows_returns_an_independent_copy() {
        let board = Board::new(4).unwrap();
        let mut rows = board.rows();
        rows[0][0] = Cell::PlayerB;

        assert_eq!(board.get(0, 0), Some(Cell::Empty));
        assert_eq!(board.to_values()[5], -1);
    }
}
