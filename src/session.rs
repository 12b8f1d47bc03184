//! Interactive turn loop

use std::io::Write;

use crate::board::Board;
use crate::error::Result;
use crate::game::ReversiEngine;
use crate::input::{Input, InputProvider, Key, parse_coordinate};
use crate::types::{Action, Cell, Position, Score};

/// How moves are entered. Both modes accept both kinds of input; cursor
/// mode additionally draws the cursor after every key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    Cursor,
    #[default]
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub moves: usize,
    pub final_reward: Option<i32>,
    pub terminal: bool,
    pub score: Score,
}

/// One interactive game: owns the engine and drives it from `input`,
/// writing prompts and rewards to `out`.
pub struct Session<P, W> {
    engine: ReversiEngine,
    input: P,
    out: W,
    mode: InputMode,
    cursor: Position,
}

impl<P: InputProvider, W: Write> Session<P, W> {
    pub fn new(engine: ReversiEngine, input: P, out: W, mode: InputMode) -> Self {
        let cursor = first_open_cell(&engine);
        Self {
            engine,
            input,
            out,
            mode,
            cursor,
        }
    }

    pub fn engine(&self) -> &ReversiEngine {
        &self.engine
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Plays until the board is full, the input ends, or the player quits.
    /// Illegal moves and bad coordinates are reported and the same player
    /// is asked again.
    pub fn run(&mut self) -> Result<SessionSummary> {
        let mut moves = 0;
        let mut final_reward = None;

        if self.mode == InputMode::Text {
            self.engine.render();
        }

        while !self.engine.is_terminal() {
            let player = self.engine.current_player();
            writeln!(self.out, "Player {} to move", player.symbol())?;

            let Some(action) = self.next_action()? else {
                tracing::info!(moves, "session ended before the board was full");
                break;
            };

            match self.engine.step(action) {
                Ok(outcome) => {
                    moves += 1;
                    final_reward = Some(outcome.reward);
                    let pos = self.engine.board().position_of(action)?;
                    writeln!(self.out, "{} played {pos}", player.symbol())?;
                    writeln!(self.out, "Reward: {}", outcome.reward)?;
                    let under_cursor = self.engine.board().get(self.cursor.row, self.cursor.col);
                    if under_cursor != Some(Cell::Empty) {
                        self.cursor = first_open_cell(&self.engine);
                    }
                }
                Err(err) if err.is_recoverable() => writeln!(self.out, "Error: {err}")?,
                Err(err) => return Err(err),
            }
        }

        let score = self.engine.score();
        if self.engine.is_terminal() {
            writeln!(self.out, "Game over. x: {}, o: {}", score.a, score.b)?;
        }
        self.out.flush()?;

        Ok(SessionSummary {
            moves,
            final_reward,
            terminal: self.engine.is_terminal(),
            score,
        })
    }

    /// Reads input until it names a cell. `None` on quit or end of input.
    fn next_action(&mut self) -> Result<Option<Action>> {
        loop {
            if self.mode == InputMode::Cursor {
                self.engine.render_cursor(self.cursor);
            }

            let Some(input) = self.input.next_input()? else {
                return Ok(None);
            };

            match input {
                Input::Command(text) if is_quit(&text) => return Ok(None),
                Input::Command(text) => {
                    let board = self.engine.board();
                    let action = parse_coordinate(&text, board.size())
                        .and_then(|pos| board.action_of(pos));
                    match action {
                        Ok(action) => return Ok(Some(action)),
                        Err(err) => writeln!(self.out, "Error: {err}")?,
                    }
                }
                Input::Key(Key::Enter) => {
                    return self.engine.board().action_of(self.cursor).map(Some);
                }
                Input::Key(Key::Char('q')) => return Ok(None),
                Input::Key(Key::Char(other)) => tracing::trace!(?other, "ignored key"),
                Input::Key(key) => {
                    self.cursor = shift_cursor(self.engine.board(), self.cursor, key);
                }
            }
        }
    }
}

fn is_quit(text: &str) -> bool {
    text.eq_ignore_ascii_case("q") || text.eq_ignore_ascii_case("quit")
}

/// First legal cell, else the first empty one, else the top-left corner.
fn first_open_cell(engine: &ReversiEngine) -> Position {
    let board = engine.board();
    engine
        .legal_actions()
        .first()
        .copied()
        .and_then(|action| board.position_of(action).ok())
        .or_else(|| first_empty_cell(board))
        .unwrap_or(Position::new(0, 0))
}

fn first_empty_cell(board: &Board) -> Option<Position> {
    let size = board.size();
    (0..size)
        .flat_map(|row| (0..size).map(move |col| Position::new(row, col)))
        .find(|pos| board.get(pos.row, pos.col) == Some(Cell::Empty))
}

/// Moves the cursor in the direction of `key` to the nearest empty cell,
/// skipping occupied ones. Stays put when there is none.
fn shift_cursor(board: &Board, from: Position, key: Key) -> Position {
    let (dr, dc) = match key {
        Key::Up => (-1, 0),
        Key::Down => (1, 0),
        Key::Left => (0, -1),
        Key::Right => (0, 1),
        Key::Enter | Key::Char(_) => return from,
    };

    let mut pos = from;
    loop {
        let (Some(row), Some(col)) = (
            pos.row.checked_add_signed(dr),
            pos.col.checked_add_signed(dc),
        ) else {
            return from;
        };
        match board.get(row, col) {
            Some(cell) if cell.is_empty() => return Position::new(row, col),
            Some(_) => pos = Position::new(row, col),
            None => return from,
        }
    }
}
