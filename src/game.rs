use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::render::{NullRenderer, Renderer, format_board};
use crate::types::{Action, Cell, Player, Position, Score, StepOutcome};

/// Reward reported on the final move, positive when B holds more tokens.
pub const TERMINAL_REWARD: i32 = 1000;

/// Reversi environment with a reset/step/render interface.
pub struct ReversiEngine {
    config: Config,
    initial: Board,
    board: Board,
    current_player: Player,
    is_terminal: bool,
    rng: StdRng,
    renderer: Box<dyn Renderer>,
}

impl ReversiEngine {
    pub fn new(config: Config, renderer: Box<dyn Renderer>) -> Result<Self> {
        let initial = Board::new(config.size)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut engine = Self {
            board: initial.clone(),
            initial,
            current_player: Player::A,
            is_terminal: false,
            rng,
            renderer,
            config,
        };
        engine.reset();
        Ok(engine)
    }

    /// Engine with a random starting player that draws nothing.
    pub fn with_size(size: usize) -> Result<Self> {
        Self::new(Config::with_size(size), Box::new(NullRenderer))
    }

    /// Restores the starting position and draws a new starting player.
    pub fn reset(&mut self) {
        self.board = self.initial.clone();
        self.is_terminal = false;
        self.current_player = match self.config.first_player {
            Some(player) => player,
            None if self.rng.gen_bool(0.5) => Player::B,
            None => Player::A,
        };
        tracing::debug!(
            size = self.config.size,
            first = ?self.current_player,
            "game reset"
        );
    }

    /// An action is legal when it is on the board, targets an empty cell,
    /// and touches at least one token. It does not have to capture.
    pub fn is_legal(&self, action: Action) -> bool {
        let Ok(pos) = self.board.position_of(action) else {
            return false;
        };
        self.board.get(pos.row, pos.col) == Some(Cell::Empty)
            && self.board.has_occupied_neighbour(pos)
    }

    pub fn legal_actions(&self) -> Vec<Action> {
        (0..self.action_space())
            .filter(|&action| self.is_legal(action))
            .collect()
    }

    /// Places the current player's token at `action`, flips captured
    /// tokens and passes the turn. Draws the new board.
    pub fn step(&mut self, action: Action) -> Result<StepOutcome> {
        if self.is_terminal {
            return Err(Error::GameOver);
        }
        if !self.is_legal(action) {
            tracing::trace!(action, player = ?self.current_player, "rejected move");
            return Err(Error::IllegalMove { action });
        }

        let pos = self.board.position_of(action)?;
        let player = self.current_player;
        let flipped = self.board.place(pos, player);
        self.current_player = player.opponent();
        self.is_terminal = self.board.is_full();

        let reward = self.reward();
        tracing::debug!(
            action,
            ?player,
            flipped = flipped.len(),
            reward,
            terminal = self.is_terminal,
            "move applied"
        );

        self.render();
        Ok(StepOutcome {
            board: self.board.rows(),
            reward,
            terminal: self.is_terminal,
            info: BTreeMap::new(),
            flipped,
        })
    }

    /// Sends the current board to the renderer.
    pub fn render(&mut self) {
        let frame = format_board(&self.board, None);
        self.renderer.render(&frame);
    }

    /// Sends the board with a cursor marker at `cursor` to the renderer.
    pub fn render_cursor(&mut self, cursor: Position) {
        let frame = format_board(&self.board, Some(cursor));
        self.renderer.render(&frame);
    }

    /// Returns the frame as a string instead of drawing it.
    pub fn render_text(&self, cursor: Option<Position>) -> String {
        format_board(&self.board, cursor)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Owned copy of the grid.
    pub fn snapshot(&self) -> Vec<Vec<Cell>> {
        self.board.rows()
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn size(&self) -> usize {
        self.config.size
    }

    pub fn action_space(&self) -> usize {
        self.board.len()
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    fn reward(&self) -> i32 {
        let Score { a, b } = self.board.score();
        if !self.is_terminal {
            b as i32 - a as i32
        } else if b > a {
            TERMINAL_REWARD
        } else {
            -TERMINAL_REWARD
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.board = board;
        self.current_player = current_player;
        self.is_terminal = self.board.is_full();
    }
}
