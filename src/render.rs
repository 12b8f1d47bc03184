//! Text rendering of board frames

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use crate::board::Board;
use crate::types::{Position, row_label};

const CURSOR_SYMBOL: char = '*';

/// Formats `board` as a text block. `cursor`, when given, overlays a
/// marker on that cell without touching the board.
pub fn format_board(board: &Board, cursor: Option<Position>) -> String {
    let size = board.size();
    let mut lines = Vec::with_capacity(size + 3);

    let columns: Vec<String> = (1..=size).map(|col| col.to_string()).collect();
    lines.push(format!("   {}", columns.join(" ")));
    let separator = format!("  {}", "-".repeat(2 * size + 1));
    lines.push(separator.clone());

    for row in 0..size {
        let symbols: Vec<String> = (0..size)
            .map(|col| {
                let symbol = if cursor == Some(Position::new(row, col)) {
                    CURSOR_SYMBOL
                } else {
                    board.get(row, col).unwrap_or_default().symbol()
                };
                symbol.to_string()
            })
            .collect();
        lines.push(format!("{} |{}|", row_label(row), symbols.join("|")));
    }

    lines.push(separator);
    lines.join("\n")
}

/// Receives every frame the engine draws.
pub trait Renderer {
    fn render(&mut self, frame: &str);
}

/// Prints frames to a writer, stdout by default.
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl ConsoleRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, frame: &str) {
        if let Err(err) = writeln!(self.out, "{frame}").and_then(|()| self.out.flush()) {
            tracing::warn!(%err, "failed to write frame");
        }
    }
}

/// Keeps every frame in memory. Clones share the same frame list.
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    frames: Rc<RefCell<Vec<String>>>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<String> {
        self.frames.borrow().clone()
    }

    pub fn last_frame(&self) -> Option<String> {
        self.frames.borrow().last().cloned()
    }
}

impl Renderer for MemoryRenderer {
    fn render(&mut self, frame: &str) {
        self.frames.borrow_mut().push(frame.to_string());
    }
}

/// Discards frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_board_frame_matches_layout() {
        let board = Board::new(4).unwrap();

        let expected = [
            "   1 2 3 4",
            "  ---------",
            "A | | | | |",
            "B | |x|o| |",
            "C | |o|x| |",
            "D | | | | |",
            "  ---------",
        ]
        .join("\n");

        assert_eq!(format_board(&board, None), expected);
    }

    #[test]
    fn cursor_overlays_marker_without_mutating_board() {
        let board = Board::new(4).unwrap();
        let before = board.clone();

        let frame = format_board(&board, Some(Position::new(0, 1)));

        assert_eq!(frame.lines().nth(2), Some("A | |*| | |"));
        assert_eq!(board, before);
    }

    #[test]
    fn memory_renderer_clones_share_frames() {
        let renderer = MemoryRenderer::new();
        let mut handle = renderer.clone();

        handle.render("one");
        handle.render("two");

        assert_eq!(renderer.frames(), vec!["one", "two"]);
        assert_eq!(renderer.last_frame().as_deref(), Some("two"));
    }

    #[test]
    fn console_renderer_appends_newline() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer.render("frame");

        assert_eq!(renderer.out, b"frame\n");
    }
}
