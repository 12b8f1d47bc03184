//! Player input: cursor keys and coordinate commands

use std::io::{self, BufRead, ErrorKind, Read};

use crate::error::{Error, Result};
use crate::types::{Position, ROW_LABELS};

const ESC: u8 = 0x1b;

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Char(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Key(Key),
    Command(String),
}

/// Source of player input. `Ok(None)` means the input is exhausted.
pub trait InputProvider {
    fn next_input(&mut self) -> io::Result<Option<Input>>;
}

impl<P: InputProvider + ?Sized> InputProvider for Box<P> {
    fn next_input(&mut self) -> io::Result<Option<Input>> {
        (**self).next_input()
    }
}

/// Decodes arrow-key escape sequences, Enter and plain characters from a
/// byte stream. Switching the terminal to raw mode is left to the caller.
pub struct KeyReader<R> {
    reader: R,
    pending: Option<u8>,
}

impl<R: BufRead> KeyReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
        }
    }

    /// Unknown escape sequences come back as their two raw characters.
    pub fn next_key(&mut self) -> io::Result<Option<Key>> {
        if let Some(byte) = self.pending.take() {
            return Ok(Some(Key::Char(char::from(byte))));
        }

        let Some(byte) = self.next_byte()? else {
            return Ok(None);
        };

        if byte != ESC {
            let key = match byte {
                b'\r' | b'\n' => Key::Enter,
                other => Key::Char(char::from(other)),
            };
            return Ok(Some(key));
        }

        let (Some(first), Some(second)) = (self.next_byte()?, self.next_byte()?) else {
            return Ok(None);
        };
        let key = match (first, second) {
            (b'[', b'A') => Key::Up,
            (b'[', b'B') => Key::Down,
            (b'[', b'C') => Key::Right,
            (b'[', b'D') => Key::Left,
            _ => {
                tracing::trace!(first, second, "unknown escape sequence");
                self.pending = Some(second);
                Key::Char(char::from(first))
            }
        };
        Ok(Some(key))
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}

impl<R: BufRead> InputProvider for KeyReader<R> {
    fn next_input(&mut self) -> io::Result<Option<Input>> {
        Ok(self.next_key()?.map(Input::Key))
    }
}

/// Yields one trimmed, non-blank line per command.
pub struct LineReader<R> {
    reader: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputProvider for LineReader<R> {
    fn next_input(&mut self) -> io::Result<Option<Input>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(Input::Command(trimmed.to_string())));
            }
        }
    }
}

/// Parses `<Letter><Number>` such as `B3`: the letter picks the row
/// (case-insensitive), the number the 1-based column.
pub fn parse_coordinate(text: &str, size: usize) -> Result<Position> {
    let invalid = || Error::InvalidCoordinate {
        input: text.to_string(),
    };

    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    let letter = chars
        .next()
        .filter(char::is_ascii_alphabetic)
        .ok_or_else(invalid)?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let number: usize = digits.parse().map_err(|_| invalid())?;

    let row = ROW_LABELS
        .find(letter.to_ascii_uppercase())
        .ok_or_else(invalid)?;
    let col = number.checked_sub(1).ok_or_else(invalid)?;
    if row >= size || col >= size {
        return Err(invalid());
    }
    Ok(Position::new(row, col))
}
