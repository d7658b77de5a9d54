//! Terminal input: coordinates and session commands
//!
//! Moves are typed either chess-style (`H8`: column letter, then 1-based
//! row) or as two 1-based numbers (`8 8`: row, then column).

use std::path::PathBuf;

use thiserror::Error;
use wuziq_core::AiSide;

pub const COLUMN_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("empty input is not a valid move")]
    Empty,

    #[error("provide row and column as two numbers or e.g. 'H8'")]
    Malformed,

    #[error("coordinate must start with a column letter")]
    MissingColumn,

    #[error("row and column must be numbers")]
    NotNumeric,

    #[error("move is out of bounds for a {0}x{0} board")]
    OutOfBounds(usize),

    #[error("unknown AI side {0:?}; use off, black or white")]
    UnknownAiSide(String),

    #[error("'{0}' needs a file name")]
    MissingPath(&'static str),
}

/// One line of terminal input
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Move { row: usize, col: usize },
    Undo,
    Ai(AiSide),
    Reset(Option<usize>),
    Save(PathBuf),
    Load(PathBuf),
    Help,
    Quit,
}

pub fn parse_command(line: &str, size: usize) -> Result<Command, InputError> {
    let text = line.trim();
    let (word, rest) = match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "quit" | "exit" => Ok(Command::Quit),
        "help" | "?" => Ok(Command::Help),
        "undo" => Ok(Command::Undo),
        "ai" => rest
            .parse()
            .map(Command::Ai)
            .map_err(|_| InputError::UnknownAiSide(rest.to_string())),
        "reset" if rest.is_empty() => Ok(Command::Reset(None)),
        "reset" => rest
            .parse()
            .map(|size| Command::Reset(Some(size)))
            .map_err(|_| InputError::NotNumeric),
        "save" => path_arg(rest, "save").map(Command::Save),
        "load" => path_arg(rest, "load").map(Command::Load),
        _ => parse_move(text, size).map(|(row, col)| Command::Move { row, col }),
    }
}

/// Parse a move into a zero-based (row, col)
pub fn parse_move(raw: &str, size: usize) -> Result<(usize, usize), InputError> {
    let text = raw.trim().to_ascii_uppercase();
    if text.is_empty() {
        return Err(InputError::Empty);
    }

    let (row, col) = if text.contains(char::is_whitespace) {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let [row, col] = parts[..] else {
            return Err(InputError::Malformed);
        };
        (parse_number(row)?, parse_number(col)?)
    } else {
        let mut chars = text.chars();
        let letter = chars.next().ok_or(InputError::Empty)?;
        let col = COLUMN_LETTERS
            .find(letter)
            .ok_or(InputError::MissingColumn)?;
        (parse_number(chars.as_str())?, col + 1)
    };

    if row == 0 || col == 0 || row > size || col > size {
        return Err(InputError::OutOfBounds(size));
    }
    Ok((row - 1, col - 1))
}

/// Chess-style label for a zero-based coordinate, e.g. (7, 7) -> "H8"
pub fn coord_label(row: usize, col: usize) -> String {
    let letter = COLUMN_LETTERS.chars().nth(col).unwrap_or('?');
    format!("{}{}", letter, row + 1)
}

fn parse_number(text: &str) -> Result<usize, InputError> {
    text.parse().map_err(|_| InputError::NotNumeric)
}

fn path_arg(rest: &str, command: &'static str) -> Result<PathBuf, InputError> {
    if rest.is_empty() {
        return Err(InputError::MissingPath(command));
    }
    Ok(PathBuf::from(rest))
}
