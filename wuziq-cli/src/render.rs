//! Text rendering of the board

use wuziq_core::{GameState, Winner};

use crate::input::COLUMN_LETTERS;

/// Largest board that still gets a letter per column
pub const MAX_TERMINAL_SIZE: usize = COLUMN_LETTERS.len();

/// Board with column letters on top and 1-based row numbers on the left.
/// The last stone played is shown in brackets.
pub fn format_board(game: &GameState) -> String {
    let size = game.size();
    let last = game.last_move().map(|mv| (mv.row, mv.col));

    let mut lines = Vec::with_capacity(size + 1);
    let header: String = COLUMN_LETTERS
        .chars()
        .take(size)
        .flat_map(|letter| [' ', letter])
        .collect();
    lines.push(format!("  {}", header));

    for (r, row) in game.board().rows().enumerate() {
        let mut line = format!("{:2}", r + 1);
        for (c, cell) in row.iter().enumerate() {
            let separator = if last == Some((r, c)) {
                '['
            } else if c > 0 && last == Some((r, c - 1)) {
                ']'
            } else {
                ' '
            };
            line.push(separator);
            line.push(cell.symbol());
        }
        if last == Some((r, size - 1)) {
            line.push(']');
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// One-line summary of whose turn it is or how the game ended
pub fn status_line(game: &GameState) -> String {
    match game.winner() {
        Some(Winner::Black) => "Black wins!".to_string(),
        Some(Winner::White) => "White wins!".to_string(),
        Some(Winner::Draw) => "The board is full. It's a draw!".to_string(),
        None => {
            let player = game.side_to_move();
            if game.is_ai_turn() {
                format!("{} (computer) to move", capitalize(player.name()))
            } else {
                format!("{} to move", capitalize(player.name()))
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let game = GameState::new(5).unwrap();
        let text = format_board(&game);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "   A B C D E");
        assert_eq!(lines[1], " 1 . . . . .");
        assert_eq!(lines[5], " 5 . . . . .");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_last_move_bracketed() {
        let mut game = GameState::new(5).unwrap();
        game.apply_move(0, 4).unwrap();
        game.apply_move(2, 1).unwrap();
        let text = format_board(&game);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], " 1 . . . . B");
        assert_eq!(lines[3], " 3 .[W]. . .");

        game.apply_move(4, 4).unwrap();
        let text = format_board(&game);
        assert_eq!(text.lines().nth(5), Some(" 5 . . . .[B]"));
    }

    #[test]
    fn test_wide_board_labels() {
        let game = GameState::new(12).unwrap();
        let text = format_board(&game);
        assert!(text.lines().next().unwrap().ends_with("K L"));
        assert!(text.lines().last().unwrap().starts_with("12 "));
    }

    #[test]
    fn test_status_line() {
        let mut game = GameState::new(5).unwrap();
        assert_eq!(status_line(&game), "Black to move");
        game.configure_ai(wuziq_core::AiSide::White);
        game.apply_move(0, 0).unwrap();
        assert_eq!(status_line(&game), "White (computer) to move");
    }
}
