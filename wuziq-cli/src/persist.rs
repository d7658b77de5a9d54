//! Save files: a `GameRecord` as pretty-printed JSON

use std::path::Path;

use anyhow::{Context, Result};
use wuziq_core::{from_record, to_record, GameRecord, GameState};

pub fn save_game(path: &Path, game: &GameState) -> Result<()> {
    let json = serde_json::to_string_pretty(&to_record(game))?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write save file: {}", path.display()))?;
    tracing::info!(path = %path.display(), moves = game.history().len(), "game saved");
    Ok(())
}

pub fn load_game(path: &Path) -> Result<GameState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read save file: {}", path.display()))?;
    let record: GameRecord = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse save file: {}", path.display()))?;
    let game = from_record(&record)
        .with_context(|| format!("Rejected save file: {}", path.display()))?;
    tracing::info!(path = %path.display(), moves = game.history().len(), "game loaded");
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use wuziq_core::AiSide;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wuziq-{}-{}.json", std::process::id(), name))
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("persist-round-trip");
        let mut game = GameState::with_ai(9, AiSide::Black).unwrap();
        game.play_ai_turn().unwrap();
        game.apply_move(0, 0).unwrap();

        save_game(&path, &game).unwrap();
        let loaded = load_game(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, game);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_game(Path::new("/nonexistent/wuziq.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read save file"));
    }

    #[test]
    fn test_load_rejects_tampered_file() {
        let path = temp_path("persist-tampered");
        let mut game = GameState::new(9).unwrap();
        game.apply_move(4, 4).unwrap();
        let mut record = to_record(&game);
        record.winner = Some(wuziq_core::Winner::Black);
        std::fs::write(&path, serde_json::to_string(&record).unwrap()).unwrap();

        let err = load_game(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(format!("{:#}", err).contains("corrupt saved state"));
    }
}
