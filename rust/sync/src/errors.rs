use ledger_engine::errors::GameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Game ID not found: {0}")]
    GameNotFound(String),
    #[error("Game {game_id} changed: based on version {expected}, slot is at {actual}")]
    StaleSnapshot {
        game_id: String,
        expected: u64,
        actual: u64,
    },
    #[error("It is not {player_id}'s turn")]
    NotYourTurn { player_id: String },
    #[error("Player {player_id} is not seated in game {game_id}")]
    NotSeated { game_id: String, player_id: String },
    #[error("Snapshot storage poisoned")]
    StoragePoisoned,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] GameError),
}
