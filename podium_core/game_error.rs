use thiserror::Error;

use podium_types::{ScoreId, validation::FieldViolation};

/// Errors for domain rules (score submissions and ranking reads).
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid score submission ({} violations)", .0.len())]
    InvalidSubmission(Vec<FieldViolation>),

    #[error("Missing game_id")]
    MissingGameId,

    #[error("Invalid page limit {0}")]
    InvalidPageLimit(String),

    #[error("Invalid cursor {0}")]
    InvalidCursor(String),

    #[error("Cursor {0} does not belong to the requested ranking")]
    CursorOutsidePartition(ScoreId),

    #[error("Malformed query string: {0}")]
    MalformedQuery(String),
}
