use thiserror::Error;

use podium_types::{ScoreId, UserId};

/// Errors for db stuff.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("User with email '{0}' not found")]
    UserByEmailNotFound(String),

    #[error("User with ID {0} not found")]
    UserByIdNotFound(UserId),

    #[error("Score with ID {0} not found")]
    ScoreNotFound(ScoreId),

    #[error("No profile for ranked user {0}")]
    MissingProfile(UserId),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Transaction error: {0}")]
    Transaction(String),
}
