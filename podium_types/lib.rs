pub mod common;
pub mod scores;
pub mod validation;

/// Primary key of a user account.
pub type UserId = i64;

/// Primary key of a score submission. Assigned by the store, strictly increasing.
pub type ScoreId = i64;
