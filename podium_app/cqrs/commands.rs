use podium_game::{models::score::ScoreRecord, validation::ScoreSubmission};
use podium_types::UserId;

use crate::cqrs::Command;

/// Stores a new score for the authenticated user.
#[derive(Debug, Clone)]
pub struct SubmitScore {
    pub user_id: UserId,
    pub submission: ScoreSubmission,
}

impl Command for SubmitScore {
    type Output = ScoreRecord;
}
