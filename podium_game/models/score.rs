use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use podium_types::{ScoreId, UserId, scores::Difficulty};

/// A persisted score submission. Never mutated after insertion, only soft-deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: ScoreId,
    pub user_id: UserId,
    pub game_id: String,
    pub stage_id: String,
    pub score: i64,
    pub game_time: i64,
    pub items_collected: i64,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// A validated submission, ready to be stored for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub game_id: String,
    pub stage_id: String,
    pub score: i64,
    pub game_time: i64,
    pub items_collected: i64,
    pub difficulty: Difficulty,
}

impl NewScore {
    /// Builds the record the store is expected to persist.
    /// `id` and `created_at` are the store's to assign.
    pub fn into_record(self, id: ScoreId, user_id: UserId, created_at: DateTime<Utc>) -> ScoreRecord {
        ScoreRecord {
            id,
            user_id,
            game_id: self.game_id,
            stage_id: self.stage_id,
            score: self.score,
            game_time: self.game_time,
            items_collected: self.items_collected,
            difficulty: self.difficulty,
            created_at,
            is_deleted: false,
        }
    }
}
