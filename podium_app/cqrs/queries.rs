use podium_game::models::score::ScoreRecord;
use podium_types::{ScoreId, UserId, common::{User, UserProfile}};

use crate::cqrs::Query;

/// Checks user credentials (email and password).
pub struct AuthenticateUser {
    pub email: String,
    pub password: String,
}

impl Query for AuthenticateUser {
    type Output = User;
}

/// A ranking entry ready to be shown to `viewer`.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedScore {
    pub rank: usize,
    pub record: ScoreRecord,
    pub user: UserProfile,
    pub is_current_user: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRanking {
    pub entries: Vec<RankedScore>,
    pub has_more: bool,
    pub next_cursor: Option<ScoreId>,
    pub total_count: usize,
}

/// Fetch a page of the best-score-per-user ranking for a game (and optionally a stage).
pub struct GetScoreRanking {
    pub viewer_id: UserId,
    pub game_id: String,
    pub stage_id: Option<String>,
    pub limit: Option<i64>,
    pub cursor: Option<ScoreId>,
}

impl Query for GetScoreRanking {
    type Output = ScoreRanking;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalBest {
    pub entry: Option<RankedScore>,
    pub total_count: usize,
}

/// Fetch the viewer's own ranking entry.
pub struct GetPersonalBest {
    pub viewer_id: UserId,
    pub game_id: String,
    pub stage_id: Option<String>,
}

impl Query for GetPersonalBest {
    type Output = PersonalBest;
}
