use axum::{
    Json,
    extract::{Query, State},
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use podium_app::{
    command_handlers::SubmitScoreCommandHandler,
    cqrs::{
        commands::SubmitScore,
        queries::{GetPersonalBest, GetScoreRanking, RankedScore},
    },
    queries_handlers::{GetPersonalBestHandler, GetScoreRankingHandler},
};
use podium_core::GameError;
use podium_game::{models::score::ScoreRecord, validation::ScoreSubmission};
use podium_types::{ScoreId, UserId, scores::Difficulty};

use crate::{
    handlers::helpers::{ApiError, CurrentUser, not_an_object},
    http::AppState,
};

/// Query string of `GET /games/scores`. Numbers are parsed by hand so that
/// malformed values end up as 400s with the usual error body.
#[derive(Debug, Default, Deserialize)]
pub struct RankingParams {
    pub game_id: Option<String>,
    pub stage_id: Option<String>,
    pub limit: Option<String>,
    pub cursor: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PersonalBestParams {
    pub game_id: Option<String>,
    pub stage_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

impl<T> SuccessResponse<T> {
    fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            pagination: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub has_more: bool,
    pub next_cursor: Option<ScoreId>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
pub struct RankingEntry {
    pub id: ScoreId,
    pub rank: usize,
    pub score: i64,
    pub game_time: i64,
    pub items_collected: i64,
    pub difficulty: Difficulty,
    pub stage_id: String,
    pub created_at: DateTime<Utc>,
    pub user: RankingUser,
}

#[derive(Debug, Serialize)]
pub struct RankingUser {
    pub id: UserId,
    pub username: String,
    pub profile_image_url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_current_user: bool,
}

impl From<RankedScore> for RankingEntry {
    fn from(entry: RankedScore) -> Self {
        RankingEntry {
            id: entry.record.id,
            rank: entry.rank,
            score: entry.record.score,
            game_time: entry.record.game_time,
            items_collected: entry.record.items_collected,
            difficulty: entry.record.difficulty,
            stage_id: entry.record.stage_id,
            created_at: entry.record.created_at,
            user: RankingUser {
                id: entry.user.id,
                username: entry.user.username,
                profile_image_url: entry.user.profile_image_url,
                first_name: entry.user.first_name,
                last_name: entry.user.last_name,
                is_current_user: entry.is_current_user,
            },
        }
    }
}

/// POST /games/scores – Store a score for the logged in user.
pub async fn submit_score(
    State(state): State<AppState>,
    user: CurrentUser,
    WithRejection(Json(body), _): WithRejection<Json<Value>, ApiError>,
) -> Result<Json<SuccessResponse<ScoreRecord>>, ApiError> {
    if !body.is_object() {
        return Err(GameError::InvalidSubmission(vec![not_an_object()]).into());
    }
    let submission: ScoreSubmission = serde_json::from_value(body)
        .map_err(|_| GameError::InvalidSubmission(vec![not_an_object()]))?;

    let command = SubmitScore {
        user_id: user.id,
        submission,
    };
    let record = state
        .app_bus
        .execute(command, SubmitScoreCommandHandler::new())
        .await?;

    Ok(Json(SuccessResponse::new(record)))
}

/// GET /games/scores – One page of the best-score-per-user ranking.
pub async fn score_ranking(
    State(state): State<AppState>,
    user: CurrentUser,
    WithRejection(Query(params), _): WithRejection<Query<RankingParams>, ApiError>,
) -> Result<Json<SuccessResponse<Vec<RankingEntry>>>, ApiError> {
    let query = GetScoreRanking {
        viewer_id: user.id,
        game_id: params.game_id.unwrap_or_default(),
        stage_id: params.stage_id,
        limit: parse_number(params.limit.as_deref())
            .map_err(|raw| GameError::InvalidPageLimit(raw.to_string()))?,
        cursor: parse_number(params.cursor.as_deref())
            .map_err(|raw| GameError::InvalidCursor(raw.to_string()))?,
    };

    let ranking = state
        .app_bus
        .query(query, GetScoreRankingHandler::new())
        .await?;

    Ok(Json(SuccessResponse {
        success: true,
        data: ranking.entries.into_iter().map(RankingEntry::from).collect(),
        pagination: Some(PaginationInfo {
            has_more: ranking.has_more,
            next_cursor: ranking.next_cursor,
            total_count: ranking.total_count,
        }),
    }))
}

/// GET /games/scores/me – The logged in user's own entry, `null` when absent.
pub async fn personal_best(
    State(state): State<AppState>,
    user: CurrentUser,
    WithRejection(Query(params), _): WithRejection<Query<PersonalBestParams>, ApiError>,
) -> Result<Json<SuccessResponse<Option<RankingEntry>>>, ApiError> {
    let query = GetPersonalBest {
        viewer_id: user.id,
        game_id: params.game_id.unwrap_or_default(),
        stage_id: params.stage_id,
    };

    let best = state
        .app_bus
        .query(query, GetPersonalBestHandler::new())
        .await?;

    Ok(Json(SuccessResponse {
        success: true,
        data: best.entry.map(RankingEntry::from),
        pagination: Some(PaginationInfo {
            has_more: false,
            next_cursor: None,
            total_count: best.total_count,
        }),
    }))
}

/// Blank values count as absent, anything else must be an integer.
fn parse_number(raw: Option<&str>) -> Result<Option<i64>, &str> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(|_| s),
    }
}
