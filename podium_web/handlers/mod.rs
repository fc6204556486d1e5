mod auth_handler;
mod helpers;
mod scores_handler;

pub use auth_handler::{LoginRequest, login, logout};
pub use helpers::{ApiError, CurrentUser, USER_ID_COOKIE};
pub use scores_handler::{PersonalBestParams, RankingParams, personal_best, score_ranking, submit_score};
