mod authenticate_user;
mod get_personal_best;
mod get_score_ranking;
mod helpers;

pub use authenticate_user::AuthenticateUserHandler;
pub use get_personal_best::GetPersonalBestHandler;
pub use get_score_ranking::GetScoreRankingHandler;
