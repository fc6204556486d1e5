use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[sqlx(type_name = "difficulty", rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

#[derive(Debug, FromRow, Clone)]
pub struct GameScore {
    pub id: i64,
    pub user_id: i64,
    pub game_id: String,
    pub stage_id: String,
    pub score: i64,
    pub game_time: i64,
    pub items_collected: i64,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

#[derive(Debug, FromRow, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub username: String,
    pub profile_image_url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_banned: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Clone)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub profile_image_url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
