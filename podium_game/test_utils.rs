use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::Rng;
use std::sync::atomic::{AtomicI64, Ordering};

use podium_types::{
    ScoreId, UserId,
    common::{User, UserProfile},
    scores::Difficulty,
};

use crate::models::score::ScoreRecord;

static NEXT_ID: AtomicI64 = AtomicI64::new(1_000_000);

fn next_id() -> i64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Reference instant for factory timestamps: record `n` is created `n` seconds after it.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

#[derive(Default, Clone)]
pub struct ScoreFactoryOptions {
    pub id: Option<ScoreId>,
    pub user_id: Option<UserId>,
    pub game_id: Option<String>,
    pub stage_id: Option<String>,
    pub score: Option<i64>,
    pub difficulty: Option<Difficulty>,
    pub created_at: Option<DateTime<Utc>>,
    pub is_deleted: Option<bool>,
}

#[derive(Default, Clone)]
pub struct UserFactoryOptions<'a> {
    pub id: Option<UserId>,
    pub email: Option<&'a str>,
    pub username: Option<&'a str>,
    pub password_hash: Option<String>,
    pub is_banned: Option<bool>,
    pub is_deleted: Option<bool>,
}

pub fn score_factory(options: ScoreFactoryOptions) -> ScoreRecord {
    let id = options.id.unwrap_or_else(next_id);
    let mut rng = rand::thread_rng();

    ScoreRecord {
        id,
        user_id: options.user_id.unwrap_or_else(next_id),
        game_id: options.game_id.unwrap_or_else(|| "nag-won".to_string()),
        stage_id: options.stage_id.unwrap_or_else(|| "cyber-city".to_string()),
        score: options.score.unwrap_or_else(|| rng.gen_range(0..10_000)),
        game_time: rng.gen_range(1..600),
        items_collected: rng.gen_range(0..50),
        difficulty: options.difficulty.unwrap_or_default(),
        created_at: options
            .created_at
            .unwrap_or_else(|| base_time() + Duration::seconds(id)),
        is_deleted: options.is_deleted.unwrap_or(false),
    }
}

pub fn user_factory(options: UserFactoryOptions) -> User {
    let id = options.id.unwrap_or_else(next_id);
    let default_username = format!("player_{}", rand::thread_rng().r#gen::<u32>());
    let username = options.username.map_or(default_username, |s| s.to_string());

    let mut user = User::new(
        id,
        options
            .email
            .map_or_else(|| format!("{username}@example.com"), |s| s.to_string()),
        options.password_hash.unwrap_or_default(),
        UserProfile {
            id,
            username,
            profile_image_url: None,
            first_name: None,
            last_name: None,
        },
    );
    user.is_banned = options.is_banned.unwrap_or(false);
    user.is_deleted = options.is_deleted.unwrap_or(false);
    user
}
