use podium_game::models::score::ScoreRecord;
use podium_types::{
    common::{User, UserProfile},
    scores::Difficulty,
};

use crate::models::{self as db_models};

impl From<db_models::Difficulty> for Difficulty {
    fn from(difficulty: db_models::Difficulty) -> Self {
        match difficulty {
            db_models::Difficulty::Easy => Difficulty::Easy,
            db_models::Difficulty::Normal => Difficulty::Normal,
            db_models::Difficulty::Hard => Difficulty::Hard,
        }
    }
}

impl From<Difficulty> for db_models::Difficulty {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => db_models::Difficulty::Easy,
            Difficulty::Normal => db_models::Difficulty::Normal,
            Difficulty::Hard => db_models::Difficulty::Hard,
        }
    }
}

impl From<db_models::GameScore> for ScoreRecord {
    fn from(score: db_models::GameScore) -> Self {
        ScoreRecord {
            id: score.id,
            user_id: score.user_id,
            game_id: score.game_id,
            stage_id: score.stage_id,
            score: score.score,
            game_time: score.game_time,
            items_collected: score.items_collected,
            difficulty: score.difficulty.into(),
            created_at: score.created_at,
            is_deleted: score.is_deleted,
        }
    }
}

impl From<db_models::UserProfile> for UserProfile {
    fn from(profile: db_models::UserProfile) -> Self {
        UserProfile {
            id: profile.id,
            username: profile.username,
            profile_image_url: profile.profile_image_url,
            first_name: profile.first_name,
            last_name: profile.last_name,
        }
    }
}

impl From<db_models::User> for User {
    fn from(user: db_models::User) -> Self {
        let profile = UserProfile {
            id: user.id,
            username: user.username,
            profile_image_url: user.profile_image_url,
            first_name: user.first_name,
            last_name: user.last_name,
        };

        let mut domain = User::new(user.id, user.email, user.password_hash, profile);
        domain.is_banned = user.is_banned;
        domain.is_deleted = user.is_deleted;
        domain
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_user_row_mapping() {
        let row = db_models::User {
            id: 7,
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            username: "ada".to_string(),
            profile_image_url: None,
            first_name: Some("Ada".to_string()),
            last_name: None,
            is_banned: true,
            is_deleted: false,
            created_at: Utc::now(),
        };

        let user: User = row.into();

        assert_eq!(user.id, 7);
        assert_eq!(user.profile.id, 7);
        assert_eq!(user.profile.username, "ada");
        assert_eq!(user.profile.first_name.as_deref(), Some("Ada"));
        assert_eq!(user.password_hash(), "hash");
        assert!(!user.is_active());
    }

    #[test]
    fn test_difficulty_mapping() {
        for difficulty in Difficulty::ALL {
            let db: db_models::Difficulty = difficulty.into();
            assert_eq!(Difficulty::from(db), difficulty);
        }
    }
}
