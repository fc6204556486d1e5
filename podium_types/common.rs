use serde::{Deserialize, Serialize};

use crate::UserId;

/// Public profile fields shown next to a ranking entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub profile_image_url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    password_hash: String,
    pub profile: UserProfile,
    pub is_banned: bool,
    pub is_deleted: bool,
}

impl User {
    pub fn new(id: UserId, email: String, hashed_password: String, profile: UserProfile) -> Self {
        Self {
            id,
            email,
            password_hash: hashed_password,
            profile,
            is_banned: false,
            is_deleted: false,
        }
    }

    pub fn password_hash(&self) -> &String {
        &self.password_hash
    }

    /// Banned and soft-deleted accounts can neither log in nor appear in rankings.
    pub fn is_active(&self) -> bool {
        !self.is_banned && !self.is_deleted
    }
}
