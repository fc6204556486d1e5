use std::collections::HashMap;

use podium_core::ApplicationError;
use podium_types::{
    UserId,
    common::{User, UserProfile},
};

#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by email.
    async fn get_by_email(&self, email: &str) -> Result<User, ApplicationError>;

    /// Find user by id.
    async fn get_by_id(&self, user_id: UserId) -> Result<User, ApplicationError>;

    /// Public profiles for a set of users. Unknown ids are left out of the map.
    async fn get_profiles(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, UserProfile>, ApplicationError>;
}
