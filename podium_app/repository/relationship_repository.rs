use std::collections::HashSet;

use podium_core::ApplicationError;
use podium_types::UserId;

#[async_trait::async_trait]
pub trait RelationshipRepository: Send + Sync {
    /// Users hidden from `viewer_id`: blocked by them, blocking them,
    /// banned or deleted.
    async fn excluded_user_ids(&self, viewer_id: UserId) -> Result<HashSet<UserId>, ApplicationError>;
}
