use podium_core::ApplicationError;
use podium_game::{
    models::score::{NewScore, ScoreRecord},
    ranking::Partition,
};
use podium_types::{ScoreId, UserId};

#[async_trait::async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Appends a score for a user, returning the stored record.
    async fn insert(&self, user_id: UserId, score: &NewScore) -> Result<ScoreRecord, ApplicationError>;

    /// Returns a score by id, soft-deleted ones included.
    async fn get_by_id(&self, id: ScoreId) -> Result<ScoreRecord, ApplicationError>;

    /// Returns every non-deleted score of a partition.
    async fn list_by_partition(
        &self,
        partition: &Partition,
    ) -> Result<Vec<ScoreRecord>, ApplicationError>;
}
