use sqlx::{Postgres, Transaction};
use std::{collections::HashSet, sync::Arc};
use tokio::sync::Mutex;

use podium_app::repository::RelationshipRepository;
use podium_core::{ApplicationError, DbError};
use podium_types::UserId;

#[derive(Clone)]
pub struct PostgresRelationshipRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresRelationshipRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> RelationshipRepository for PostgresRelationshipRepository<'a> {
    async fn excluded_user_ids(&self, viewer_id: UserId) -> Result<HashSet<UserId>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        // Inactive accounts are already filtered out of partition listings; they
        // stay in the set so the contract holds for any score source.
        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT blocked_id FROM user_blocks WHERE blocker_id = $1
            UNION
            SELECT blocker_id FROM user_blocks WHERE blocked_id = $1
            UNION
            SELECT id FROM users WHERE is_banned = TRUE OR is_deleted = TRUE
            "#,
        )
        .bind(viewer_id)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(ids.into_iter().collect())
    }
}
