use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use podium_app::repository::ScoreRepository;
use podium_core::{ApplicationError, DbError};
use podium_game::{
    models::score::{NewScore, ScoreRecord},
    ranking::Partition,
};
use podium_types::{ScoreId, UserId};

use crate::models::{self as db_models};

#[derive(Clone)]
pub struct PostgresScoreRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresScoreRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> ScoreRepository for PostgresScoreRepository<'a> {
    async fn insert(&self, user_id: UserId, score: &NewScore) -> Result<ScoreRecord, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let difficulty: db_models::Difficulty = score.difficulty.into();
        let rec = sqlx::query_as::<_, db_models::GameScore>(
            r#"
            INSERT INTO game_scores
                (user_id, game_id, stage_id, score, game_time, items_collected, difficulty)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, game_id, stage_id, score, game_time, items_collected,
                      difficulty, created_at, is_deleted
            "#,
        )
        .bind(user_id)
        .bind(&score.game_id)
        .bind(&score.stage_id)
        .bind(score.score)
        .bind(score.game_time)
        .bind(score.items_collected)
        .bind(difficulty)
        .fetch_one(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(rec.into())
    }

    async fn get_by_id(&self, id: ScoreId) -> Result<ScoreRecord, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let rec = sqlx::query_as::<_, db_models::GameScore>(
            r#"
            SELECT id, user_id, game_id, stage_id, score, game_time, items_collected,
                   difficulty, created_at, is_deleted
            FROM game_scores
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?
        .ok_or_else(|| ApplicationError::Db(DbError::ScoreNotFound(id)))?;

        Ok(rec.into())
    }

    /// Live rows of a partition. Rows of banned or deleted users are dropped
    /// here as well, blocks are left to the caller's exclusion set.
    async fn list_by_partition(&self, partition: &Partition) -> Result<Vec<ScoreRecord>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let recs = sqlx::query_as::<_, db_models::GameScore>(
            r#"
            SELECT id, user_id, game_id, stage_id, score, game_time, items_collected,
                   difficulty, created_at, is_deleted
            FROM game_scores
            WHERE game_id = $1
              AND ($2::text IS NULL OR stage_id = $2)
              AND is_deleted = FALSE
              AND NOT EXISTS (
                  SELECT 1 FROM users u
                  WHERE u.id = game_scores.user_id AND (u.is_banned OR u.is_deleted)
              )
            "#,
        )
        .bind(&partition.game_id)
        .bind(partition.stage_id.as_deref())
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(recs.into_iter().map(Into::into).collect())
    }
}
