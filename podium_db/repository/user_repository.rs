use sqlx::{Postgres, Transaction};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

use podium_app::repository::UserRepository;
use podium_core::{ApplicationError, DbError};
use podium_types::{
    UserId,
    common::{User, UserProfile},
};

use crate::models::{self as db_models};

#[derive(Clone)]
pub struct PostgresUserRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresUserRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> UserRepository for PostgresUserRepository<'a> {
    async fn get_by_email(&self, email: &str) -> Result<User, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let rec = sqlx::query_as::<_, db_models::User>(
            r#"
            SELECT id, email, password_hash, username, profile_image_url,
                   first_name, last_name, is_banned, is_deleted, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?
        .ok_or_else(|| ApplicationError::Db(DbError::UserByEmailNotFound(email.to_string())))?;

        Ok(rec.into())
    }

    async fn get_by_id(&self, user_id: UserId) -> Result<User, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let rec = sqlx::query_as::<_, db_models::User>(
            r#"
            SELECT id, email, password_hash, username, profile_image_url,
                   first_name, last_name, is_banned, is_deleted, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?
        .ok_or_else(|| ApplicationError::Db(DbError::UserByIdNotFound(user_id)))?;

        Ok(rec.into())
    }

    async fn get_profiles(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, UserProfile>, ApplicationError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut tx_guard = self.tx.lock().await;
        let recs = sqlx::query_as::<_, db_models::UserProfile>(
            r#"
            SELECT id, username, profile_image_url, first_name, last_name
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(user_ids)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(recs
            .into_iter()
            .map(|rec| (rec.id, UserProfile::from(rec)))
            .collect())
    }
}
