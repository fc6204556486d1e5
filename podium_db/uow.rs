use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use podium_app::{
    repository::*,
    uow::{UnitOfWork, UnitOfWorkProvider},
};
use podium_core::{ApplicationError, DbError};

use crate::repository::*;

#[derive(Debug, Clone)]
pub struct PostgresUnitOfWorkProvider {
    pool: PgPool,
}

impl PostgresUnitOfWorkProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UnitOfWorkProvider for PostgresUnitOfWorkProvider {
    async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(Box::new(PostgresUnitOfWork {
            tx: Arc::new(Mutex::new(tx)),
        }))
    }
}

#[derive(Debug, Clone)]
pub struct PostgresUnitOfWork<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

#[async_trait::async_trait]
impl<'a> UnitOfWork<'a> for PostgresUnitOfWork<'a> {
    fn scores(&self) -> Arc<dyn ScoreRepository + 'a> {
        Arc::new(PostgresScoreRepository::new(self.tx.clone()))
    }

    fn users(&self) -> Arc<dyn UserRepository + 'a> {
        Arc::new(PostgresUserRepository::new(self.tx.clone()))
    }

    fn relationships(&self) -> Arc<dyn RelationshipRepository + 'a> {
        Arc::new(PostgresRelationshipRepository::new(self.tx.clone()))
    }

    async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
        // Repositories handed out by this unit hold clones of the Arc; once they
        // are dropped the transaction has a single owner and can be committed.
        match Arc::try_unwrap(self.tx) {
            Ok(mutex) => mutex
                .into_inner()
                .commit()
                .await
                .map_err(|e| ApplicationError::Db(DbError::Database(e))),
            Err(_) => Err(ApplicationError::Db(DbError::Transaction(
                "transaction still has multiple owners".to_string(),
            ))),
        }
    }

    async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
        // Otherwise the transaction is rolled back on drop.
        if let Ok(mutex) = Arc::try_unwrap(self.tx) {
            mutex
                .into_inner()
                .rollback()
                .await
                .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;
        }
        Ok(())
    }
}
