#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use std::{
        collections::{HashMap, HashSet},
        sync::{Arc, Mutex},
    };

    use podium_core::{ApplicationError, DbError};
    use podium_game::{
        models::score::{NewScore, ScoreRecord},
        ranking::Partition,
    };
    use podium_types::{
        ScoreId, UserId,
        common::{User, UserProfile},
    };

    use crate::{
        repository::{RelationshipRepository, ScoreRepository, UserRepository},
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    #[derive(Default, Clone)]
    pub struct MockScoreRepository {
        scores: Arc<Mutex<Vec<ScoreRecord>>>,
        next_id: Arc<Mutex<ScoreId>>,
    }

    impl MockScoreRepository {
        /// Stores a record as-is, keeping its id and timestamp.
        pub fn add_score(&self, record: ScoreRecord) {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id = (*next_id).max(record.id);
            self.scores.lock().unwrap().push(record);
        }

        pub fn all(&self) -> Vec<ScoreRecord> {
            self.scores.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ScoreRepository for MockScoreRepository {
        async fn insert(
            &self,
            user_id: UserId,
            score: &NewScore,
        ) -> Result<ScoreRecord, ApplicationError> {
            let id = {
                let mut next_id = self.next_id.lock().unwrap();
                *next_id += 1;
                *next_id
            };
            let record = score.clone().into_record(id, user_id, Utc::now());
            self.scores.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn get_by_id(&self, id: ScoreId) -> Result<ScoreRecord, ApplicationError> {
            self.scores
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::ScoreNotFound(id)))
        }

        async fn list_by_partition(
            &self,
            partition: &Partition,
        ) -> Result<Vec<ScoreRecord>, ApplicationError> {
            Ok(self
                .scores
                .lock()
                .unwrap()
                .iter()
                .filter(|s| !s.is_deleted && partition.contains(s))
                .cloned()
                .collect())
        }
    }

    #[derive(Default, Clone)]
    pub struct MockUserRepository {
        users: Arc<Mutex<HashMap<UserId, User>>>,
    }

    impl MockUserRepository {
        pub fn add_user(&self, user: User) {
            self.users.lock().unwrap().insert(user.id, user);
        }

        /// Drops a user row entirely, leaving any session pointing at it dangling.
        pub fn remove_user(&self, user_id: UserId) {
            self.users.lock().unwrap().remove(&user_id);
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn get_by_email(&self, email: &str) -> Result<User, ApplicationError> {
            self.users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email == email)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::UserByEmailNotFound(email.to_string())))
        }

        async fn get_by_id(&self, user_id: UserId) -> Result<User, ApplicationError> {
            self.users
                .lock()
                .unwrap()
                .get(&user_id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::UserByIdNotFound(user_id)))
        }

        async fn get_profiles(
            &self,
            user_ids: &[UserId],
        ) -> Result<HashMap<UserId, UserProfile>, ApplicationError> {
            let users = self.users.lock().unwrap();
            Ok(user_ids
                .iter()
                .filter_map(|id| users.get(id).map(|u| (*id, u.profile.clone())))
                .collect())
        }
    }

    #[derive(Default, Clone)]
    pub struct MockRelationshipRepository {
        blocks: Arc<Mutex<Vec<(UserId, UserId)>>>,
        users: Arc<Mutex<HashMap<UserId, User>>>,
    }

    impl MockRelationshipRepository {
        pub fn block(&self, blocker_id: UserId, blocked_id: UserId) {
            self.blocks.lock().unwrap().push((blocker_id, blocked_id));
        }
    }

    #[async_trait]
    impl RelationshipRepository for MockRelationshipRepository {
        async fn excluded_user_ids(
            &self,
            viewer_id: UserId,
        ) -> Result<HashSet<UserId>, ApplicationError> {
            let mut excluded: HashSet<UserId> = self
                .blocks
                .lock()
                .unwrap()
                .iter()
                .filter_map(|&(blocker, blocked)| match viewer_id {
                    id if id == blocker => Some(blocked),
                    id if id == blocked => Some(blocker),
                    _ => None,
                })
                .collect();

            excluded.extend(
                self.users
                    .lock()
                    .unwrap()
                    .values()
                    .filter(|u| !u.is_active())
                    .map(|u| u.id),
            );

            Ok(excluded)
        }
    }

    /// A store that fails every call, to check errors are never turned into empty results.
    #[derive(Default, Clone)]
    pub struct FailingScoreRepository {}

    #[async_trait]
    impl ScoreRepository for FailingScoreRepository {
        async fn insert(&self, _: UserId, _: &NewScore) -> Result<ScoreRecord, ApplicationError> {
            Err(ApplicationError::Db(DbError::Transaction("connection reset".to_string())))
        }

        async fn get_by_id(&self, _: ScoreId) -> Result<ScoreRecord, ApplicationError> {
            Err(ApplicationError::Db(DbError::Transaction("connection reset".to_string())))
        }

        async fn list_by_partition(&self, _: &Partition) -> Result<Vec<ScoreRecord>, ApplicationError> {
            Err(ApplicationError::Db(DbError::Transaction("connection reset".to_string())))
        }
    }

    #[derive(Default, Clone)]
    pub struct MockUnitOfWork {
        scores: Arc<MockScoreRepository>,
        users: Arc<MockUserRepository>,
        relationships: Arc<MockRelationshipRepository>,
        failing_scores: bool,

        // Flags to check if commit/rollback was called
        committed: Arc<Mutex<bool>>,
        rolled_back: Arc<Mutex<bool>>,
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            let users = MockUserRepository::default();
            let relationships = MockRelationshipRepository {
                users: users.users.clone(),
                ..Default::default()
            };

            Self {
                users: Arc::new(users),
                relationships: Arc::new(relationships),
                ..Default::default()
            }
        }

        /// A unit of work whose score store is unreachable.
        pub fn with_failing_scores() -> Self {
            Self {
                failing_scores: true,
                ..Self::new()
            }
        }

        pub fn score_store(&self) -> &MockScoreRepository {
            &self.scores
        }

        pub fn user_store(&self) -> &MockUserRepository {
            &self.users
        }

        pub fn relationship_store(&self) -> &MockRelationshipRepository {
            &self.relationships
        }

        pub fn is_committed(&self) -> bool {
            *self.committed.lock().unwrap()
        }

        pub fn is_rolled_back(&self) -> bool {
            *self.rolled_back.lock().unwrap()
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn scores(&self) -> Arc<dyn ScoreRepository + 'a> {
            if self.failing_scores {
                return Arc::new(FailingScoreRepository::default());
            }
            self.scores.clone()
        }

        fn users(&self) -> Arc<dyn UserRepository + 'a> {
            self.users.clone()
        }

        fn relationships(&self) -> Arc<dyn RelationshipRepository + 'a> {
            self.relationships.clone()
        }

        async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
            *self.committed.lock().unwrap() = true;
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            *self.rolled_back.lock().unwrap() = true;
            Ok(())
        }
    }

    /// Hands out units of work sharing the same in-memory tables.
    #[derive(Default, Clone)]
    pub struct MockUnitOfWorkProvider {
        uow: MockUnitOfWork,
    }

    impl MockUnitOfWorkProvider {
        pub fn new() -> Self {
            Self {
                uow: MockUnitOfWork::new(),
            }
        }

        pub fn with_uow(uow: MockUnitOfWork) -> Self {
            Self { uow }
        }

        pub fn uow(&self) -> &MockUnitOfWork {
            &self.uow
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
            let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(self.uow.clone());
            Ok(uow)
        }
    }
}
