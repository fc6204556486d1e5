use async_trait::async_trait;
use std::sync::Arc;

use podium_core::{ApplicationError, DbError, GameError};
use podium_game::pagination::{cursor_key, page_limit, paginate};

use crate::{
    auth::session_user,
    config::Config,
    cqrs::{
        Query, QueryHandler,
        queries::{GetScoreRanking, ScoreRanking},
    },
    queries_handlers::helpers::{load_ranking, partition_from, with_profiles},
    uow::UnitOfWork,
};

pub struct GetScoreRankingHandler {}

impl GetScoreRankingHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetScoreRanking> for GetScoreRankingHandler {
    async fn handle(
        &self,
        query: GetScoreRanking,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<<GetScoreRanking as Query>::Output, ApplicationError> {
        let partition = partition_from(&query.game_id, query.stage_id)?;
        let limit = page_limit(
            query.limit,
            config.ranking_page_size,
            config.ranking_max_page_size,
        )?;

        let viewer = session_user(uow, query.viewer_id).await?;

        let cursor = match query.cursor {
            Some(id) => {
                let record = match uow.scores().get_by_id(id).await {
                    Ok(record) => record,
                    Err(ApplicationError::Db(DbError::ScoreNotFound(_))) => {
                        return Err(GameError::InvalidCursor(id.to_string()).into());
                    }
                    Err(e) => return Err(e),
                };
                Some(cursor_key(&record, &partition)?)
            }
            None => None,
        };

        let ranking = load_ranking(uow, viewer.id, &partition).await?;
        let page = paginate(ranking, cursor, limit);

        tracing::debug!(
            game_id = %partition.game_id,
            stage_id = ?partition.stage_id,
            viewer_id = viewer.id,
            returned = page.entries.len(),
            total = page.total_count,
            "Score ranking page computed"
        );

        Ok(ScoreRanking {
            entries: with_profiles(uow, viewer.id, page.entries).await?,
            has_more: page.has_more,
            next_cursor: page.next_cursor,
            total_count: page.total_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use podium_game::{
        models::score::ScoreRecord,
        test_utils::{ScoreFactoryOptions, UserFactoryOptions, score_factory, user_factory},
    };
    use podium_types::{ScoreId, UserId, common::User};

    use super::*;
    use crate::test_utils::tests::MockUnitOfWork;

    fn config() -> Arc<Config> {
        Arc::new(Config {
            port: 0,
            auth_cookie_secret: String::new(),
            ranking_page_size: 20,
            ranking_max_page_size: 50,
        })
    }

    fn user(id: UserId, username: &str) -> User {
        user_factory(UserFactoryOptions {
            id: Some(id),
            username: Some(username),
            ..Default::default()
        })
    }

    fn score(id: ScoreId, user_id: UserId, points: i64) -> ScoreRecord {
        score_factory(ScoreFactoryOptions {
            id: Some(id),
            user_id: Some(user_id),
            score: Some(points),
            ..Default::default()
        })
    }

    /// Viewer (1), A (2) and B (3); A and B submitted on ("nag-won", "cyber-city").
    fn setup() -> MockUnitOfWork {
        let mock = MockUnitOfWork::new();
        mock.user_store().add_user(user(1, "viewer"));
        mock.user_store().add_user(user(2, "alice"));
        mock.user_store().add_user(user(3, "bob"));

        for (id, user_id, points) in [(1, 2, 2000), (2, 2, 2500), (3, 2, 1800), (4, 3, 1500), (5, 3, 1200)] {
            mock.score_store().add_score(score(id, user_id, points));
        }
        mock
    }

    fn ranking_query(limit: Option<i64>, cursor: Option<ScoreId>) -> GetScoreRanking {
        GetScoreRanking {
            viewer_id: 1,
            game_id: "nag-won".to_string(),
            stage_id: Some("cyber-city".to_string()),
            limit,
            cursor,
        }
    }

    fn summary(ranking: &ScoreRanking) -> Vec<(usize, &str, i64)> {
        ranking
            .entries
            .iter()
            .map(|e| (e.rank, e.user.username.as_str(), e.record.score))
            .collect()
    }

    #[tokio::test]
    async fn test_basic_ranking() {
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(setup());

        let ranking = GetScoreRankingHandler::new()
            .handle(ranking_query(None, None), &uow, &config())
            .await
            .unwrap();

        assert_eq!(summary(&ranking), vec![(1, "alice", 2500), (2, "bob", 1500)]);
        assert!(!ranking.has_more);
        assert_eq!(ranking.next_cursor, None);
        assert_eq!(ranking.total_count, 2);
        assert!(ranking.entries.iter().all(|e| !e.is_current_user));
    }

    #[tokio::test]
    async fn test_pagination_follows_cursor() {
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(setup());
        let handler = GetScoreRankingHandler::new();

        let first = handler
            .handle(ranking_query(Some(1), None), &uow, &config())
            .await
            .unwrap();
        assert_eq!(summary(&first), vec![(1, "alice", 2500)]);
        assert!(first.has_more);
        assert_eq!(first.next_cursor, Some(2));

        let second = handler
            .handle(ranking_query(Some(1), first.next_cursor), &uow, &config())
            .await
            .unwrap();
        assert_eq!(summary(&second), vec![(2, "bob", 1500)]);
        assert!(!second.has_more);
        assert_eq!(second.next_cursor, None);
        assert_eq!(second.total_count, 2);
    }

    #[tokio::test]
    async fn test_blocked_and_banned_users_are_hidden() {
        let mock = setup();
        mock.user_store().add_user(user_factory(UserFactoryOptions {
            id: Some(4),
            is_banned: Some(true),
            ..Default::default()
        }));
        mock.score_store().add_score(score(6, 4, 99_999));
        mock.relationship_store().block(3, 1);
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(mock);

        let ranking = GetScoreRankingHandler::new()
            .handle(ranking_query(None, None), &uow, &config())
            .await
            .unwrap();

        assert_eq!(summary(&ranking), vec![(1, "alice", 2500)]);
        assert_eq!(ranking.total_count, 1);
    }

    #[tokio::test]
    async fn test_viewer_entry_is_flagged() {
        let mock = setup();
        mock.score_store().add_score(score(6, 1, 1700));
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(mock);

        let ranking = GetScoreRankingHandler::new()
            .handle(ranking_query(None, None), &uow, &config())
            .await
            .unwrap();

        let flags: Vec<(&str, bool)> = ranking
            .entries
            .iter()
            .map(|e| (e.user.username.as_str(), e.is_current_user))
            .collect();
        assert_eq!(flags, vec![("alice", false), ("viewer", true), ("bob", false)]);
    }

    #[tokio::test]
    async fn test_empty_partition_is_not_an_error() {
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(setup());

        let mut query = ranking_query(None, None);
        query.game_id = "unknown-game".to_string();
        let ranking = GetScoreRankingHandler::new()
            .handle(query, &uow, &config())
            .await
            .unwrap();

        assert!(ranking.entries.is_empty());
        assert_eq!(ranking.total_count, 0);
        assert!(!ranking.has_more);
    }

    #[tokio::test]
    async fn test_invalid_parameters() {
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(setup());
        let handler = GetScoreRankingHandler::new();

        let mut query = ranking_query(None, None);
        query.game_id = " ".to_string();
        let result = handler.handle(query, &uow, &config()).await;
        assert!(matches!(result, Err(ApplicationError::Game(GameError::MissingGameId))));

        let result = handler
            .handle(ranking_query(Some(0), None), &uow, &config())
            .await;
        assert!(matches!(result, Err(ApplicationError::Game(GameError::InvalidPageLimit(_)))));

        let result = handler
            .handle(ranking_query(None, Some(12345)), &uow, &config())
            .await;
        assert!(matches!(result, Err(ApplicationError::Game(GameError::InvalidCursor(_)))));
    }

    #[tokio::test]
    async fn test_oversized_limit_falls_back_to_default() {
        let mock = setup();
        for user_id in 10..40 {
            mock.user_store().add_user(user(user_id, &format!("user-{user_id}")));
            mock.score_store().add_score(score(100 + user_id, user_id, user_id));
        }
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(mock);

        let ranking = GetScoreRankingHandler::new()
            .handle(ranking_query(Some(500), None), &uow, &config())
            .await
            .unwrap();

        assert_eq!(ranking.entries.len(), 20);
        assert!(ranking.has_more);
        assert_eq!(ranking.total_count, 32);
    }

    #[tokio::test]
    async fn test_unknown_viewer() {
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(setup());

        let mut query = ranking_query(None, None);
        query.viewer_id = 999;
        let result = GetScoreRankingHandler::new().handle(query, &uow, &config()).await;

        assert!(matches!(
            result,
            Err(ApplicationError::Db(DbError::UserByIdNotFound(999)))
        ));
    }

    #[tokio::test]
    async fn test_banned_viewer_is_logged_out() {
        let mock = setup();
        mock.user_store().add_user(user_factory(UserFactoryOptions {
            id: Some(1),
            username: Some("viewer"),
            is_banned: Some(true),
            ..Default::default()
        }));
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(mock);

        let result = GetScoreRankingHandler::new()
            .handle(ranking_query(None, None), &uow, &config())
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::App(podium_core::AppError::AuthenticationRequired))
        ));
    }

    #[tokio::test]
    async fn test_ranked_user_without_profile_is_a_server_error() {
        let mock = setup();
        mock.score_store().add_score(score(6, 9, 3000));
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(mock);

        let result = GetScoreRankingHandler::new()
            .handle(ranking_query(None, None), &uow, &config())
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Db(DbError::MissingProfile(9)))
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_not_an_empty_ranking() {
        let mock = MockUnitOfWork::with_failing_scores();
        mock.user_store().add_user(user(1, "viewer"));
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(mock);

        let result = GetScoreRankingHandler::new()
            .handle(ranking_query(None, None), &uow, &config())
            .await;

        assert!(matches!(result, Err(ApplicationError::Db(DbError::Transaction(_)))));
    }
}
