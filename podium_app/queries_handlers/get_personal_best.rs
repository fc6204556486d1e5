use async_trait::async_trait;
use std::sync::Arc;

use podium_core::ApplicationError;

use crate::{
    auth::session_user,
    config::Config,
    cqrs::{
        Query, QueryHandler,
        queries::{GetPersonalBest, PersonalBest, RankedScore},
    },
    queries_handlers::helpers::{load_ranking, partition_from},
    uow::UnitOfWork,
};

pub struct GetPersonalBestHandler {}

impl GetPersonalBestHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetPersonalBest> for GetPersonalBestHandler {
    async fn handle(
        &self,
        query: GetPersonalBest,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetPersonalBest as Query>::Output, ApplicationError> {
        let partition = partition_from(&query.game_id, query.stage_id)?;
        let viewer = session_user(uow, query.viewer_id).await?;

        let ranking = load_ranking(uow, viewer.id, &partition).await?;
        let total_count = ranking.len();

        let entry = ranking
            .into_iter()
            .find(|e| e.user_id() == viewer.id)
            .map(|e| RankedScore {
                rank: e.rank,
                record: e.record,
                user: viewer.profile.clone(),
                is_current_user: true,
            });

        Ok(PersonalBest { entry, total_count })
    }
}
