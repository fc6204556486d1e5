use std::sync::Arc;

use podium_core::{ApplicationError, GameError, Result};
use podium_game::models::score::ScoreRecord;

use crate::{
    auth::session_user,
    config::Config,
    cqrs::{CommandHandler, commands::SubmitScore},
    uow::UnitOfWork,
};

pub struct SubmitScoreCommandHandler {}

impl Default for SubmitScoreCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitScoreCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<SubmitScore> for SubmitScoreCommandHandler {
    async fn handle(
        &self,
        command: SubmitScore,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<ScoreRecord, ApplicationError> {
        let user = session_user(uow, command.user_id).await?;

        let score = command
            .submission
            .validate()
            .map_err(GameError::InvalidSubmission)?;

        let record = uow.scores().insert(user.id, &score).await?;

        tracing::info!(
            score_id = record.id,
            user_id = record.user_id,
            game_id = %record.game_id,
            stage_id = %record.stage_id,
            score = record.score,
            "Score submitted"
        );

        Ok(record)
    }
}
