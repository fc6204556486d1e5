use std::collections::HashMap;

use podium_core::{ApplicationError, DbError, GameError, Result};
use podium_game::ranking::{Partition, RankEntry, best_scores};
use podium_types::{UserId, common::UserProfile};

use crate::{cqrs::queries::RankedScore, uow::UnitOfWork};

/// Builds the partition for a ranking read. A blank stage means "all stages".
pub(crate) fn partition_from(game_id: &str, stage_id: Option<String>) -> Result<Partition, GameError> {
    let game_id = game_id.trim();
    if game_id.is_empty() {
        return Err(GameError::MissingGameId);
    }
    let stage_id = stage_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(Partition::new(game_id, stage_id))
}

/// Full best-score ranking of a partition, as seen by `viewer_id`.
pub(crate) async fn load_ranking(
    uow: &Box<dyn UnitOfWork<'_> + '_>,
    viewer_id: UserId,
    partition: &Partition,
) -> Result<Vec<RankEntry>, ApplicationError> {
    let excluded = uow.relationships().excluded_user_ids(viewer_id).await?;
    let records = uow.scores().list_by_partition(partition).await?;

    Ok(best_scores(records, partition, &excluded))
}

/// Attaches public profiles to ranking entries.
pub(crate) async fn with_profiles(
    uow: &Box<dyn UnitOfWork<'_> + '_>,
    viewer_id: UserId,
    entries: Vec<RankEntry>,
) -> Result<Vec<RankedScore>, ApplicationError> {
    let user_ids: Vec<UserId> = entries.iter().map(|e| e.user_id()).collect();
    let mut profiles: HashMap<UserId, UserProfile> = uow.users().get_profiles(&user_ids).await?;

    entries
        .into_iter()
        .map(|entry| {
            let user_id = entry.user_id();
            let user = profiles
                .remove(&user_id)
                .ok_or_else(|| ApplicationError::Db(DbError::MissingProfile(user_id)))?;

            Ok(RankedScore {
                rank: entry.rank,
                record: entry.record,
                user,
                is_current_user: user_id == viewer_id,
            })
        })
        .collect()
}
