use podium_core::GameError;
use podium_types::ScoreId;

use crate::{
    models::score::ScoreRecord,
    ranking::{Partition, RankEntry, RankKey},
};

/// One page of a ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub entries: Vec<RankEntry>,
    pub has_more: bool,
    pub next_cursor: Option<ScoreId>,
    pub total_count: usize,
}

/// Resolves the requested page size.
///
/// No value means `default`. Anything above `max` silently falls back to
/// `default` as well, while zero or negative sizes are rejected.
pub fn page_limit(requested: Option<i64>, default: usize, max: usize) -> Result<usize, GameError> {
    match requested {
        None => Ok(default),
        Some(limit) if limit < 1 => Err(GameError::InvalidPageLimit(limit.to_string())),
        Some(limit) => match usize::try_from(limit) {
            Ok(limit) if limit <= max => Ok(limit),
            _ => Ok(default),
        },
    }
}

/// Turns the record a cursor points at into a position in ranking order.
///
/// The record may be a user's non-best (or since deleted) submission: its key
/// still marks a well defined point in the ordering.
pub fn cursor_key(record: &ScoreRecord, partition: &Partition) -> Result<RankKey, GameError> {
    if !partition.contains(record) {
        return Err(GameError::CursorOutsidePartition(record.id));
    }

    Ok(RankKey::from(record))
}

/// Cuts a page out of a full ranking.
///
/// The page starts right after `cursor` in ranking order (or at the top) and
/// holds at most `limit` entries. `next_cursor` is only set when more entries follow.
pub fn paginate(ranking: Vec<RankEntry>, cursor: Option<RankKey>, limit: usize) -> Page {
    let limit = limit.max(1);
    let total_count = ranking.len();

    let start = cursor.map_or(0, |cursor| ranking.partition_point(|e| e.key() <= cursor));

    let mut entries: Vec<RankEntry> = ranking.into_iter().skip(start).take(limit + 1).collect();
    let has_more = entries.len() > limit;
    entries.truncate(limit);

    let next_cursor = if has_more {
        entries.last().map(|e| e.record.id)
    } else {
        None
    };

    Page {
        entries,
        has_more,
        next_cursor,
        total_count,
    }
}
