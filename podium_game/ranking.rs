use chrono::{DateTime, Utc};
use std::{cmp::Ordering, collections::HashSet};

use podium_types::{ScoreId, UserId};

use crate::models::score::ScoreRecord;

/// A leaderboard: one game, optionally narrowed to a single stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub game_id: String,
    pub stage_id: Option<String>,
}

impl Partition {
    pub fn new(game_id: impl Into<String>, stage_id: Option<String>) -> Self {
        Self {
            game_id: game_id.into(),
            stage_id,
        }
    }

    pub fn contains(&self, record: &ScoreRecord) -> bool {
        record.game_id == self.game_id
            && self
                .stage_id
                .as_ref()
                .is_none_or(|stage_id| *stage_id == record.stage_id)
    }
}

/// Position of a record in ranking order.
///
/// A smaller key ranks higher: score descending, then earliest `created_at`,
/// then lowest `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankKey {
    pub score: i64,
    pub created_at: DateTime<Utc>,
    pub id: ScoreId,
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.created_at.cmp(&other.created_at))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&ScoreRecord> for RankKey {
    fn from(record: &ScoreRecord) -> Self {
        Self {
            score: record.score,
            created_at: record.created_at,
            id: record.id,
        }
    }
}

/// A user's personal best within a partition, with its 1-based rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub rank: usize,
    pub record: ScoreRecord,
}

impl RankEntry {
    pub fn key(&self) -> RankKey {
        RankKey::from(&self.record)
    }

    pub fn user_id(&self) -> UserId {
        self.record.user_id
    }
}

/// Reduces a partition's submissions to one entry per user (their best), in ranking order.
///
/// Soft-deleted records, records outside the partition and excluded users are
/// dropped before the reduction, whatever the source already filtered.
pub fn best_scores<I>(records: I, partition: &Partition, excluded: &HashSet<UserId>) -> Vec<RankEntry>
where
    I: IntoIterator<Item = ScoreRecord>,
{
    let mut candidates: Vec<ScoreRecord> = records
        .into_iter()
        .filter(|r| !r.is_deleted && partition.contains(r) && !excluded.contains(&r.user_id))
        .collect();

    // One run per user, best record first in each run.
    candidates.sort_by(|a, b| {
        a.user_id
            .cmp(&b.user_id)
            .then_with(|| RankKey::from(a).cmp(&RankKey::from(b)))
    });
    candidates.dedup_by_key(|r| r.user_id);

    candidates.sort_by_key(|r| RankKey::from(r));

    candidates
        .into_iter()
        .enumerate()
        .map(|(idx, record)| RankEntry {
            rank: idx + 1,
            record,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rand::seq::SliceRandom;

    use super::*;
    use crate::test_utils::{ScoreFactoryOptions, score_factory};

    fn partition() -> Partition {
        Partition::new("nag-won", Some("cyber-city".to_string()))
    }

    fn score(id: ScoreId, user_id: UserId, points: i64) -> ScoreRecord {
        score_factory(ScoreFactoryOptions {
            id: Some(id),
            user_id: Some(user_id),
            score: Some(points),
            ..Default::default()
        })
    }

    fn summary(entries: &[RankEntry]) -> Vec<(usize, UserId, i64)> {
        entries
            .iter()
            .map(|e| (e.rank, e.user_id(), e.record.score))
            .collect()
    }

    #[test]
    fn test_basic_ranking_keeps_personal_bests() {
        let records = vec![
            score(1, 1, 2000),
            score(2, 1, 2500),
            score(3, 1, 1800),
            score(4, 2, 1500),
            score(5, 2, 1200),
        ];

        let ranking = best_scores(records, &partition(), &HashSet::new());

        assert_eq!(summary(&ranking), vec![(1, 1, 2500), (2, 2, 1500)]);
        assert_eq!(ranking[0].record.id, 2);
        assert_eq!(ranking[1].record.id, 4);
    }

    #[test]
    fn test_tie_on_score_picks_earliest_submission_in_any_order() {
        let now = Utc::now();
        let early = score_factory(ScoreFactoryOptions {
            id: Some(10),
            user_id: Some(7),
            score: Some(900),
            created_at: Some(now - Duration::minutes(5)),
            ..Default::default()
        });
        let late = score_factory(ScoreFactoryOptions {
            id: Some(3),
            user_id: Some(7),
            score: Some(900),
            created_at: Some(now),
            ..Default::default()
        });

        let mut records = vec![early.clone(), late, score(4, 7, 100), score(5, 7, 899)];
        let mut rng = rand::thread_rng();

        for _ in 0..20 {
            records.shuffle(&mut rng);
            let ranking = best_scores(records.clone(), &partition(), &HashSet::new());
            assert_eq!(ranking.len(), 1);
            assert_eq!(ranking[0].record, early);
        }
    }

    #[test]
    fn test_equal_scores_across_users_rank_earliest_first() {
        let now = Utc::now();
        let first = score_factory(ScoreFactoryOptions {
            id: Some(2),
            user_id: Some(2),
            score: Some(500),
            created_at: Some(now - Duration::seconds(30)),
            ..Default::default()
        });
        let second = score_factory(ScoreFactoryOptions {
            id: Some(1),
            user_id: Some(1),
            score: Some(500),
            created_at: Some(now),
            ..Default::default()
        });

        let ranking = best_scores(vec![second, first], &partition(), &HashSet::new());

        assert_eq!(summary(&ranking), vec![(1, 2, 500), (2, 1, 500)]);
    }

    #[test]
    fn test_ordering_invariant_holds() {
        let mut rng = rand::thread_rng();
        let mut records: Vec<ScoreRecord> = (1..=200)
            .map(|id| score(id, id % 37, (id * 7919) % 1000))
            .collect();
        records.shuffle(&mut rng);

        let ranking = best_scores(records, &partition(), &HashSet::new());

        assert_eq!(ranking.len(), 37);
        for pair in ranking.windows(2) {
            let (a, b) = (&pair[0].record, &pair[1].record);
            assert!(a.score > b.score || (a.score == b.score && a.created_at <= b.created_at));
            assert_eq!(pair[0].rank + 1, pair[1].rank);
        }
        let users: HashSet<UserId> = ranking.iter().map(|e| e.user_id()).collect();
        assert_eq!(users.len(), ranking.len());
    }

    #[test]
    fn test_excluded_users_never_appear() {
        let records = vec![score(1, 1, 9000), score(2, 2, 10), score(3, 3, 500)];
        let excluded = HashSet::from([1]);

        let ranking = best_scores(records, &partition(), &excluded);

        assert_eq!(summary(&ranking), vec![(1, 3, 500), (2, 2, 10)]);
    }

    #[test]
    fn test_everyone_excluded_or_empty_partition() {
        let records = vec![score(1, 1, 100), score(2, 2, 200)];

        let excluded = HashSet::from([1, 2]);
        assert!(best_scores(records, &partition(), &excluded).is_empty());
        assert!(best_scores(Vec::new(), &partition(), &HashSet::new()).is_empty());
    }

    #[test]
    fn test_soft_deleted_records_are_ignored() {
        let deleted_best = score_factory(ScoreFactoryOptions {
            id: Some(2),
            user_id: Some(1),
            score: Some(99_999),
            is_deleted: Some(true),
            ..Default::default()
        });

        let ranking = best_scores(
            vec![score(1, 1, 300), deleted_best],
            &partition(),
            &HashSet::new(),
        );

        assert_eq!(summary(&ranking), vec![(1, 1, 300)]);
    }

    #[test]
    fn test_partition_filters_game_and_stage() {
        let other_stage = score_factory(ScoreFactoryOptions {
            id: Some(2),
            user_id: Some(2),
            score: Some(800),
            stage_id: Some("neon-harbor".to_string()),
            ..Default::default()
        });
        let other_game = score_factory(ScoreFactoryOptions {
            id: Some(3),
            user_id: Some(3),
            score: Some(900),
            game_id: Some("other-game".to_string()),
            ..Default::default()
        });
        let records = vec![score(1, 1, 100), other_stage, other_game];

        let stage = best_scores(records.clone(), &partition(), &HashSet::new());
        assert_eq!(summary(&stage), vec![(1, 1, 100)]);

        let whole_game = best_scores(records, &Partition::new("nag-won", None), &HashSet::new());
        assert_eq!(summary(&whole_game), vec![(1, 2, 800), (2, 1, 100)]);
    }

    #[test]
    fn test_all_stages_keeps_single_best_per_user() {
        let other_stage = score_factory(ScoreFactoryOptions {
            id: Some(2),
            user_id: Some(1),
            score: Some(800),
            stage_id: Some("neon-harbor".to_string()),
            ..Default::default()
        });

        let ranking = best_scores(
            vec![score(1, 1, 100), other_stage],
            &Partition::new("nag-won", None),
            &HashSet::new(),
        );

        assert_eq!(summary(&ranking), vec![(1, 1, 800)]);
        assert_eq!(ranking[0].record.stage_id, "neon-harbor");
    }
}
