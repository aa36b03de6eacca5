use crate::db::pool::DbPool;
use crate::db::queries::delete_events_before;
use crate::errors::AppResult;
use chrono::{DateTime, Duration, Local};

pub const DEFAULT_RETENTION_DAYS: i64 = 90;

/// Bulk eviction of raw history older than the horizon.
///
/// Compaction touches storage only, never the aggregator: events discarded
/// here were already folded into the running totals, which stay
/// authoritative. A `recompute_from_log` after compaction yields smaller
/// totals than the live aggregator — bounded storage is traded for
/// durability of raw history, not of the totals.
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    pub days_to_keep: i64,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            days_to_keep: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl RetentionPolicy {
    pub fn new(days_to_keep: i64) -> Self {
        Self { days_to_keep }
    }

    /// Delete events dated strictly before `now - days_to_keep`
    /// (day granularity: the cutoff day itself is kept).
    /// Returns the number of rows removed.
    pub fn compact(&self, pool: &mut DbPool, now: DateTime<Local>) -> AppResult<usize> {
        let cutoff = (now - Duration::days(self.days_to_keep)).date_naive();
        delete_events_before(&pool.conn, &cutoff)
    }
}
