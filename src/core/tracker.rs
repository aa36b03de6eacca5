use std::sync::{Arc, Mutex};

use chrono::Local;

use crate::config::Config;
use crate::core::event_log::EventLog;
use crate::core::leaderboard::{Leaderboard, LeaderboardRow, Metric};
use crate::core::retention::RetentionPolicy;
use crate::core::session::SessionManager;
use crate::core::stats::StatsAggregator;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::event::{ActivityEvent, EventDraft, EventFilter};
use crate::models::session::Session;
use crate::models::stats::{AggregateStats, SubjectStats};

/// Composition root: one DbPool plus one StatsAggregator behind `&mut self`,
/// so "append event, then fold into aggregator" is a single critical
/// section and no two events can interleave mid-fold.
///
/// Concurrent callers share a `SharedTracker`; one global lock is the
/// serialization boundary required for the open-session check in clock_in
/// (two racing clock-ins must not both observe "no open session").
pub struct Tracker {
    pool: DbPool,
    stats: StatsAggregator,
}

pub type SharedTracker = Arc<Mutex<Tracker>>;

impl Tracker {
    /// Open the configured database, run migrations and rebuild aggregates
    /// from the log (the recovery path).
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let pool = DbPool::new(&cfg.database)?;
        Self::from_pool(pool, cfg.history_limit)
    }

    /// In-memory tracker, used by library-level tests.
    pub fn open_in_memory() -> AppResult<Self> {
        let pool = DbPool::open_in_memory()?;
        Self::from_pool(pool, crate::core::stats::DEFAULT_HISTORY_LIMIT)
    }

    pub fn from_pool(pool: DbPool, history_limit: usize) -> AppResult<Self> {
        init_db(&pool.conn)?;

        let mut tracker = Self {
            pool,
            stats: StatsAggregator::new(history_limit),
        };
        tracker.stats.recompute_from_log(&mut tracker.pool)?;
        Ok(tracker)
    }

    pub fn into_shared(self) -> SharedTracker {
        Arc::new(Mutex::new(self))
    }

    // ---------------------------
    // Sessions
    // ---------------------------

    pub fn clock_in(&mut self, subject_id: &str, device_info: &str) -> AppResult<Session> {
        let (session, event) = SessionManager::clock_in(&mut self.pool, subject_id, device_info)?;
        self.stats.apply(&event);
        Ok(session)
    }

    pub fn clock_out(&mut self, session_id: &str) -> AppResult<Session> {
        let (session, event) = SessionManager::clock_out(&mut self.pool, session_id)?;
        self.stats.apply(&event);
        Ok(session)
    }

    pub fn open_session(&mut self, subject_id: &str) -> AppResult<Option<Session>> {
        SessionManager::open_session(&mut self.pool, subject_id)
    }

    // ---------------------------
    // Events
    // ---------------------------

    /// Append one task event and fold it into the aggregates.
    pub fn record(&mut self, draft: EventDraft) -> AppResult<ActivityEvent> {
        let event = EventLog::append(&mut self.pool, draft)?;
        self.stats.apply(&event);
        Ok(event)
    }

    pub fn query(&mut self, filter: &EventFilter) -> AppResult<Vec<ActivityEvent>> {
        EventLog::query(&mut self.pool, filter)
    }

    pub fn export_csv(&mut self) -> AppResult<Option<String>> {
        EventLog::export_csv(&mut self.pool)
    }

    // ---------------------------
    // Derived state
    // ---------------------------

    pub fn stats(&self) -> &AggregateStats {
        self.stats.stats()
    }

    pub fn subject_stats(&self, subject_id: &str) -> Option<&SubjectStats> {
        self.stats.subject_stats(subject_id)
    }

    pub fn aggregator(&self) -> &StatsAggregator {
        &self.stats
    }

    pub fn leaderboard(&self, metric: Metric) -> Vec<LeaderboardRow> {
        Leaderboard::rank(&self.stats, metric)
    }

    // ---------------------------
    // Maintenance
    // ---------------------------

    /// Run retention against storage. Live aggregates are left untouched.
    pub fn compact(&mut self, policy: RetentionPolicy) -> AppResult<usize> {
        policy.compact(&mut self.pool, Local::now())
    }

    /// Rebuild aggregates from the (possibly compacted) log.
    pub fn recompute(&mut self) -> AppResult<()> {
        self.stats.recompute_from_log(&mut self.pool)
    }

    /// Direct storage access for export and maintenance commands.
    pub fn pool(&mut self) -> &mut DbPool {
        &mut self.pool
    }
}
