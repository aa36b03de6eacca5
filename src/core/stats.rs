use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::db::pool::DbPool;
use crate::db::queries::load_all_events;
use crate::errors::AppResult;
use crate::models::action::Action;
use crate::models::event::ActivityEvent;
use crate::models::stats::{AggregateStats, HistoryEntry, SubjectStats};

pub const DEFAULT_HISTORY_LIMIT: usize = 25;

/// Incremental statistics over the event log.
///
/// State is always equal to a chronological fold of every event applied so
/// far; `recompute_from_log` rebuilds the same state from storage and is the
/// recovery path. The caller guarantees single delivery of each event (the
/// Tracker holds append + apply inside one critical section).
pub struct StatsAggregator {
    history_limit: usize,
    global: AggregateStats,
    subjects: HashMap<String, SubjectStats>,
    // insertion order of subjects, for stable leaderboard ties
    order: Vec<String>,
}

impl StatsAggregator {
    pub fn new(history_limit: usize) -> Self {
        Self {
            history_limit,
            global: AggregateStats::default(),
            subjects: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.global = AggregateStats::default();
        self.subjects.clear();
        self.order.clear();
    }

    pub fn stats(&self) -> &AggregateStats {
        &self.global
    }

    pub fn subject_stats(&self, subject_id: &str) -> Option<&SubjectStats> {
        self.subjects.get(subject_id)
    }

    /// Subjects in first-seen order.
    pub fn subjects_in_order(&self) -> impl Iterator<Item = &SubjectStats> {
        self.order.iter().filter_map(|id| self.subjects.get(id))
    }

    pub fn subject_count(&self) -> usize {
        self.order.len()
    }

    /// Fold one event into global and per-subject counters in one step.
    pub fn apply(&mut self, ev: &ActivityEvent) {
        let date = ev.date_str();

        *self.global.by_status.entry(ev.status.clone()).or_default() += 1;

        match ev.action {
            Action::Created => {
                self.global.total_created += 1;
                self.global
                    .by_category
                    .entry(ev.category.clone())
                    .or_default()
                    .created += 1;
                self.global.by_date.entry(date).or_default().created += 1;
            }
            Action::Completed => {
                self.global.total_completed += 1;
                self.global
                    .by_category
                    .entry(ev.category.clone())
                    .or_default()
                    .completed += 1;
                self.global.by_date.entry(date).or_default().completed += 1;
            }
            Action::Deleted => {
                self.global.total_deleted += 1;
                self.global
                    .by_category
                    .entry(ev.category.clone())
                    .or_default()
                    .deleted += 1;
                self.global.by_date.entry(date).or_default().deleted += 1;
            }
            Action::Acknowledged => {
                self.global.total_acknowledged += 1;
            }
            Action::Modified | Action::ClockIn | Action::ClockOut => {}
        }

        self.apply_subject(ev);
    }

    fn apply_subject(&mut self, ev: &ActivityEvent) {
        let subj = match self.subjects.entry(ev.subject_id.clone()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                self.order.push(ev.subject_id.clone());
                e.insert(SubjectStats::new(&ev.subject_id))
            }
        };

        if let Some(name) = ev.meta.get("subjectName").and_then(|v| v.as_str()) {
            subj.subject_name = name.to_string();
        }

        subj.recent_history.push(HistoryEntry::from_event(ev));
        if subj.recent_history.len() > self.history_limit {
            subj.recent_history.remove(0);
        }

        match ev.action {
            Action::Created => {
                subj.total_assigned += 1;
                subj.by_category
                    .entry(ev.category.clone())
                    .or_default()
                    .created += 1;
            }
            Action::Completed => {
                subj.total_completed += 1;
                subj.by_category
                    .entry(ev.category.clone())
                    .or_default()
                    .completed += 1;
            }
            Action::Deleted => {
                subj.total_deleted += 1;
                subj.by_category
                    .entry(ev.category.clone())
                    .or_default()
                    .deleted += 1;
            }
            Action::Acknowledged => {
                subj.total_acknowledged += 1;
            }
            Action::Modified | Action::ClockIn | Action::ClockOut => {}
        }
    }

    /// Rebuild every counter by folding the full log in append order.
    ///
    /// After retention has compacted the log this produces smaller totals
    /// than a live aggregator that already folded the discarded events; the
    /// running totals, not the raw log, stay authoritative.
    pub fn recompute_from_log(&mut self, pool: &mut DbPool) -> AppResult<()> {
        self.reset();
        for ev in load_all_events(pool)? {
            self.apply(&ev);
        }
        Ok(())
    }
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
