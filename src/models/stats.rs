use std::collections::HashMap;

use serde::Serialize;

use super::action::Action;
use super::event::ActivityEvent;

/// Per-category counters, created lazily on first occurrence of a key.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CategoryCounts {
    pub created: i64,
    pub completed: i64,
    pub deleted: i64,
}

/// Global running counters derived from the event log.
/// Always equal to a chronological fold of every non-retained event.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AggregateStats {
    pub total_created: i64,
    pub total_completed: i64,
    pub total_deleted: i64,
    pub total_acknowledged: i64,
    pub by_category: HashMap<String, CategoryCounts>,
    pub by_status: HashMap<String, i64>,
    pub by_date: HashMap<String, CategoryCounts>,
}

/// Compact event summary kept in a subject's bounded history.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub event_id: i64,
    pub action: Action,
    pub task_name: String,
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn from_event(ev: &ActivityEvent) -> Self {
        Self {
            event_id: ev.id,
            action: ev.action,
            task_name: ev.task_name.clone(),
            timestamp: ev.timestamp_str(),
        }
    }
}

/// Running counters for one subject. Rates are computed on read, never
/// stored, so counters and rates cannot drift apart.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SubjectStats {
    pub subject_id: String,
    pub subject_name: String,
    pub total_assigned: i64,
    pub total_completed: i64,
    pub total_acknowledged: i64,
    pub total_deleted: i64,
    pub by_category: HashMap<String, CategoryCounts>,
    pub recent_history: Vec<HistoryEntry>,
}

impl SubjectStats {
    pub fn new(subject_id: &str) -> Self {
        Self {
            subject_id: subject_id.to_string(),
            subject_name: subject_id.to_string(),
            ..Default::default()
        }
    }

    /// round(100 * completed / max(1, assigned - deleted)).
    /// The max(1, ..) floor keeps the division defined; with nothing
    /// completed the rate is 0 even when the denominator would be <= 0.
    pub fn completion_rate(&self) -> i64 {
        rate(self.total_completed, self.total_assigned - self.total_deleted)
    }

    /// Same formula with the acknowledged counter.
    pub fn acknowledgment_rate(&self) -> i64 {
        rate(
            self.total_acknowledged,
            self.total_assigned - self.total_deleted,
        )
    }
}

fn rate(numerator: i64, denominator: i64) -> i64 {
    (100.0 * numerator as f64 / denominator.max(1) as f64).round() as i64
}
