use super::action::Action;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// One immutable fact in the activity log.
/// Field order matches the `events` table and the CSV export header.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEvent {
    pub id: i64,                         // ⇔ events.id (AUTOINCREMENT)
    pub timestamp: DateTime<Local>,      // ⇔ events.timestamp (TEXT, ISO8601)
    pub action: Action,                  // ⇔ events.action
    pub subject_id: String,              // ⇔ events.subject_id
    pub task_id: Option<i64>,            // ⇔ events.task_id (NULL for clock events)
    pub task_name: String,               // ⇔ events.task_name
    pub category: String,                // ⇔ events.category (free-form work area)
    pub status: String,                  // ⇔ events.status
    pub date: NaiveDate,                 // ⇔ events.date (TEXT "YYYY-MM-DD")
    pub idle_seconds: i64,               // ⇔ events.idle_seconds
    pub acknowledged: bool,              // ⇔ events.acknowledged (0/1)
    pub acknowledged_by: Option<String>, // ⇔ events.acknowledged_by
    pub acknowledged_at: Option<String>, // ⇔ events.acknowledged_at (TEXT, ISO8601)
    pub meta: serde_json::Value,         // ⇔ events.meta (TEXT, JSON bag)
}

impl ActivityEvent {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.to_rfc3339()
    }
}

/// Predicates for `EventLog::query`. All fields optional, combined with AND;
/// the date range is inclusive on both ends.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub action: Option<Action>,
    pub subject_id: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// An event before the log has assigned its id and timestamp.
/// Built by callers, validated and sealed by `EventLog::append`.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub action: Action,
    pub subject_id: String,
    pub task_id: Option<i64>,
    pub task_name: String,
    pub category: String,
    pub status: String,
    pub idle_seconds: i64,
    pub acknowledged: bool,
    pub acknowledged_by: Option<String>,
    pub acknowledged_at: Option<String>,
    pub meta: serde_json::Value,
}

impl EventDraft {
    pub fn new(action: Action, subject_id: &str) -> Self {
        Self {
            action,
            subject_id: subject_id.to_string(),
            task_id: None,
            task_name: String::new(),
            category: String::new(),
            status: String::new(),
            idle_seconds: 0,
            acknowledged: false,
            acknowledged_by: None,
            acknowledged_at: None,
            meta: serde_json::Value::Null,
        }
    }

    /// Reject malformed drafts before anything touches the log.
    pub fn validate(&self) -> AppResult<()> {
        if self.subject_id.trim().is_empty() {
            return Err(AppError::Validation("subject_id must not be empty".into()));
        }
        if self.idle_seconds < 0 {
            return Err(AppError::Validation(format!(
                "idle_seconds must be non-negative, got {}",
                self.idle_seconds
            )));
        }
        Ok(())
    }

    /// Seal the draft into a full event at the given append position.
    pub fn seal(self, id: i64, timestamp: DateTime<Local>) -> ActivityEvent {
        ActivityEvent {
            id,
            timestamp,
            action: self.action,
            subject_id: self.subject_id,
            task_id: self.task_id,
            task_name: self.task_name,
            category: self.category,
            status: self.status,
            date: timestamp.date_naive(),
            idle_seconds: self.idle_seconds,
            acknowledged: self.acknowledged,
            acknowledged_by: self.acknowledged_by,
            acknowledged_at: self.acknowledged_at,
            meta: self.meta,
        }
    }
}
