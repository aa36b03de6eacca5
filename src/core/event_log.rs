use crate::db::pool::DbPool;
use crate::db::queries::{insert_event, load_all_events, load_events};
use crate::errors::AppResult;
use crate::models::event::{ActivityEvent, EventDraft, EventFilter};
use chrono::Local;
use serde_json::json;

/// Header of the CSV export: record field names in insertion order,
/// the shape exchanged with external collaborators.
const CSV_FIELDS: [&str; 13] = [
    "eventId",
    "timestamp",
    "action",
    "subjectId",
    "taskId",
    "taskName",
    "category",
    "status",
    "date",
    "idleSeconds",
    "acknowledged",
    "acknowledgedBy",
    "acknowledgedAt",
];

/// Append-only activity log. Rows are immutable once written; ids are
/// assigned by the database and strictly increase in append order.
pub struct EventLog;

impl EventLog {
    /// Validate and append one event. The draft is rejected (and the log
    /// left untouched) when its fields are malformed; storage failures
    /// surface as-is, never retried.
    pub fn append(pool: &mut DbPool, draft: EventDraft) -> AppResult<ActivityEvent> {
        draft.validate()?;

        let now = Local::now();
        let id = insert_event(&pool.conn, &draft, &now)?;

        Ok(draft.seal(id, now))
    }

    /// Filtered read in append order.
    pub fn query(pool: &mut DbPool, filter: &EventFilter) -> AppResult<Vec<ActivityEvent>> {
        load_events(pool, filter)
    }

    /// Serialize the whole log as CSV text, one JSON-stringified cell per
    /// field. Returns None when the log is empty.
    pub fn export_csv(pool: &mut DbPool) -> AppResult<Option<String>> {
        let events = load_all_events(pool)?;
        if events.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self::to_csv(&events)))
    }

    /// CSV text for an already-loaded slice of events (export paths reuse
    /// this so the cell format is defined in exactly one place).
    pub fn to_csv(events: &[ActivityEvent]) -> String {
        let mut out = CSV_FIELDS.join(",");
        out.push('\n');

        for ev in events {
            let cells = [
                json!(ev.id),
                json!(ev.timestamp_str()),
                json!(ev.action.to_db_str()),
                json!(ev.subject_id),
                json!(ev.task_id),
                json!(ev.task_name),
                json!(ev.category),
                json!(ev.status),
                json!(ev.date_str()),
                json!(ev.idle_seconds),
                json!(ev.acknowledged),
                json!(ev.acknowledged_by),
                json!(ev.acknowledged_at),
            ];

            let row: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
            out.push_str(&row.join(","));
            out.push('\n');
        }

        out
    }
}
