use crate::core::event_log::EventLog;
use crate::db::pool::DbPool;
use crate::db::queries::{close_session, find_open_session, find_session, insert_session};
use crate::errors::{AppError, AppResult};
use crate::models::action::Action;
use crate::models::event::{ActivityEvent, EventDraft};
use crate::models::session::Session;
use chrono::Local;
use serde_json::json;
use uuid::Uuid;

/// Time-clock lifecycle: closed → open → closed, with `open` reachable only
/// through `clock_in`. Every successful call appends exactly one event.
///
/// Callers must serialize invocations per subject (Tracker wraps this in a
/// single critical section); the partial unique index on sessions backs the
/// invariant up at the SQL level.
pub struct SessionManager;

impl SessionManager {
    /// Open a session for the subject. Fails with Conflict while another
    /// session for the same subject is still open.
    pub fn clock_in(
        pool: &mut DbPool,
        subject_id: &str,
        device_info: &str,
    ) -> AppResult<(Session, ActivityEvent)> {
        if subject_id.trim().is_empty() {
            return Err(AppError::Validation("subject_id must not be empty".into()));
        }

        if find_open_session(&pool.conn, subject_id)?.is_some() {
            return Err(AppError::Conflict(subject_id.to_string()));
        }

        let session = Session {
            session_id: Uuid::new_v4().to_string(),
            subject_id: subject_id.to_string(),
            clock_in: Local::now(),
            clock_out: None,
            device_info: device_info.to_string(),
        };

        insert_session(&pool.conn, &session)?;

        let mut draft = EventDraft::new(Action::ClockIn, subject_id);
        draft.status = "open".to_string();
        draft.meta = json!({
            "sessionId": session.session_id,
            "deviceInfo": session.device_info,
        });
        let event = EventLog::append(pool, draft)?;

        Ok((session, event))
    }

    /// Close a session by id. NotFound for unknown ids, AlreadyClosed when
    /// clock-out was already set. The appended event carries the elapsed
    /// duration in seconds.
    pub fn clock_out(pool: &mut DbPool, session_id: &str) -> AppResult<(Session, ActivityEvent)> {
        let mut session = find_session(&pool.conn, session_id)?
            .ok_or_else(|| AppError::NotFound(session_id.to_string()))?;

        if session.clock_out.is_some() {
            return Err(AppError::AlreadyClosed(session_id.to_string()));
        }

        let now = Local::now();
        close_session(&pool.conn, session_id, &now)?;
        session.clock_out = Some(now);

        let mut draft = EventDraft::new(Action::ClockOut, &session.subject_id);
        draft.status = "closed".to_string();
        draft.meta = json!({
            "sessionId": session.session_id,
            "durationSecs": session.elapsed_seconds(),
        });
        let event = EventLog::append(pool, draft)?;

        Ok((session, event))
    }

    /// Read-only lookup of the unique open session, if any.
    pub fn open_session(pool: &mut DbPool, subject_id: &str) -> AppResult<Option<Session>> {
        find_open_session(&pool.conn, subject_id)
    }
}
