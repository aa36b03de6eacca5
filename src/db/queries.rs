use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::action::Action;
use crate::models::event::{ActivityEvent, EventDraft, EventFilter};
use crate::models::session::Session;
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

const EVENT_COLUMNS: &str = "id, timestamp, action, subject_id, task_id, task_name, \
     category, status, date, idle_seconds, acknowledged, acknowledged_by, acknowledged_at, meta";

fn conversion_err(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

pub fn map_event_row(row: &Row) -> Result<ActivityEvent> {
    let ts_str: String = row.get("timestamp")?;
    let timestamp = DateTime::parse_from_rfc3339(&ts_str)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| conversion_err(AppError::InvalidDate(ts_str.clone())))?;

    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_err(AppError::InvalidDate(date_str.clone())))?;

    let action_str: String = row.get("action")?;
    let action = Action::from_db_str(&action_str)
        .ok_or_else(|| conversion_err(AppError::InvalidAction(action_str.clone())))?;

    let meta_str: String = row.get("meta")?;
    let meta = if meta_str.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&meta_str)
            .map_err(|_| conversion_err(AppError::Validation(format!("bad meta: {}", meta_str))))?
    };

    Ok(ActivityEvent {
        id: row.get("id")?,
        timestamp,
        action,
        subject_id: row.get("subject_id")?,
        task_id: row.get("task_id")?,
        task_name: row.get("task_name")?,
        category: row.get("category")?,
        status: row.get("status")?,
        date,
        idle_seconds: row.get("idle_seconds")?,
        acknowledged: row.get::<_, i64>("acknowledged")? == 1,
        acknowledged_by: row.get("acknowledged_by")?,
        acknowledged_at: row.get("acknowledged_at")?,
        meta,
    })
}

/// Insert a sealed draft; the log id comes from AUTOINCREMENT so append
/// order and id order always agree.
pub fn insert_event(
    conn: &Connection,
    draft: &EventDraft,
    timestamp: &DateTime<Local>,
) -> AppResult<i64> {
    let meta_str = match &draft.meta {
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    };

    conn.execute(
        "INSERT INTO events (timestamp, action, subject_id, task_id, task_name,
                             category, status, date, idle_seconds, acknowledged,
                             acknowledged_by, acknowledged_at, meta)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            timestamp.to_rfc3339(),
            draft.action.to_db_str(),
            draft.subject_id,
            draft.task_id,
            draft.task_name,
            draft.category,
            draft.status,
            timestamp.date_naive().format("%Y-%m-%d").to_string(),
            draft.idle_seconds,
            if draft.acknowledged { 1 } else { 0 },
            draft.acknowledged_by,
            draft.acknowledged_at,
            meta_str,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Load events matching the filter, in append (id) order.
pub fn load_events(pool: &mut DbPool, filter: &EventFilter) -> AppResult<Vec<ActivityEvent>> {
    let mut sql = format!("SELECT {} FROM events", EVENT_COLUMNS);
    let mut clauses: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(action) = filter.action {
        clauses.push(format!("action = ?{}", values.len() + 1));
        values.push(Box::new(action.to_db_str().to_string()));
    }
    if let Some(subject) = &filter.subject_id {
        clauses.push(format!("subject_id = ?{}", values.len() + 1));
        values.push(Box::new(subject.clone()));
    }
    if let Some(category) = &filter.category {
        clauses.push(format!("category = ?{}", values.len() + 1));
        values.push(Box::new(category.clone()));
    }
    if let Some(start) = filter.start_date {
        clauses.push(format!("date >= ?{}", values.len() + 1));
        values.push(Box::new(start.format("%Y-%m-%d").to_string()));
    }
    if let Some(end) = filter.end_date {
        clauses.push(format!("date <= ?{}", values.len() + 1));
        values.push(Box::new(end.format("%Y-%m-%d").to_string()));
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY id ASC");

    let mut stmt = pool.conn.prepare(&sql)?;
    let params: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
    let rows = stmt.query_map(rusqlite::params_from_iter(params), map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Full log in append order, for recompute and export.
pub fn load_all_events(pool: &mut DbPool) -> AppResult<Vec<ActivityEvent>> {
    load_events(pool, &EventFilter::default())
}

pub fn count_events(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
}

/// Bulk-delete events strictly older than the cutoff date.
/// Returns the number of rows removed.
pub fn delete_events_before(conn: &Connection, cutoff: &NaiveDate) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM events WHERE date < ?1",
        [cutoff.format("%Y-%m-%d").to_string()],
    )?;
    Ok(n)
}

// ---------------------------
// Sessions
// ---------------------------

pub fn map_session_row(row: &Row) -> Result<Session> {
    let parse = |s: String| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Local))
            .map_err(|_| conversion_err(AppError::InvalidDate(s)))
    };

    let clock_in: String = row.get("clock_in")?;
    let clock_out: Option<String> = row.get("clock_out")?;

    Ok(Session {
        session_id: row.get("session_id")?,
        subject_id: row.get("subject_id")?,
        clock_in: parse(clock_in)?,
        clock_out: clock_out.map(parse).transpose()?,
        device_info: row.get("device_info")?,
    })
}

pub fn insert_session(conn: &Connection, session: &Session) -> AppResult<()> {
    conn.execute(
        "INSERT INTO sessions (session_id, subject_id, clock_in, clock_out, device_info)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            session.session_id,
            session.subject_id,
            session.clock_in.to_rfc3339(),
            session.clock_out.map(|dt| dt.to_rfc3339()),
            session.device_info,
        ],
    )?;
    Ok(())
}

/// The one mutation a session ever sees: setting its clock-out.
pub fn close_session(
    conn: &Connection,
    session_id: &str,
    clock_out: &DateTime<Local>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE sessions SET clock_out = ?1 WHERE session_id = ?2",
        params![clock_out.to_rfc3339(), session_id],
    )?;
    Ok(())
}

pub fn find_session(conn: &Connection, session_id: &str) -> AppResult<Option<Session>> {
    let mut stmt = conn.prepare(
        "SELECT session_id, subject_id, clock_in, clock_out, device_info
         FROM sessions WHERE session_id = ?1",
    )?;
    Ok(stmt.query_row([session_id], map_session_row).optional()?)
}

pub fn find_open_session(conn: &Connection, subject_id: &str) -> AppResult<Option<Session>> {
    let mut stmt = conn.prepare(
        "SELECT session_id, subject_id, clock_in, clock_out, device_info
         FROM sessions WHERE subject_id = ?1 AND clock_out IS NULL",
    )?;
    Ok(stmt.query_row([subject_id], map_session_row).optional()?)
}

pub fn load_sessions(pool: &mut DbPool) -> AppResult<Vec<Session>> {
    let mut stmt = pool.conn.prepare(
        "SELECT session_id, subject_id, clock_in, clock_out, device_info
         FROM sessions ORDER BY clock_in ASC",
    )?;

    let rows = stmt.query_map([], map_session_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
