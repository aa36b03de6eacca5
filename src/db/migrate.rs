use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `oplog` table exists with the modern schema.
fn ensure_oplog_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS oplog (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `events` table exists.
fn events_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='events'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `events` table: the append-only activity log.
/// Rows are never updated; retention deletes in bulk by date.
fn create_events_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp       TEXT NOT NULL,
            action          TEXT NOT NULL CHECK(action IN
                ('created','completed','deleted','acknowledged','modified','clock_in','clock_out')),
            subject_id      TEXT NOT NULL,
            task_id         INTEGER,
            task_name       TEXT NOT NULL DEFAULT '',
            category        TEXT NOT NULL DEFAULT '',
            status          TEXT NOT NULL DEFAULT '',
            date            TEXT NOT NULL,
            idle_seconds    INTEGER NOT NULL DEFAULT 0 CHECK(idle_seconds >= 0),
            acknowledged    INTEGER NOT NULL DEFAULT 0,
            acknowledged_by TEXT,
            acknowledged_at TEXT,
            meta            TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);
        CREATE INDEX IF NOT EXISTS idx_events_subject_action ON events(subject_id, action);
        "#,
    )?;
    Ok(())
}

/// Create the `sessions` table. `clock_out IS NULL` marks the open session;
/// the partial unique index enforces at most one per subject at the SQL level
/// as a second line of defense behind SessionManager.
fn create_sessions_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            session_id  TEXT PRIMARY KEY,
            subject_id  TEXT NOT NULL,
            clock_in    TEXT NOT NULL,
            clock_out   TEXT,
            device_info TEXT NOT NULL DEFAULT ''
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_open
            ON sessions(subject_id) WHERE clock_out IS NULL;
        CREATE INDEX IF NOT EXISTS idx_sessions_subject ON sessions(subject_id);
        "#,
    )?;
    Ok(())
}

/// Mark a migration as applied in the oplog, once.
fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM oplog
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(false); // already applied
    }

    conn.execute(
        "INSERT INTO oplog (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(true)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure oplog table (migration bookkeeping lives there)
    ensure_oplog_table(conn)?;

    // 2) Ensure core tables
    let fresh = !events_table_exists(conn)?;
    create_events_table(conn)?;
    create_sessions_table(conn)?;

    // 3) Record the schema version once
    if mark_applied(
        conn,
        "20250614_0001_base_schema",
        "Created events, sessions and oplog tables",
    )? && fresh
    {
        success("Created events and sessions tables (base schema).");
    }

    Ok(())
}
