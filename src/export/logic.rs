// src/export/logic.rs

use crate::core::event_log::EventLog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_events, load_sessions};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::csv::write_sessions_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::write_json;
use crate::export::notify_export_success;
use crate::export::range::parse_range;
use crate::models::event::EventFilter;
use crate::ui::messages::warning;

use std::io;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export events (or sessions) to a file.
    ///
    /// - `format`: "csv" | "json"
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or expressions like:
    ///   - `YYYY`
    ///   - `YYYY-MM`
    ///   - `YYYY-MM-DD`
    ///   - `YYYY:YYYY`
    ///   - `YYYY-MM:YYYY-MM`
    ///   - `YYYY-MM-DD:YYYY-MM-DD`
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        sessions: bool,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        if sessions {
            return Self::export_sessions(pool, &format, path);
        }

        let mut filter = EventFilter::default();
        match range {
            None => {}
            Some(r) if r.eq_ignore_ascii_case("all") => {}
            Some(r) => {
                let (start, end) = parse_range(r)?;
                filter.start_date = Some(start);
                filter.end_date = Some(end);
            }
        }

        let events = load_events(pool, &filter)?;
        if events.is_empty() {
            warning("⚠️  No events found for selected range.");
            return Ok(());
        }

        match format {
            ExportFormat::Csv => std::fs::write(path, EventLog::to_csv(&events))?,
            ExportFormat::Json => write_json(&path.to_string_lossy(), &events)?,
        }

        notify_export_success(format.as_str(), path);
        Ok(())
    }

    fn export_sessions(pool: &mut DbPool, format: &ExportFormat, path: &Path) -> AppResult<()> {
        if !matches!(format, ExportFormat::Csv) {
            return Err(AppError::InvalidExportFormat(format!(
                "session export supports csv only, got {}",
                format.as_str()
            )));
        }

        let sessions = load_sessions(pool)?;
        if sessions.is_empty() {
            warning("⚠️  No sessions found.");
            return Ok(());
        }

        write_sessions_csv(&path.to_string_lossy(), &sessions)?;
        notify_export_success("sessions", path);
        Ok(())
    }
}
