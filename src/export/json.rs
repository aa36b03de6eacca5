use crate::errors::{AppError, AppResult};
use crate::models::event::ActivityEvent;

/// Write the events as pretty-printed JSON.
pub fn write_json(path: &str, events: &[ActivityEvent]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(events)
        .map_err(|e| AppError::Export(format!("serialize events: {e}")))?;
    std::fs::write(path, json)?;
    Ok(())
}
