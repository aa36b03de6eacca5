use chrono::{DateTime, Local};
use serde::Serialize;

/// One continuous clock-in interval for one subject.
/// At most one session per subject may have `clock_out == None`.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub session_id: String, // opaque UUID token
    pub subject_id: String,
    pub clock_in: DateTime<Local>,
    pub clock_out: Option<DateTime<Local>>,
    pub device_info: String,
}

impl Session {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Elapsed seconds, up to clock-out or now for an open session.
    pub fn elapsed_seconds(&self) -> i64 {
        let end = self.clock_out.unwrap_or_else(Local::now);
        (end - self.clock_in).num_seconds().max(0)
    }
}
