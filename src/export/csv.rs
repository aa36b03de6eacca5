use crate::models::session::Session;
use csv::Writer;

/// Write the session table as CSV to the given file.
pub fn write_sessions_csv(path: &str, sessions: &[Session]) -> std::io::Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "session_id",
        "subject_id",
        "clock_in",
        "clock_out",
        "device_info",
    ])?;

    for s in sessions {
        wtr.write_record(&[
            s.session_id.clone(),
            s.subject_id.clone(),
            s.clock_in.to_rfc3339(),
            s.clock_out.map(|dt| dt.to_rfc3339()).unwrap_or_default(),
            s.device_info.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
