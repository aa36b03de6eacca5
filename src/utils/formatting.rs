//! Formatting utilities used for CLI outputs.

use crate::models::action::Action;

/// es: 02h 25m 10s, or 25m 10s under an hour
pub fn secs2readable(secs: i64) -> String {
    let s = secs.max(0);
    let hours = s / 3600;
    let minutes = (s % 3600) / 60;
    let seconds = s % 60;

    if hours > 0 {
        format!("{:02}h {:02}m {:02}s", hours, minutes, seconds)
    } else {
        format!("{:02}m {:02}s", minutes, seconds)
    }
}

/// Returns a textual description and an ANSI color for the action.
/// Used in event listings and human-readable output.
pub fn describe_action(action: Action) -> (&'static str, &'static str) {
    match action {
        Action::Created => ("Created", "\x1b[34m"),
        Action::Completed => ("Completed", "\x1b[32m"),
        Action::Deleted => ("Deleted", "\x1b[31m"),
        Action::Acknowledged => ("Acknowledged", "\x1b[36m"),
        Action::Modified => ("Modified", "\x1b[33m"),
        Action::ClockIn => ("Clock-in", "\x1b[32m"),
        Action::ClockOut => ("Clock-out", "\x1b[31m"),
    }
}
