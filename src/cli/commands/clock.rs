use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Tracker;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::colors::{GREY, RESET};
use crate::utils::formatting::secs2readable;

/// Handlers for the `in`, `out` and `status` commands.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::In { subject, device } => {
            let mut tracker = Tracker::open(cfg)?;
            let device = device.as_deref().unwrap_or(&cfg.default_device);

            let session = tracker.clock_in(subject, device)?;

            success(format!(
                "🕘 Clocked in '{}' at {} (session {}).",
                session.subject_id,
                session.clock_in.format("%Y-%m-%d %H:%M"),
                session.session_id
            ));
            Ok(())
        }

        Commands::Out { subject, session } => {
            let mut tracker = Tracker::open(cfg)?;

            let session_id = match session {
                Some(id) => id.clone(),
                None => tracker
                    .open_session(subject)?
                    .map(|s| s.session_id)
                    .ok_or_else(|| AppError::NotFound(subject.clone()))?,
            };

            let closed = tracker.clock_out(&session_id)?;

            success(format!(
                "🕔 Clocked out '{}' after {}.",
                closed.subject_id,
                secs2readable(closed.elapsed_seconds())
            ));
            Ok(())
        }

        Commands::Status { subject } => {
            let mut tracker = Tracker::open(cfg)?;

            match tracker.open_session(subject)? {
                Some(session) => {
                    println!(
                        "🕘 '{}' is clocked in since {} ({} elapsed, device: {})",
                        session.subject_id,
                        session.clock_in.format("%Y-%m-%d %H:%M"),
                        secs2readable(session.elapsed_seconds()),
                        session.device_info
                    );
                }
                None => {
                    println!("{}'{}' is not clocked in.{}", GREY, subject, RESET);
                }
            }
            Ok(())
        }

        _ => Ok(()),
    }
}
