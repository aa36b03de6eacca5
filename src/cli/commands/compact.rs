use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Tracker;
use crate::core::retention::RetentionPolicy;
use crate::db::oplog;
use crate::errors::AppResult;
use crate::ui::messages::success;
use std::io::{Write, stdin, stdout};

/// Handle the `compact` command: discard raw events past the horizon.
/// Running totals already folded into the aggregator are unaffected.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Compact { days, yes } = cmd {
        let days_to_keep = days.unwrap_or(cfg.retention_days);
        let policy = RetentionPolicy::new(days_to_keep);

        if !*yes {
            print!(
                "⚠️  Delete raw events older than {} days? [y/N]: ",
                days_to_keep
            );
            stdout().flush().ok();

            let mut answer = String::new();
            stdin().read_line(&mut answer)?;

            let answer = answer.trim().to_lowercase();
            if !(answer == "y" || answer == "yes") {
                println!("❌ Compaction cancelled by user.");
                return Ok(());
            }
        }

        let mut tracker = Tracker::open(cfg)?;
        let removed = tracker.compact(policy)?;

        if let Err(e) = oplog::write_op(
            &tracker.pool().conn,
            "compact",
            &format!("{days_to_keep}d"),
            &format!("Removed {removed} events past the retention horizon"),
        ) {
            eprintln!("⚠️ Failed to write internal oplog: {}", e);
        }

        success(format!(
            "Removed {} events older than {} days.",
            removed, days_to_keep
        ));
    }

    Ok(())
}
