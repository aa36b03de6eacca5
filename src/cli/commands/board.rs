use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Tracker;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::table::{Column, Table};

/// Handle the `board` command: leaderboard over the chosen metric.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Board { metric } = cmd {
        let tracker = Tracker::open(cfg)?;
        let rows = tracker.leaderboard(*metric);

        if rows.is_empty() {
            warning("No subjects with recorded events yet.");
            return Ok(());
        }

        println!("🏆 Leaderboard by {}:\n", metric.as_str());

        let mut table = Table::new(vec![
            Column::new("#", 3),
            Column::new("Subject", 20),
            Column::new(metric.as_str(), 20),
            Column::new("Completed", 10),
            Column::new("Assigned", 10),
        ]);

        for (i, row) in rows.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                row.subject_name.clone(),
                row.metric_value.to_string(),
                row.total_completed.to_string(),
                row.total_assigned.to_string(),
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
