use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Tracker;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::colors::{CYAN, GREEN, RESET, color_for_rate};
use crate::utils::table::{Column, Table};

/// Handle the `stats` command: global aggregates or one subject's stats.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { subject } = cmd {
        let tracker = Tracker::open(cfg)?;

        match subject {
            Some(id) => print_subject(&tracker, id),
            None => print_global(&tracker),
        }
    }

    Ok(())
}

fn print_global(tracker: &Tracker) {
    let stats = tracker.stats();

    println!();
    println!("📊 Global statistics:\n");
    println!(
        "{}• Created:{}      {}{}{}",
        CYAN, RESET, GREEN, stats.total_created, RESET
    );
    println!(
        "{}• Completed:{}    {}{}{}",
        CYAN, RESET, GREEN, stats.total_completed, RESET
    );
    println!(
        "{}• Deleted:{}      {}{}{}",
        CYAN, RESET, GREEN, stats.total_deleted, RESET
    );
    println!(
        "{}• Acknowledged:{} {}{}{}",
        CYAN, RESET, GREEN, stats.total_acknowledged, RESET
    );

    if !stats.by_category.is_empty() {
        println!("\n{}• By category:{}", CYAN, RESET);

        let mut table = Table::new(vec![
            Column::new("Category", 16),
            Column::new("Created", 8),
            Column::new("Completed", 10),
            Column::new("Deleted", 8),
        ]);

        let mut categories: Vec<_> = stats.by_category.iter().collect();
        categories.sort_by(|a, b| a.0.cmp(b.0));

        for (category, counts) in categories {
            let name = if category.is_empty() { "-" } else { category };
            table.add_row(vec![
                name.to_string(),
                counts.created.to_string(),
                counts.completed.to_string(),
                counts.deleted.to_string(),
            ]);
        }

        print!("{}", table.render());
    }

    println!();
}

fn print_subject(tracker: &Tracker, subject_id: &str) {
    let Some(stats) = tracker.subject_stats(subject_id) else {
        warning(format!("No events recorded for '{}'.", subject_id));
        return;
    };

    let completion = stats.completion_rate();
    let acknowledgment = stats.acknowledgment_rate();

    println!();
    println!("📊 Statistics for '{}':\n", subject_id);
    println!("{}• Assigned:{}      {}", CYAN, RESET, stats.total_assigned);
    println!("{}• Completed:{}     {}", CYAN, RESET, stats.total_completed);
    println!("{}• Deleted:{}       {}", CYAN, RESET, stats.total_deleted);
    println!(
        "{}• Acknowledged:{}  {}",
        CYAN, RESET, stats.total_acknowledged
    );
    println!(
        "{}• Completion:{}    {}{}%{}",
        CYAN,
        RESET,
        color_for_rate(completion),
        completion,
        RESET
    );
    println!(
        "{}• Ack rate:{}      {}{}%{}",
        CYAN,
        RESET,
        color_for_rate(acknowledgment),
        acknowledgment,
        RESET
    );

    if !stats.recent_history.is_empty() {
        println!("\n{}• Recent activity:{}", CYAN, RESET);
        for entry in stats.recent_history.iter().rev() {
            println!(
                "    #{:<6} {:<14} {}",
                entry.event_id,
                entry.action.to_db_str(),
                entry.task_name
            );
        }
    }

    println!();
}
