use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Tracker;
use crate::errors::{AppError, AppResult};
use crate::models::action::Action;
use crate::models::event::EventFilter;
use crate::ui::messages::warning;
use crate::utils::colors::RESET;
use crate::utils::date::parse_date;
use crate::utils::formatting::describe_action;
use crate::utils::table::{Column, Table};

/// Handle the `list` command: filtered event listing in append order.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        action,
        subject,
        category,
        from,
        to,
    } = cmd
    {
        let mut filter = EventFilter::default();

        if let Some(a) = action {
            filter.action =
                Some(Action::from_code(a).ok_or_else(|| AppError::InvalidAction(a.clone()))?);
        }
        filter.subject_id = subject.clone();
        filter.category = category.clone();

        if let Some(d) = from {
            filter.start_date = Some(parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?);
        }
        if let Some(d) = to {
            filter.end_date = Some(parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?);
        }

        let mut tracker = Tracker::open(cfg)?;
        let events = tracker.query(&filter)?;

        if events.is_empty() {
            warning("No events found.");
            return Ok(());
        }

        println!("📒 Activity log:\n");

        let mut table = Table::new(vec![
            Column::new("Id", 6),
            Column::new("Date", 10),
            Column::new("Action", 22),
            Column::new("Subject", 12),
            Column::new("Task", 20),
            Column::new("Category", 12),
            Column::new("Status", 10),
        ]);

        for ev in &events {
            let (label, color) = describe_action(ev.action);
            table.add_row(vec![
                ev.id.to_string(),
                ev.date_str(),
                format!("{}{}{}", color, label, RESET),
                ev.subject_id.clone(),
                ev.task_name.clone(),
                ev.category.clone(),
                ev.status.clone(),
            ]);
        }

        print!("{}", table.render());
        println!("{} events.", events.len());
    }

    Ok(())
}
