use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Tracker;
use crate::errors::{AppError, AppResult};
use crate::models::action::Action;
use crate::models::event::EventDraft;
use crate::ui::messages::success;
use chrono::Local;

/// Handle the `log` command: append one task activity event.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log {
        action,
        subject,
        task_id,
        task_name,
        category,
        status,
        idle,
        ack_by,
    } = cmd
    {
        let action = Action::from_code(action)
            .filter(|a| !a.is_clock())
            .ok_or_else(|| AppError::InvalidAction(action.clone()))?;

        let mut draft = EventDraft::new(action, subject);
        draft.task_id = *task_id;
        draft.task_name = task_name.clone().unwrap_or_default();
        draft.category = category.clone().unwrap_or_default();
        draft.status = status
            .clone()
            .unwrap_or_else(|| action.to_db_str().to_string());
        draft.idle_seconds = idle.unwrap_or(0);

        if action == Action::Acknowledged || ack_by.is_some() {
            draft.acknowledged = true;
            draft.acknowledged_by = ack_by.clone();
            draft.acknowledged_at = Some(Local::now().to_rfc3339());
        }

        let mut tracker = Tracker::open(cfg)?;
        let event = tracker.record(draft)?;

        success(format!(
            "Logged {} for '{}' (event #{}).",
            event.action.to_db_str(),
            event.subject_id,
            event.id
        ));
    }

    Ok(())
}
