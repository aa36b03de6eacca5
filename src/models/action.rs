use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Created,
    Completed,
    Deleted,
    Acknowledged,
    Modified,
    ClockIn,
    ClockOut,
}

impl Action {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Action::Created => "created",
            Action::Completed => "completed",
            Action::Deleted => "deleted",
            Action::Acknowledged => "acknowledged",
            Action::Modified => "modified",
            Action::ClockIn => "clock_in",
            Action::ClockOut => "clock_out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "created" => Some(Action::Created),
            "completed" => Some(Action::Completed),
            "deleted" => Some(Action::Deleted),
            "acknowledged" => Some(Action::Acknowledged),
            "modified" => Some(Action::Modified),
            "clock_in" => Some(Action::ClockIn),
            "clock_out" => Some(Action::ClockOut),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        Action::from_db_str(&code.to_lowercase())
    }

    pub fn is_clock(&self) -> bool {
        matches!(self, Action::ClockIn | Action::ClockOut)
    }
}
