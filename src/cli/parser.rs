use crate::core::leaderboard::Metric;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for punchlog
/// Employee time-clock and activity tracking with SQLite
#[derive(Parser)]
#[command(
    name = "punchlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track clock-in/out sessions, log activity events and read running statistics",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (integrity checks, maintenance, oplog)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(long = "log", help = "Print rows from the internal oplog table")]
        log: bool,
    },

    /// Clock in: open a session for a subject
    In {
        /// Subject (employee) identifier
        subject: String,

        #[arg(long = "device", help = "Device info recorded on the session")]
        device: Option<String>,
    },

    /// Clock out: close the subject's open session
    Out {
        /// Subject (employee) identifier
        subject: String,

        #[arg(long = "session", help = "Close this session id instead of the open one")]
        session: Option<String>,
    },

    /// Show the open session for a subject, if any
    Status {
        /// Subject (employee) identifier
        subject: String,
    },

    /// Append a task activity event to the log
    Log {
        /// Action: created, completed, deleted, acknowledged, modified
        action: String,

        /// Subject (employee) identifier
        subject: String,

        #[arg(long = "task-id", help = "Task identifier")]
        task_id: Option<i64>,

        #[arg(long = "task-name", help = "Task name")]
        task_name: Option<String>,

        #[arg(long = "category", help = "Work area / category")]
        category: Option<String>,

        #[arg(long = "status", help = "Task status (defaults to the action name)")]
        status: Option<String>,

        #[arg(long = "idle", help = "Idle seconds attributed to this event")]
        idle: Option<i64>,

        #[arg(long = "ack-by", help = "Acknowledging user (acknowledged events)")]
        ack_by: Option<String>,
    },

    /// List events from the log
    List {
        #[arg(long, help = "Filter by action")]
        action: Option<String>,

        #[arg(long, help = "Filter by subject")]
        subject: Option<String>,

        #[arg(long, help = "Filter by category")]
        category: Option<String>,

        #[arg(long, help = "Start date (YYYY-MM-DD, inclusive)")]
        from: Option<String>,

        #[arg(long, help = "End date (YYYY-MM-DD, inclusive)")]
        to: Option<String>,
    },

    /// Show global or per-subject statistics
    Stats {
        #[arg(long, help = "Show statistics for one subject")]
        subject: Option<String>,
    },

    /// Rank subjects by a metric
    Board {
        #[arg(long, value_enum, default_value = "completion-rate")]
        metric: Metric,
    },

    /// Export event or session data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 's', help = "Export the session table instead of events")]
        sessions: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Discard raw events older than the retention horizon
    Compact {
        #[arg(long, help = "Days of raw history to keep (default from config)")]
        days: Option<i64>,

        #[arg(long = "yes", short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}
