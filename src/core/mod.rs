pub mod backup;
pub mod event_log;
pub mod leaderboard;
pub mod oplog;
pub mod retention;
pub mod session;
pub mod stats;
pub mod tracker;

pub use tracker::{SharedTracker, Tracker};
