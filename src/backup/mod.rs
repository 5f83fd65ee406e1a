//! Turns the projects selected for backup into zip archives on disk. Each run gets its own
//! timestamped directory under the backup root and the number of run directories is bounded by
//! a retention limit. Runs can be performed once or repeatedly on a cron schedule.

mod error;
mod manager;
pub mod retention;
mod schedule;

pub use error::{BackupError, DocumentFailure, RunError, ScheduleError, TransferError};
pub use manager::{BackupManager, RunReport};
pub use schedule::Scheduler;
