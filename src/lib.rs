pub mod api;
pub mod backup;
pub mod config;
pub mod error;
pub mod utils;
pub mod version;

pub mod prelude {
    pub use crate::api::platform::{projects, ApiProject, ApiUser, ProjectsBlob};
    pub use crate::api::*;
    pub use crate::backup::{BackupError, BackupManager, RunError, RunReport, Scheduler};
    pub use crate::config::{BackupSettings, Config, ProjectSelection};
    pub use crate::error::*;
    pub use crate::version::*;
}
