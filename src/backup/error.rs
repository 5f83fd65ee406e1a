use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use crate::api::ApiError;

/// Everything that can go wrong moving one project from the platform onto disk.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("download failed: {0}")]
    Download(#[from] ApiError),

    #[error("unable to create run directory {path:?}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to create archive {path:?}: {source}")]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("archive stream broke off: {0}")]
    Stream(#[source] reqwest::Error),

    #[error("unable to write archive {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("project {project_name} ({project_id}): {source}")]
pub struct DocumentFailure {
    pub project_id: String,
    pub project_name: String,
    pub source: TransferError,
}

/// A run where at least one project didn't make it to disk. Every failure is kept, the projects
/// that did succeed are left where they were written.
#[derive(Debug)]
pub struct RunError {
    pub run: String,
    pub attempted: usize,
    pub failures: Vec<DocumentFailure>,
}

impl Display for RunError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "backup run {} failed for {} of {} projects",
            self.run,
            self.failures.len(),
            self.attempted
        )?;

        for (idx, failure) in self.failures.iter().enumerate() {
            let sep = if idx == 0 { ": " } else { "; " };
            write!(f, "{sep}{failure}")?;
        }

        Ok(())
    }
}

impl std::error::Error for RunError {}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("invalid cron expression {expression:?}: {source}")]
    InvalidExpression {
        expression: String,
        source: cron::error::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error(transparent)]
    Run(#[from] RunError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_error_lists_every_failure() {
        let err = RunError {
            run: "2025-09-25_21-37-00".into(),
            attempted: 3,
            failures: vec![
                DocumentFailure {
                    project_id: "p1".into(),
                    project_name: "Thesis".into(),
                    source: TransferError::Download(ApiError::UnexpectedStatus {
                        status_code: 500,
                    }),
                },
                DocumentFailure {
                    project_id: "p3".into(),
                    project_name: "Notes".into(),
                    source: TransferError::Download(ApiError::UnexpectedStatus {
                        status_code: 404,
                    }),
                },
            ],
        };

        let msg = err.to_string();
        assert!(msg.starts_with("backup run 2025-09-25_21-37-00 failed for 2 of 3 projects: "));
        assert!(msg.contains("project Thesis (p1): download failed"));
        assert!(msg.contains("status code 500"));
        assert!(msg.contains("; project Notes (p3)"));
    }
}
