use std::path::{Path, PathBuf};

use chrono::Local;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::api::platform::{projects, ApiProject};
use crate::api::{ApiClient, HttpSender};
use crate::backup::{retention, BackupError, DocumentFailure, RunError, Scheduler, TransferError};
use crate::config::{BackupSettings, ProjectSelection};
use crate::utils::{archive_file_name, run_timestamp};

/// Outcome of a run in which every selected project was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run: String,

    /// Where this run's archives live. Only created once there is something to write into it.
    pub directory: PathBuf,

    pub archives: Vec<PathBuf>,

    /// Old run directories removed by retention after this run.
    pub pruned: Vec<PathBuf>,
}

pub struct BackupManager<S: HttpSender> {
    client: ApiClient<S>,
    settings: BackupSettings,
}

impl<S: HttpSender> BackupManager<S> {
    pub fn new(client: ApiClient<S>, settings: BackupSettings) -> Self {
        Self { client, settings }
    }

    /// Downloads a single project into the run directory. Nothing is left behind when this
    /// fails: a partially written archive is removed before the error is returned.
    pub async fn backup_project(
        &self,
        run_dir: &Path,
        project: &ApiProject,
    ) -> Result<PathBuf, TransferError> {
        let archive = projects::download(&self.client, project).await?;
        tracing::debug!(
            project = %project.name,
            size = ?archive.content_length(),
            "archive download started"
        );

        tokio::fs::create_dir_all(run_dir)
            .await
            .map_err(|err| TransferError::CreateDirectory {
                path: run_dir.to_path_buf(),
                source: err,
            })?;

        let archive_path = run_dir.join(archive_file_name(&project.name));
        if tokio::fs::try_exists(&archive_path).await.unwrap_or(false) {
            tracing::warn!(
                project = %project.name,
                path = ?archive_path,
                "archive already exists in this run, overwriting it"
            );
        }

        tracing::info!(project = %project.name, path = ?archive_path, "writing project archive");

        let mut file = tokio::fs::File::create(&archive_path)
            .await
            .map_err(|err| TransferError::CreateFile {
                path: archive_path.clone(),
                source: err,
            })?;

        if let Err(err) = copy_stream(archive.into_stream(), &mut file, &archive_path).await {
            drop(file);

            match tokio::fs::remove_file(&archive_path).await {
                Ok(()) => {
                    tracing::warn!(path = ?archive_path, "removed partially written archive")
                }
                Err(rm_err) => tracing::error!(
                    path = ?archive_path,
                    "failed to remove partially written archive: {rm_err}"
                ),
            }

            return Err(err);
        }

        Ok(archive_path)
    }

    /// Discovers the session's projects, keeps the selected ones and backs them up.
    pub async fn cycle(&self, selection: &ProjectSelection) -> Result<RunReport, RunError> {
        tracing::info!(base_url = %self.client.base_url(), "looking for projects");

        let discovered = projects::discover(&self.client).await;
        let targets = selection.select(discovered);
        tracing::info!(selected = targets.len(), "projects selected for backup");

        self.run_once(&targets).await
    }

    /// Backs up the selection once, or on every firing of the configured schedule. A blank
    /// schedule returns the single run's report. With a schedule this never returns unless
    /// the expression runs out of firings.
    pub async fn run(
        &self,
        selection: &ProjectSelection,
    ) -> Result<Option<RunReport>, BackupError> {
        self.run_bounded(selection, None).await
    }

    /// [`BackupManager::run`] with an upper bound on the number of scheduled firings. The bound
    /// has no effect without a schedule. Errors from individual firings are logged and never
    /// stop later firings.
    pub async fn run_bounded(
        &self,
        selection: &ProjectSelection,
        max_firings: Option<usize>,
    ) -> Result<Option<RunReport>, BackupError> {
        let scheduler = match Scheduler::from_expression(&self.settings.schedule)? {
            Some(scheduler) => scheduler,
            None => {
                tracing::info!("no schedule configured, performing a single backup");
                let report = self.cycle(selection).await?;
                return Ok(Some(report));
            }
        };

        let manager = self;
        scheduler
            .run(max_firings, move || async move {
                if let Err(err) = manager.cycle(selection).await {
                    tracing::error!("scheduled backup failed: {err}");
                }
            })
            .await;

        Ok(None)
    }

    /// Downloads every project into a fresh timestamped directory, one at a time and in order.
    /// A failing project never stops the others. Retention only runs when all of them made it;
    /// otherwise every failure is returned together and old backups are left alone.
    pub async fn run_once(&self, projects: &[ApiProject]) -> Result<RunReport, RunError> {
        let run = run_timestamp(Local::now());
        let directory = self.settings.path.join(&run);
        tracing::info!(%run, count = projects.len(), "starting backup run");

        let mut archives = Vec::with_capacity(projects.len());
        let mut failures = Vec::new();

        for project in projects {
            match self.backup_project(&directory, project).await {
                Ok(path) => archives.push(path),
                Err(err) => {
                    tracing::error!(
                        project = %project.name,
                        id = %project.id,
                        "backup failed: {err}"
                    );

                    failures.push(DocumentFailure {
                        project_id: project.id.clone(),
                        project_name: project.name.clone(),
                        source: err,
                    });
                }
            }
        }

        if !failures.is_empty() {
            tracing::warn!(%run, failed = failures.len(), "skipping cleanup after failed run");

            return Err(RunError {
                run,
                attempted: projects.len(),
                failures,
            });
        }

        let pruned = retention::prune(&self.settings.path, self.settings.keep_last);
        tracing::info!(
            %run,
            written = archives.len(),
            pruned = pruned.len(),
            "backup run complete"
        );

        Ok(RunReport {
            run,
            directory,
            archives,
            pruned,
        })
    }
}

async fn copy_stream<St>(
    mut stream: St,
    file: &mut tokio::fs::File,
    path: &Path,
) -> Result<u64, TransferError>
where
    St: futures::Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Unpin,
{
    let write_err = |err| TransferError::Write {
        path: path.to_path_buf(),
        source: err,
    };

    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(TransferError::Stream)?;
        file.write_all(&chunk).await.map_err(write_err)?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(write_err)?;
    tracing::debug!(path = ?path, bytes = written, "archive written");

    Ok(written)
}
