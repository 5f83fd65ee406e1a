//! YAML configuration for the archiver. The file describes where the platform lives, the session
//! cookies to present to it, which projects to keep copies of, and how the copies are kept.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::platform::ApiProject;
use crate::api::{ClientSettings, SessionCookie};

pub const DEFAULT_BASE_URL: &str = "https://www.overleaf.com";

pub const DEFAULT_BACKUP_PATH: &str = "./Backup";

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub overleaf: OverleafConfig,

    #[serde(default)]
    pub projects: ProjectSelection,

    #[serde(default)]
    pub backup: BackupSettings,
}

impl Config {
    pub fn base_url(&self) -> Result<url::Url, ConfigError> {
        url::Url::parse(&self.overleaf.base_url).map_err(|err| ConfigError::BadUrl {
            url: self.overleaf.base_url.clone(),
            source: err,
        })
    }

    pub fn client_settings(&self) -> Result<ClientSettings, ConfigError> {
        Ok(ClientSettings {
            base_url: self.base_url()?,
            cookies: self.session_cookies(),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;

        let config = Self::from_reader(file)?;
        tracing::debug!(path = ?path, "loaded configuration");

        Ok(config)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self, ConfigError> {
        let mut raw = String::new();
        reader
            .read_to_string(&mut raw)
            .map_err(|err| ConfigError::Io {
                path: PathBuf::from("<reader>"),
                source: err,
            })?;

        let config = serde_yaml::from_str(&raw)?;
        Ok(config)
    }

    pub fn session_cookies(&self) -> Vec<SessionCookie> {
        self.overleaf.cookies.clone()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverleafConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub cookies: Vec<SessionCookie>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// How backups are stored and how often they're taken.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BackupSettings {
    #[serde(default = "default_backup_path")]
    pub path: PathBuf,

    /// Number of run directories to keep around, zero or less keeps everything.
    #[serde(default)]
    pub keep_last: i64,

    /// Six field cron expression (seconds first). Blank means back up once and exit.
    #[serde(default)]
    pub schedule: String,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            path: default_backup_path(),
            keep_last: 0,
            schedule: String::new(),
        }
    }
}

fn default_backup_path() -> PathBuf {
    PathBuf::from(DEFAULT_BACKUP_PATH)
}

/// Allow-list of project names. Names must match exactly, an empty list selects everything.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ProjectSelection(Vec<String>);

impl ProjectSelection {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn all() -> Self {
        Self(Vec::new())
    }

    pub fn matches(&self, project: &ApiProject) -> bool {
        self.0.is_empty() || self.0.iter().any(|name| name == &project.name)
    }

    /// Keeps the selected projects in the order they were discovered.
    pub fn select(&self, projects: Vec<ApiProject>) -> Vec<ApiProject> {
        projects.into_iter().filter(|p| self.matches(p)).collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("base URL {url} is invalid: {source}")]
    BadUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("unable to read configuration from {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("configuration isn't valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
