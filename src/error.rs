use std::fmt::{self, Display, Formatter};

use crate::api::ApiClientError;
use crate::backup::BackupError;
use crate::config::ConfigError;

/// Process-boundary error. The library layers carry typed errors; by the time a failure reaches
/// `main` only its message matters.
#[derive(Debug)]
pub struct ArchiverError(String);

impl From<&'static str> for ArchiverError {
    fn from(val: &'static str) -> Self {
        Self(val.to_string())
    }
}

impl From<String> for ArchiverError {
    fn from(val: String) -> Self {
        Self(val)
    }
}

impl Display for ArchiverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ArchiverError {}

impl From<ApiClientError> for ArchiverError {
    fn from(error: ApiClientError) -> Self {
        Self(error.to_string())
    }
}

impl From<BackupError> for ArchiverError {
    fn from(error: BackupError) -> Self {
        Self(error.to_string())
    }
}

impl From<ConfigError> for ArchiverError {
    fn from(error: ConfigError) -> Self {
        Self(error.to_string())
    }
}

pub type ArchiverResult<T> = Result<T, ArchiverError>;
