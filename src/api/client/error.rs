#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("provided URL wasn't valid: {0}")]
    BadUrl(#[from] url::ParseError),

    #[error("base URL {0} can't have paths appended to it")]
    CannotBeABase(String),

    #[error("cookie {0} contains characters that can't be sent in a header")]
    InvalidCookie(String),

    #[error("underlying HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("unsupported URL scheme {0}, only http and https are allowed")]
    UnsupportedScheme(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unable to build request URL from the configured base")]
    InvalidUrl,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote returned unexpected status code {status_code}")]
    UnexpectedStatus { status_code: u16 },
}

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status_code } => Some(*status_code),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::InvalidUrl => None,
        }
    }
}
