//! Load error taxonomy and the failure value returned by `Loader::load`.

use crate::transport::TransportError;
use std::fmt;

/// Everything that can go wrong between the locator text and the parsed tree.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid locator {locator}: {source}")]
    InvalidLocator {
        locator: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Do not know how to process {0}")]
    UnsupportedScheme(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not found")]
    NotFound,
    #[error("Too Many Requests")]
    RateLimited,
    #[error("Unable to process received status code = {0}")]
    UnexpectedStatus(u32),
    #[error("request failed: {0}")]
    Transport(#[source] TransportError),
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported format: do not know how to process {0}")]
    UnsupportedFormat(String),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed XML: {0}")]
    Xml(String),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("archive: {0}")]
    Archive(#[from] crate::archive::ArchiveError),
}

/// Fieldless view of [`LoadError`] for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidLocator,
    UnsupportedScheme,
    Unauthorized,
    NotFound,
    RateLimited,
    UnexpectedStatus,
    Transport,
    Io,
    UnsupportedFormat,
    Parse,
    Archive,
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::InvalidLocator { .. } => ErrorKind::InvalidLocator,
            LoadError::UnsupportedScheme(_) => ErrorKind::UnsupportedScheme,
            LoadError::Unauthorized => ErrorKind::Unauthorized,
            LoadError::NotFound => ErrorKind::NotFound,
            LoadError::RateLimited => ErrorKind::RateLimited,
            LoadError::UnexpectedStatus(_) => ErrorKind::UnexpectedStatus,
            LoadError::Transport(_) => ErrorKind::Transport,
            LoadError::Io { .. } => ErrorKind::Io,
            LoadError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            LoadError::Json(_) | LoadError::Xml(_) | LoadError::Csv(_) => ErrorKind::Parse,
            LoadError::Archive(_) => ErrorKind::Archive,
        }
    }
}

/// Map a non-200 HTTP status onto its error.
pub fn error_for_status(code: u32) -> LoadError {
    match code {
        401 => LoadError::Unauthorized,
        404 => LoadError::NotFound,
        429 => LoadError::RateLimited,
        _ => LoadError::UnexpectedStatus(code),
    }
}

/// A failed load: the error plus the last payload seen before it happened.
#[derive(Debug)]
pub struct Failure {
    pub error: LoadError,
    /// Payload text fetched before the failure, if any.
    pub raw: Option<String>,
}

impl Failure {
    pub fn new(error: LoadError) -> Self {
        Self { error, raw: None }
    }

    pub fn with_raw(error: LoadError, raw: impl Into<String>) -> Self {
        Self {
            error,
            raw: Some(raw.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

impl From<LoadError> for Failure {
    fn from(error: LoadError) -> Self {
        Failure::new(error)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_401_404_429_have_own_kinds() {
        assert_eq!(error_for_status(401).kind(), ErrorKind::Unauthorized);
        assert_eq!(error_for_status(404).kind(), ErrorKind::NotFound);
        assert_eq!(error_for_status(429).kind(), ErrorKind::RateLimited);
    }

    #[test]
    fn other_statuses_carry_code() {
        assert!(matches!(error_for_status(500), LoadError::UnexpectedStatus(500)));
        assert!(matches!(error_for_status(302), LoadError::UnexpectedStatus(302)));
    }

    #[test]
    fn messages_name_the_http_kind() {
        assert_eq!(LoadError::Unauthorized.to_string(), "Unauthorized");
        assert_eq!(LoadError::NotFound.to_string(), "Not found");
        assert_eq!(LoadError::RateLimited.to_string(), "Too Many Requests");
        assert_eq!(
            error_for_status(503).to_string(),
            "Unable to process received status code = 503"
        );
    }

    #[test]
    fn failure_keeps_raw_payload() {
        let f = Failure::with_raw(LoadError::Xml("bad".into()), "<a>");
        assert_eq!(f.kind(), ErrorKind::Parse);
        assert_eq!(f.raw.as_deref(), Some("<a>"));
        assert_eq!(f.to_string(), "malformed XML: bad");
    }
}
