//! Error types for the competitive-programming tracker

use std::fmt;

use thiserror::Error;


pub type Result<T> = std::result::Result<T, TrackerError>;

/// Failure taxonomy exposed to callers, independent of which variant carried it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Timeout,
    RateLimited,
    Unavailable,
    ParseFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Timeout => "timeout",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Unavailable => "unavailable",
            ErrorKind::ParseFailure => "parse_failure",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Username is required")]
    InvalidUsername,

    #[error("Invalid value for {var}: {value}")]
    InvalidConfig { var: String, value: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    ParseFailure(String),
}

impl TrackerError {
    /// Map any variant onto the public taxonomy.
    ///
    /// Raw transport variants are mapped conservatively: only an explicit 404 is
    /// `NotFound` and only a client-side timeout is `Timeout`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackerError::NotFound(_) => ErrorKind::NotFound,
            TrackerError::Timeout(_) => ErrorKind::Timeout,
            TrackerError::RateLimited(_) => ErrorKind::RateLimited,
            TrackerError::ParseFailure(_) | TrackerError::Json(_) => ErrorKind::ParseFailure,
            TrackerError::Http(e) if e.is_timeout() => ErrorKind::Timeout,
            TrackerError::Status { status: 404, .. } => ErrorKind::NotFound,
            TrackerError::Status {
                status: 403 | 429, ..
            } => ErrorKind::RateLimited,
            _ => ErrorKind::Unavailable,
        }
    }

    /// HTTP status carried by a raw fetch error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            TrackerError::Status { status, .. } => Some(*status),
            TrackerError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
