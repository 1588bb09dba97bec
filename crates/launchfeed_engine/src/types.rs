use std::fmt;

use serde::Deserialize;

/// Correlates a page fetch command with its completion event.
pub type RequestId = u64;

/// One launch as returned by the launches API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LaunchRecord {
    pub flight_number: u32,
    pub mission_name: String,
    pub upcoming: bool,
    pub launch_success: Option<bool>,
    pub launch_date_unix: Option<i64>,
    pub details: Option<String>,
    pub links: Option<LaunchLinks>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LaunchLinks {
    pub article_link: Option<String>,
    pub video_link: Option<String>,
    pub mission_patch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        request_id: RequestId,
        result: Result<Vec<LaunchRecord>, FetchError>,
    },
    LaunchFetched {
        flight_number: u32,
        result: Result<LaunchRecord, FetchError>,
    },
    DebounceElapsed {
        generation: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Malformed,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Malformed => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
