use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

pub type RequestId = u64;

/// Message used when the service gives no usable error text.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Queued,
    Uploading,
    Decoding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content: Arc<[u8]>,
}

/// Everything sent in one `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub files: Vec<UploadFile>,
    pub summary_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub files: Vec<FileResult>,
}

/// Per-file entry of an analyze response. `error` set means the file failed
/// and the remaining fields are not meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileResult {
    pub name: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub text_preview: Option<String>,
    #[serde(default)]
    pub summary_type: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub suggestions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageProgress {
    pub request_id: RequestId,
    pub stage: Stage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(StageProgress),
    AnalysisCompleted {
        request_id: RequestId,
        result: Result<AnalysisResponse, AnalyzeError>,
    },
    HealthChecked(Result<HealthStatus, AnalyzeError>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct AnalyzeError {
    pub kind: FailureKind,
    pub message: String,
}

impl AnalyzeError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text to show the user for this failure.
    pub fn user_message(&self) -> &str {
        if self.message.is_empty() {
            DEFAULT_ERROR_MESSAGE
        } else {
            &self.message
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    /// The service answered with `ok: false`.
    Rejected,
    Decode,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Rejected => write!(f, "rejected by service"),
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
