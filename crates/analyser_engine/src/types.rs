use std::fmt;
use std::sync::Arc;

use analyser_core::{AlertId, AnalysisResult, RequestId};

/// Everything the multipart body needs.
#[derive(Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub file_name: String,
    pub mime_type: String,
    pub content: Arc<[u8]>,
    pub job_description: String,
}

impl fmt::Debug for AnalysisRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisRequest")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("content_len", &self.content.len())
            .field("job_description_len", &self.job_description.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    AnalysisCompleted {
        request_id: RequestId,
        result: Result<AnalysisResult, SubmitError>,
    },
    AlertExpired {
        alert_id: AlertId,
    },
}

/// A failed submission. `message` is what the user gets to see.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SubmitError {
    pub kind: FailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    InvalidFile,
    HttpStatus(u16),
    Network,
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::InvalidFile => write!(f, "invalid file"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build analysis client: {0}")]
    Client(#[from] SubmitError),
}
