//! Analyser engine: HTTP submission and effect execution.
mod engine;
mod submit;
mod types;

pub use engine::EngineHandle;
pub use submit::{AnalysisClient, ReqwestAnalysisClient, SubmitSettings, SERVER_FAILURE};
pub use types::{AnalysisRequest, EngineError, EngineEvent, FailureKind, SubmitError};
