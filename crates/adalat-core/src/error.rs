//! Error types for the courtroom simulation core.

use thiserror::Error;

/// Result type alias for simulation operations.
pub type SimResult<T> = Result<T, SimulationError>;

/// Errors that can occur while running a proceeding.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("generation oracle failure: {0}")]
    Oracle(#[from] OracleError),

    #[error("case file error: {0}")]
    CaseFile(String),

    #[error("artifact write failed: {0}")]
    Artifact(String),

    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the external text-completion oracle.
///
/// The core never retries these; a failed call halts the run and the
/// accumulated state is persisted for inspection.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("no API key configured (set OPENROUTER_API_KEY)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Request(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}
