// Failures a probe can hit before collapsing to its default value

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("process spawn failed: {0}")]
    ProcessSpawn(String),

    #[error("timed out after {0} ms")]
    ProcessTimeout(u64),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("parse failed: {0}")]
    Parse(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
}

impl From<serde_json::Error> for ProbeError {
    fn from(e: serde_json::Error) -> Self {
        ProbeError::Parse(e.to_string())
    }
}

impl From<bollard::errors::Error> for ProbeError {
    fn from(e: bollard::errors::Error) -> Self {
        match e {
            bollard::errors::Error::DockerResponseServerError {
                status_code: 404,
                message,
            } => ProbeError::NotFound(message),
            other => ProbeError::ProcessSpawn(other.to_string()),
        }
    }
}
