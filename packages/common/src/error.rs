use thiserror::Error;

/// Errors shared by the schema layer
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Unknown sample page: {0}")]
    UnknownSample(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
