use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
