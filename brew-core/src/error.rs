use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrewError {
    #[error("Recipe is incomplete: no {0} selected")]
    Incomplete(&'static str),

    #[error("Unknown {kind} '{value}'")]
    Parse { kind: &'static str, value: String },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to encode recipes as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BrewError>;
