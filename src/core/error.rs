use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchellingError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown label in layout: {0}")]
    UnknownLabel(String),

    #[error("Layout has {actual} cells, grid needs {expected}")]
    LayoutMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SchellingError>;
