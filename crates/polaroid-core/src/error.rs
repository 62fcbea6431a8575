use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolaroidError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid photo records: {0}")]
    InvalidRecords(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid layout bounds: element {element_width}x{element_height} in container {container_width}x{container_height}")]
    InvalidBounds {
        container_width: f64,
        container_height: f64,
        element_width: f64,
        element_height: f64,
    },

    #[error("Duplicate photo id: {0}")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, PolaroidError>;
