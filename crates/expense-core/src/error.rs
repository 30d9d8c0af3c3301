use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Row not found at position {0}")]
    RowNotFound(usize),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
