use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppError {
    /// A required column is missing from the uploaded dataset.
    SchemaError(String),
    /// The uploaded dataset parsed to zero data rows.
    EmptyDataset,
    DuplicateKey(String),
    NotFound(String),
    ValidationError(String),
    ParseError(String),
    StorageError(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::SchemaError(msg) => write!(f, "Schema error: {}", msg),
            AppError::EmptyDataset => write!(f, "Empty file: no data rows"),
            AppError::DuplicateKey(msg) => write!(f, "Duplicate key: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
