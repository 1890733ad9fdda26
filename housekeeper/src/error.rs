//! Housekeeper error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HouseError {
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Not authorized: {message}")]
    Unauthorized { message: String },

    #[error("Storage failure during {operation}: {message}")]
    Storage { operation: String, message: String },

    #[error("Configuration error: {field}: {message}")]
    Configuration { field: String, message: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used by callers to map errors onto responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unauthorized,
    Storage,
}

impl HouseError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized { message: message.into() }
    }

    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage { operation: operation.into(), message: message.into() }
    }

    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration { field: field.into(), message: message.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HouseError::Validation { .. } | HouseError::Configuration { .. } => ErrorKind::Validation,
            HouseError::Shared(_) => ErrorKind::Validation,
            HouseError::NotFound { .. } => ErrorKind::NotFound,
            HouseError::Unauthorized { .. } => ErrorKind::Unauthorized,
            HouseError::Storage { .. } | HouseError::Io(_) | HouseError::Json(_) => ErrorKind::Storage,
        }
    }

    /// HTTP-equivalent status for this error
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::Unauthorized => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Storage => 500,
        }
    }
}

pub type HouseResult<T> = Result<T, HouseError>;
