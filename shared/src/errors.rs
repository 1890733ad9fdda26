//! Shared error types for the housekeeping system

use thiserror::Error;

/// Failure to parse an identifier or a closed enum from text
#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid UUID: {input}")]
    InvalidUuid { input: String },

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: String, value: String },
}
