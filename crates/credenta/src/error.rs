//! Error types for Credenta.
//!
//! All errors are strongly typed and propagated without panicking.
//! "Nothing to issue" outcomes (no active definition, criteria not met,
//! credential already held) are not errors and never appear here.

/// Credential error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Verification code already registered: {0}")]
    DuplicateCode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, CredentialError>;
