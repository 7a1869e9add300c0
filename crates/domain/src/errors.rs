use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question line: {0}")]
    InvalidQuestion(String),

    #[error("Line exceeds maximum length of {0} bytes")]
    LineTooLong(usize),

    #[error("Line not terminated before end of input")]
    UnterminatedLine,

    #[error("Handshake mismatch: expected {expected:?}, got {received:?}")]
    HandshakeMismatch { expected: String, received: String },

    #[error("Unsupported ABI version: {0}")]
    UnsupportedAbiVersion(String),

    #[error("Key-value store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Key-value store returned an invalid response: {0}")]
    InvalidStoreResponse(String),

    #[error("Malformed value at {key}: {reason}")]
    MalformedValue { key: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
