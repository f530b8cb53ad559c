use thiserror::Error;

/// Request header carrying the API key.
pub const AUTH_HEADER: &str = "Auth";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Auth header")]
    MissingKey,
    #[error("Invalid API key")]
    InvalidKey,
    #[error("Configured API key hash is not a hex SHA-256 digest")]
    InvalidConfiguredHash,
}

pub type AuthResult<T> = Result<T, AuthError>;
