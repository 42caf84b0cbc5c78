use thiserror::Error;

/// Error type for session token operations.
///
/// The variants are distinct for logging and tests only. Callers facing a
/// client collapse all of them into a single "invalid token" response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}
