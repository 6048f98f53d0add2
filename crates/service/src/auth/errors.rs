use thiserror::Error;

/// Business errors for auth workflows.
///
/// `InvalidCredentials` covers both an unknown identifier and a wrong
/// password, with a single message. Callers must not be able to tell which
/// identifiers exist from the error alone.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("email already registered")]
    EmailTaken,
    #[error("username already taken")]
    UsernameTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account is not active")]
    AccountNotActive,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("user store unavailable: {0}")]
    StoreUnavailable(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::EmailTaken => 1002,
            AuthError::UsernameTaken => 1003,
            AuthError::InvalidCredentials => 1004,
            AuthError::AccountNotActive => 1005,
            AuthError::InvalidToken(_) => 1101,
            AuthError::Hash(_) => 1102,
            AuthError::StoreUnavailable(_) => 1200,
        }
    }
}
