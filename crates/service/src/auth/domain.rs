use models::PublicProfile;
use serde::{Deserialize, Serialize};

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: String,
}

/// Login input. `identifier` is either an email or a username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub identifier: String,
    pub password: String,
}

/// Successful register/login result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResult {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds.
    pub expires_in: i64,
    pub profile: PublicProfile,
}
