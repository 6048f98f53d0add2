use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// Account role. New registrations always start as `Standard`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Standard,
    Creator,
    Admin,
    Enterprise,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Standard => "standard",
            Role::Creator => "creator",
            Role::Admin => "admin",
            Role::Enterprise => "enterprise",
        }
    }
}

/// Account status. `Deleted` is terminal; there is no resurrection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Suspended,
    Deleted,
}

/// The identity record. `password_hash` only ever holds the salted one-way
/// credential; plaintext never lands here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub status: Status,
    pub email_verified: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// New registration: active, standard role, email unverified.
    pub fn new(email: &str, username: &str, password_hash: String, full_name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            username: username.to_string(),
            password_hash,
            full_name: full_name.to_string(),
            bio: None,
            avatar_url: None,
            role: Role::Standard,
            status: Status::Active,
            email_verified: false,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump `updated_at`. Monotonic: a clock step backwards never lowers it.
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    pub fn record_login(&mut self, at: DateTime<Utc>) {
        self.last_login_at = Some(at);
        self.touch();
    }

    /// Status transitions are one-directional toward `Deleted`.
    pub fn set_status(&mut self, next: Status) -> Result<(), ModelError> {
        if self.status == Status::Deleted && next != Status::Deleted {
            return Err(ModelError::StatusTransition(
                "deleted accounts cannot be restored".into(),
            ));
        }
        self.status = next;
        self.touch();
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

/// Caller-facing view of an account. Deliberately omits `password_hash`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub status: Status,
    pub email_verified: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for PublicProfile {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id,
            email: a.email.clone(),
            username: a.username.clone(),
            full_name: a.full_name.clone(),
            bio: a.bio.clone(),
            avatar_url: a.avatar_url.clone(),
            role: a.role,
            status: a.status,
            email_verified: a.email_verified,
            last_login_at: a.last_login_at,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}
