use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account, keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: String,
        first_name: String,
        last_name: String,
        password_hash: String,
    ) -> Self {
        Self {
            email,
            first_name,
            last_name,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Registration input. The password is plain text until the service hashes it.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The authenticated principal attached to a request. No roles: a request is
/// either authenticated as `email` or anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub issued_at: i64,
    pub expires_at: i64,
}
