use std::fmt;
use std::sync::Arc;

use crate::{
    error::{AuthError, StoreError},
    model::{Credentials, NewUser, User},
    password::{hash_password, verify_password},
    store::UserStore,
};

/// Why an expected business operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    EmailTaken,
    InvalidCredentials,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::EmailTaken => f.write_str("Email is taken"),
            FailureReason::InvalidCredentials => f.write_str("Invalid credentials, try again"),
        }
    }
}

/// Outcome of an [`AuthService`] operation.
///
/// Business refusals are `Failure`; only infrastructure faults (storage,
/// hashing) are `Error`.
#[derive(Debug)]
pub enum AuthOutcome<T> {
    Success(T),
    Failure(FailureReason),
    Error(AuthError),
}

impl<T> AuthOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success(_))
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            AuthOutcome::Failure(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Registration and login on top of a [`UserStore`].
pub struct AuthService {
    store: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// The lookup is a fast path only; the store's own uniqueness check decides
    /// concurrent registrations for the same email.
    pub async fn register(&self, candidate: NewUser) -> AuthOutcome<User> {
        tracing::info!(email = %candidate.email, "Processing registration request");

        match self.store.find_by_email(&candidate.email).await {
            Ok(Some(_)) => {
                tracing::warn!(
                    email = %candidate.email,
                    "Registration refused: email already exists"
                );
                return AuthOutcome::Failure(FailureReason::EmailTaken);
            }
            Ok(None) => {}
            Err(e) => return storage_error("registration", &candidate.email, e),
        }

        let password_hash = match hash_password(&candidate.password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::error!(email = %candidate.email, error = %e, "Password hashing failed");
                return AuthOutcome::Error(e);
            }
        };

        let email = candidate.email.clone();
        let user = User::new(
            candidate.email,
            candidate.first_name,
            candidate.last_name,
            password_hash,
        );

        match self.store.insert(user).await {
            Ok(user) => {
                tracing::info!(email = %user.email, "User registered");
                AuthOutcome::Success(user)
            }
            Err(StoreError::Conflict(email)) => {
                tracing::warn!(email = %email, "Registration lost a race for the same email");
                AuthOutcome::Failure(FailureReason::EmailTaken)
            }
            Err(e) => storage_error("registration", &email, e),
        }
    }

    /// Check credentials and return the stored record on a match.
    pub async fn login(&self, attempt: Credentials) -> AuthOutcome<User> {
        tracing::info!(email = %attempt.email, "Processing login request");

        let user = match self.store.find_by_email(&attempt.email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!(email = %attempt.email, "Login refused: unknown email");
                return AuthOutcome::Failure(FailureReason::InvalidCredentials);
            }
            Err(e) => return storage_error("login", &attempt.email, e),
        };

        match verify_password(&attempt.password, &user.password_hash) {
            Ok(true) => {
                tracing::info!(email = %user.email, "User logged in");
                AuthOutcome::Success(user)
            }
            Ok(false) => {
                tracing::warn!(email = %attempt.email, "Login refused: wrong password");
                AuthOutcome::Failure(FailureReason::InvalidCredentials)
            }
            Err(e) => {
                tracing::error!(
                    email = %attempt.email,
                    error = %e,
                    "Stored password hash is unreadable"
                );
                AuthOutcome::Error(e)
            }
        }
    }
}

fn storage_error<T>(operation: &str, email: &str, e: StoreError) -> AuthOutcome<T> {
    tracing::error!(operation, email, error = %e, "User store failed");
    AuthOutcome::Error(AuthError::Storage(e))
}
