mod error;
mod jwt;
mod password;
mod revocation;

pub mod model;
pub mod service;
pub mod store;

pub use error::{AuthError, Result, StoreError};

pub use jwt::{Claims, SigningKey, TokenIssuer, TokenStatus, TokenValidator};
pub use password::{hash_password, verify_password};
pub use revocation::RevocationList;

pub use model::{Credentials, Identity, NewUser, User};
pub use service::{AuthOutcome, AuthService, FailureReason};
pub use store::{InMemoryUserStore, UserStore};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_login_then_issue_token_for_stored_email() {
        let key =
            Arc::new(SigningKey::from_secret("integration-secret-long-enough-for-tests").unwrap());
        let issuer = TokenIssuer::new(Arc::clone(&key), "capture-info", 10_800).unwrap();
        let validator = TokenValidator::new(key, "capture-info", Arc::new(RevocationList::new()));
        let service = AuthService::new(Arc::new(InMemoryUserStore::new()));

        let registered = service
            .register(NewUser {
                email: "a@x.com".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                password: "password123".to_string(),
            })
            .await;
        assert!(registered.is_success());

        let AuthOutcome::Success(user) = service
            .login(Credentials {
                email: "a@x.com".to_string(),
                password: "password123".to_string(),
            })
            .await
        else {
            panic!("login should succeed");
        };

        let token = issuer.issue(&user.email).unwrap();
        match validator.inspect(&token) {
            TokenStatus::Valid(claims) => assert_eq!(claims.sub, user.email),
            other => panic!("expected valid token, got {other:?}"),
        }
    }
}
