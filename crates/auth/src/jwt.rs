use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AuthError, Result};
use crate::model::Identity;
use crate::revocation::RevocationList;

const MIN_RECOMMENDED_SECRET_BYTES: usize = 32;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Issuer label
    pub iss: String,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn new(
        subject: String,
        issuer: String,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self> {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            AuthError::TokenGenerationError("token expiry is out of range".to_string())
        })?;

        Ok(Self {
            sub: subject,
            iss: issuer,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// A token is only valid while `now < exp`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn identity(&self) -> Identity {
        Identity {
            email: self.sub.clone(),
            issued_at: self.iat,
            expires_at: self.exp,
        }
    }
}

/// Symmetric HS256 key pair derived from the configured secret.
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Build the key from process configuration. Called once at startup; an
    /// error here must stop the process.
    pub fn from_secret(secret: &str) -> Result<Self> {
        if secret.trim().is_empty() {
            return Err(AuthError::InvalidKey("signing secret is empty".to_string()));
        }
        if secret.len() < MIN_RECOMMENDED_SECRET_BYTES {
            tracing::warn!(
                length = secret.len(),
                "JWT signing secret is shorter than {MIN_RECOMMENDED_SECRET_BYTES} bytes"
            );
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }
}

/// Creates signed, time-limited bearer tokens bound to an email.
#[derive(Clone)]
pub struct TokenIssuer {
    key: Arc<SigningKey>,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    /// Fails when `ttl_seconds` is not a representable positive duration, so a
    /// bad lifetime stops startup instead of failing every issue.
    pub fn new(
        key: Arc<SigningKey>,
        issuer: impl Into<String>,
        ttl_seconds: i64,
    ) -> Result<Self> {
        let ttl = Duration::try_seconds(ttl_seconds)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| {
                AuthError::TokenGenerationError(format!(
                    "token lifetime of {ttl_seconds} seconds is out of range"
                ))
            })?;

        Ok(Self {
            key,
            issuer: issuer.into(),
            ttl,
        })
    }

    /// Issue a token for `subject`, valid from now for the configured TTL.
    pub fn issue(&self, subject: &str) -> Result<String> {
        self.issue_at(subject, Utc::now())
    }

    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String> {
        if subject.trim().is_empty() {
            return Err(AuthError::TokenGenerationError("subject is empty".to_string()));
        }

        let claims = Claims::new(subject.to_string(), self.issuer.clone(), now, self.ttl)?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.key.encoding)
            .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }
}

/// Result of inspecting a presented bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Valid(Claims),
    Revoked,
    Expired,
    BadSignature,
    Malformed(String),
}

impl TokenStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenStatus::Valid(_))
    }
}

/// Checks revocation, signature, issuer and expiry of presented tokens.
#[derive(Clone)]
pub struct TokenValidator {
    key: Arc<SigningKey>,
    validation: Validation,
    revocations: Arc<RevocationList>,
}

impl TokenValidator {
    pub fn new(key: Arc<SigningKey>, issuer: &str, revocations: Arc<RevocationList>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        // Expiry is checked against an explicit clock in `inspect_at`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            key,
            validation,
            revocations,
        }
    }

    pub fn revocations(&self) -> &Arc<RevocationList> {
        &self.revocations
    }

    pub fn inspect(&self, token: &str) -> TokenStatus {
        self.inspect_at(token, Utc::now())
    }

    pub fn inspect_at(&self, token: &str, now: DateTime<Utc>) -> TokenStatus {
        if self.revocations.is_revoked(token) {
            return TokenStatus::Revoked;
        }

        let claims = match decode::<Claims>(token, &self.key.decoding, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                return match e.kind() {
                    ErrorKind::InvalidSignature => TokenStatus::BadSignature,
                    ErrorKind::ExpiredSignature => TokenStatus::Expired,
                    _ => TokenStatus::Malformed(e.to_string()),
                };
            }
        };

        if claims.is_expired_at(now) {
            return TokenStatus::Expired;
        }

        TokenStatus::Valid(claims)
    }
}
