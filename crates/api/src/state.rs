use auth::{
    AuthService, InMemoryUserStore, RevocationList, SigningKey, TokenIssuer, TokenValidator,
    UserStore,
};
use capture_core::AppConfig;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    pub auth_service: AuthService,
    pub issuer: TokenIssuer,
    pub validator: TokenValidator,
    pub revocations: Arc<RevocationList>,
}

impl AppState {
    pub fn new(
        auth_service: AuthService,
        issuer: TokenIssuer,
        validator: TokenValidator,
        revocations: Arc<RevocationList>,
    ) -> Self {
        Self {
            auth_service,
            issuer,
            validator,
            revocations,
        }
    }

    /// Wire the token issuer, validator and revocation list from configuration.
    /// Fails if the signing key cannot be built.
    pub fn from_config(config: &AppConfig, store: Arc<dyn UserStore>) -> auth::Result<Self> {
        let key = Arc::new(SigningKey::from_secret(&config.auth.jwt_secret)?);
        let revocations = Arc::new(RevocationList::new());

        let issuer = TokenIssuer::new(
            Arc::clone(&key),
            config.auth.issuer.clone(),
            config.auth.token_expiry_seconds,
        )?;
        let validator = TokenValidator::new(key, &config.auth.issuer, Arc::clone(&revocations));

        Ok(Self::new(AuthService::new(store), issuer, validator, revocations))
    }

    /// Same as [`AppState::from_config`] with a fresh in-memory user store.
    pub fn in_memory(config: &AppConfig) -> auth::Result<Self> {
        Self::from_config(config, Arc::new(InMemoryUserStore::new()))
    }
}
