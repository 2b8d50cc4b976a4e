use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Process-wide set of bearer tokens invalidated before their natural expiry.
///
/// Shared by every request worker through an `Arc`. Nothing is persisted: the
/// set lives as long as the process. Entries only leave through
/// [`RevocationList::purge_expired`], and only when they were revoked with a
/// known expiry; without a sweeper the set grows for the life of the process.
#[derive(Debug, Default)]
pub struct RevocationList {
    // token -> expiry (unix seconds), `None` when the expiry is unknown
    entries: RwLock<HashMap<String, Option<i64>>>,
}

impl RevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke a token with no known expiry. Idempotent; returns `true` if the
    /// token was not already revoked.
    pub fn revoke(&self, token: &str) -> bool {
        self.insert(token, None)
    }

    /// Revoke a token that stops being valid on its own at `expires_at`.
    pub fn revoke_until(&self, token: &str, expires_at: i64) -> bool {
        self.insert(token, Some(expires_at))
    }

    pub fn is_revoked(&self, token: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop entries whose recorded expiry is at or before `now`. Entries with
    /// an unknown expiry are kept. Returns how many were removed.
    pub fn purge_expired(&self, now: i64) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, expires_at| expires_at.is_none_or(|exp| exp > now));
        before - entries.len()
    }

    fn insert(&self, token: &str, expires_at: Option<i64>) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.contains_key(token) {
            return false;
        }
        entries.insert(token.to_string(), expires_at);
        true
    }
}
