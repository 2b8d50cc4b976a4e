use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::model::User;

/// Persistence seam for user records, keyed by exact email.
///
/// Implementations must enforce email uniqueness themselves: `insert` returns
/// [`StoreError::Conflict`] when the email is already taken, even if a caller
/// checked with `find_by_email` beforehand.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn insert(&self, user: User) -> Result<User, StoreError>;
}

/// Process-local store backed by a map under an async lock.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        match users.entry(user.email.clone()) {
            Entry::Occupied(entry) => Err(StoreError::Conflict(entry.key().clone())),
            Entry::Vacant(entry) => Ok(entry.insert(user).clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new(
            email.to_string(),
            "Ada".to_string(),
            "Lovelace".to_string(),
            "hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryUserStore::new();
        store.insert(user("a@x.com")).await.unwrap();

        let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.first_name, "Ada");
        assert!(store.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_is_exact_match() {
        let store = InMemoryUserStore::new();
        store.insert(user("a@x.com")).await.unwrap();

        assert!(store.find_by_email("A@X.COM").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts() {
        let store = InMemoryUserStore::new();
        store.insert(user("a@x.com")).await.unwrap();

        let result = store.insert(user("a@x.com")).await;
        assert_eq!(result.unwrap_err(), StoreError::Conflict("a@x.com".to_string()));
        assert_eq!(store.len().await, 1);
    }
}
