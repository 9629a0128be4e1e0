use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use brigade_core::{Email, User, UserStore, UserStoreError};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory identity store for tests and local development.
#[derive(Clone, Default)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pre-built record, e.g. an already-verified user.
    pub async fn seed(&self, user: User) {
        let key = user.email().as_ref().expose_secret().clone();
        self.users.write().await.insert(key, user);
    }
}

#[async_trait]
impl UserStore for HashMapUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.get(email.as_ref().expose_secret()).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.id() == id).cloned())
    }

    async fn create_unverified(
        &self,
        email: Email,
        password_hash: Secret<String>,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let key = email.as_ref().expose_secret().clone();
        if users.contains_key(&key) {
            return Err(UserStoreError::EmailTaken);
        }
        let user = User::unverified(email, password_hash);
        users.insert(key, user.clone());
        Ok(user)
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|user| user.id() == id)
            .ok_or(UserStoreError::UserNotFound)?;
        user.mark_verified();
        Ok(())
    }
}
