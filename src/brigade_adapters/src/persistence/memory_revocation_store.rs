use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use brigade_core::{RevocationStore, RevocationStoreError};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory revocation store with real TTL semantics, for tests and
/// local development.
#[derive(Clone, Default)]
pub struct MemoryRevocationStore {
    revoked: Arc<RwLock<HashMap<Uuid, Instant>>>,
}

impl MemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn revoke(&self, token_id: Uuid, ttl_seconds: u64) -> Result<(), RevocationStoreError> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds);
        self.revoked.write().await.insert(token_id, expires_at);
        Ok(())
    }

    async fn is_revoked(&self, token_id: Uuid) -> Result<bool, RevocationStoreError> {
        let mut revoked = self.revoked.write().await;
        match revoked.get(&token_id) {
            Some(expires_at) if *expires_at > Instant::now() => Ok(true),
            Some(_) => {
                revoked.remove(&token_id);
                Ok(false)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn revoke_is_visible_immediately_and_idempotent() {
        let store = MemoryRevocationStore::new();
        let token_id = Uuid::new_v4();

        store.revoke(token_id, 900).await.unwrap();
        store.revoke(token_id, 900).await.unwrap();
        assert!(store.is_revoked(token_id).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_ids_are_not_revoked() {
        let store = MemoryRevocationStore::new();
        assert!(!store.is_revoked(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn markers_expire_after_their_ttl() {
        let store = MemoryRevocationStore::new();
        let token_id = Uuid::new_v4();

        store.revoke(token_id, 0).await.unwrap();
        assert!(!store.is_revoked(token_id).await.unwrap());
    }
}
