use async_trait::async_trait;
use brigade_core::{RevocationStore, RevocationStoreError};
use redis::AsyncCommands;
use uuid::Uuid;

use super::redis_handle::RedisHandle;
use crate::config::constants::REVOKED_TOKEN_KEY_PREFIX;

/// Redis-backed token blocklist. The store's own expiry evicts markers
/// once their TTL elapses.
#[derive(Clone)]
pub struct RedisRevocationStore {
    handle: RedisHandle,
}

impl RedisRevocationStore {
    pub fn new(handle: RedisHandle) -> Self {
        Self { handle }
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    #[tracing::instrument(name = "Revoking token id", skip_all)]
    async fn revoke(&self, token_id: Uuid, ttl_seconds: u64) -> Result<(), RevocationStoreError> {
        let mut conn = self
            .handle
            .connection()
            .await
            .map_err(|e| RevocationStoreError::Store(e.to_string()))?;

        let _: () = conn
            .set_ex(get_key(token_id), "", ttl_seconds)
            .await
            .map_err(|e| RevocationStoreError::Store(e.to_string()))?;
        Ok(())
    }

    async fn is_revoked(&self, token_id: Uuid) -> Result<bool, RevocationStoreError> {
        let mut conn = self
            .handle
            .connection()
            .await
            .map_err(|e| RevocationStoreError::Store(e.to_string()))?;

        conn.exists(get_key(token_id))
            .await
            .map_err(|e| RevocationStoreError::Store(e.to_string()))
    }
}

fn get_key(token_id: Uuid) -> String {
    format!("{REVOKED_TOKEN_KEY_PREFIX}{token_id}")
}
