use async_trait::async_trait;
use brigade_core::{Email, VerificationCode, VerificationCodeStore, VerificationCodeStoreError};
use redis::AsyncCommands;
use secrecy::ExposeSecret;

use super::redis_handle::RedisHandle;
use crate::config::constants::{
    COOLDOWN_KEY_PREFIX, COOLDOWN_SECONDS, VERIFICATION_CODE_KEY_PREFIX,
};

/// Redis-backed verification code store.
///
/// The cooldown claim is a single `SET NX EX`, so two concurrent issues
/// for the same address cannot both succeed.
#[derive(Clone)]
pub struct RedisVerificationCodeStore {
    handle: RedisHandle,
    code_ttl_seconds: u64,
}

impl RedisVerificationCodeStore {
    pub fn new(handle: RedisHandle, code_ttl_seconds: u64) -> Self {
        Self {
            handle,
            code_ttl_seconds,
        }
    }

    async fn connection(
        &self,
    ) -> Result<redis::aio::MultiplexedConnection, VerificationCodeStoreError> {
        self.handle
            .connection()
            .await
            .map_err(|e| VerificationCodeStoreError::Store(e.to_string()))
    }
}

#[async_trait]
impl VerificationCodeStore for RedisVerificationCodeStore {
    #[tracing::instrument(name = "Issuing verification code", skip_all)]
    async fn issue(&self, email: &Email) -> Result<VerificationCode, VerificationCodeStoreError> {
        let mut conn = self.connection().await?;

        let claimed: Option<String> = redis::cmd("SET")
            .arg(cooldown_key(email))
            .arg("1")
            .arg("NX")
            .arg("EX")
            .arg(COOLDOWN_SECONDS)
            .query_async(&mut conn)
            .await
            .map_err(|e| VerificationCodeStoreError::Store(e.to_string()))?;

        if claimed.is_none() {
            return Err(VerificationCodeStoreError::RateLimited);
        }

        let code = VerificationCode::random();
        let _: () = conn
            .set_ex(code_key(email), code.as_str(), self.code_ttl_seconds)
            .await
            .map_err(|e| VerificationCodeStoreError::Store(e.to_string()))?;

        Ok(code)
    }

    async fn fetch(
        &self,
        email: &Email,
    ) -> Result<Option<VerificationCode>, VerificationCodeStoreError> {
        let mut conn = self.connection().await?;

        let stored: Option<String> = conn
            .get(code_key(email))
            .await
            .map_err(|e| VerificationCodeStoreError::Store(e.to_string()))?;

        Ok(stored.as_deref().and_then(VerificationCode::parse))
    }

    #[tracing::instrument(name = "Clearing verification code", skip_all)]
    async fn clear(&self, email: &Email) -> Result<(), VerificationCodeStoreError> {
        let mut conn = self.connection().await?;

        let _: () = conn
            .del(code_key(email))
            .await
            .map_err(|e| VerificationCodeStoreError::Store(e.to_string()))?;
        Ok(())
    }
}

fn code_key(email: &Email) -> String {
    format!(
        "{VERIFICATION_CODE_KEY_PREFIX}{}",
        email.as_ref().expose_secret()
    )
}

fn cooldown_key(email: &Email) -> String {
    format!("{COOLDOWN_KEY_PREFIX}{}", email.as_ref().expose_secret())
}
