use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use brigade_core::{Email, VerificationCode, VerificationCodeStore, VerificationCodeStoreError};
use dashmap::{DashMap, mapref::entry::Entry};
use secrecy::ExposeSecret;

use crate::config::constants::{COOLDOWN_SECONDS, defaults};

/// In-memory verification code store with real TTL and cooldown
/// semantics, for tests and local development.
///
/// The cooldown claim happens under the DashMap entry lock, matching the
/// atomicity of the Redis `SET NX EX` path.
#[derive(Clone)]
pub struct MemoryVerificationCodeStore {
    inner: Arc<Inner>,
}

struct Inner {
    codes: DashMap<String, (VerificationCode, Instant)>,
    cooldowns: DashMap<String, Instant>,
    code_ttl: Duration,
    cooldown: Duration,
}

impl Default for MemoryVerificationCodeStore {
    fn default() -> Self {
        Self::with_ttls(
            Duration::from_secs(defaults::VERIFICATION_CODE_TTL_SECONDS),
            Duration::from_secs(COOLDOWN_SECONDS),
        )
    }
}

impl MemoryVerificationCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttls(code_ttl: Duration, cooldown: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                codes: DashMap::new(),
                cooldowns: DashMap::new(),
                code_ttl,
                cooldown,
            }),
        }
    }
}

#[async_trait]
impl VerificationCodeStore for MemoryVerificationCodeStore {
    async fn issue(&self, email: &Email) -> Result<VerificationCode, VerificationCodeStoreError> {
        let key = email.as_ref().expose_secret().clone();
        let now = Instant::now();

        match self.inner.cooldowns.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                if *entry.get() > now {
                    return Err(VerificationCodeStoreError::RateLimited);
                }
                entry.insert(now + self.inner.cooldown);
            }
            Entry::Vacant(entry) => {
                entry.insert(now + self.inner.cooldown);
            }
        }

        let code = VerificationCode::random();
        self.inner
            .codes
            .insert(key, (code.clone(), now + self.inner.code_ttl));
        Ok(code)
    }

    async fn fetch(
        &self,
        email: &Email,
    ) -> Result<Option<VerificationCode>, VerificationCodeStoreError> {
        let key = email.as_ref().expose_secret().clone();
        let now = Instant::now();

        let expired = match self.inner.codes.get(&key) {
            Some(entry) if entry.1 > now => return Ok(Some(entry.0.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.inner.codes.remove(&key);
        }
        Ok(None)
    }

    async fn clear(&self, email: &Email) -> Result<(), VerificationCodeStoreError> {
        self.inner.codes.remove(email.as_ref().expose_secret());
        Ok(())
    }
}
