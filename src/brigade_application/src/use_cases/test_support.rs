//! Shared in-memory mocks for use case tests.

use std::collections::HashMap;
use std::sync::Arc;

use brigade_core::{
    CredentialHasher, CredentialHasherError, Email, EmailClient, Password, Role, SessionClaims,
    Subject, TokenClass, TokenCodec, TokenCodecError, User, UserStore, UserStoreError,
    VerificationCode, VerificationCodeStore, VerificationCodeStoreError,
};
use chrono::{Duration, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use uuid::Uuid;

pub fn email(raw: &str) -> Email {
    Email::try_from(Secret::from(raw.to_owned())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_owned())).unwrap()
}

/// A user whose password verifies against `MockHasher`.
pub fn verified_user(address: &str, raw_password: &str) -> User {
    User::restore(
        Uuid::new_v4(),
        email(address),
        None,
        Secret::from(format!("hashed-{raw_password}")),
        true,
        Role::customer(),
    )
}

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MockUserStore {
    pub async fn seed(&self, user: User) {
        let key = user.email().as_ref().expose_secret().clone();
        self.users.write().await.insert(key, user);
    }
}

#[async_trait::async_trait]
impl UserStore for MockUserStore {
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

#[derive(Clone, Default)]
pub struct MockVerificationCodeStore {
    codes: Arc<RwLock<HashMap<String, VerificationCode>>>,
    rate_limited: bool,
}

impl MockVerificationCodeStore {
    /// A store whose cooldown is always live.
    pub fn rate_limited() -> Self {
        Self {
            codes: Arc::default(),
            rate_limited: true,
        }
    }
}

#[async_trait::async_trait]
impl VerificationCodeStore for MockVerificationCodeStore {
    async fn issue(&self, email: &Email) -> Result<VerificationCode, VerificationCodeStoreError> {
        if self.rate_limited {
            return Err(VerificationCodeStoreError::RateLimited);
        }
        let code = VerificationCode::random();
        self.codes
            .write()
            .await
            .insert(email.as_ref().expose_secret().clone(), code.clone());
        Ok(code)
    }

    async fn fetch(
        &self,
        email: &Email,
    ) -> Result<Option<VerificationCode>, VerificationCodeStoreError> {
        let codes = self.codes.read().await;
        Ok(codes.get(email.as_ref().expose_secret()).cloned())
    }

    async fn clear(&self, email: &Email) -> Result<(), VerificationCodeStoreError> {
        self.codes
            .write()
            .await
            .remove(email.as_ref().expose_secret());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockRevocationStore {
    revoked: Arc<RwLock<HashMap<Uuid, u64>>>,
}

impl MockRevocationStore {
    /// TTL the given token id was revoked with, if any.
    pub async fn revoked_ttl(&self, token_id: Uuid) -> Option<u64> {
        self.revoked.read().await.get(&token_id).copied()
    }
}

#[async_trait::async_trait]
impl brigade_core::RevocationStore for MockRevocationStore {
    async fn revoke(
        &self,
        token_id: Uuid,
        ttl_seconds: u64,
    ) -> Result<(), brigade_core::RevocationStoreError> {
        self.revoked.write().await.insert(token_id, ttl_seconds);
        Ok(())
    }

    async fn is_revoked(&self, token_id: Uuid) -> Result<bool, brigade_core::RevocationStoreError> {
        Ok(self.revoked.read().await.contains_key(&token_id))
    }
}

#[derive(Clone, Default)]
pub struct MockEmailClient;

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        _recipient: &Email,
        _subject: &str,
        _content: &str,
    ) -> Result<(), String> {
        Ok(())
    }
}

pub struct MockHasher;

#[async_trait::async_trait]
impl CredentialHasher for MockHasher {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, CredentialHasherError> {
        Ok(Secret::from(format!(
            "hashed-{}",
            password.as_ref().expose_secret()
        )))
    }

    async fn verify(&self, password: &Password, stored_hash: &Secret<String>) -> bool {
        stored_hash.expose_secret() == &format!("hashed-{}", password.as_ref().expose_secret())
    }
}

/// Issues opaque token strings and remembers the claims behind them.
#[derive(Clone, Default)]
pub struct MockCodec {
    issued: Arc<std::sync::RwLock<HashMap<String, SessionClaims>>>,
}

impl TokenCodec for MockCodec {
    fn issue(
        &self,
        subject: &Subject,
        ttl: Duration,
        class: TokenClass,
    ) -> Result<String, TokenCodecError> {
        let claims = SessionClaims::new(subject.clone(), ttl, class);
        let token = format!("tok-{}", claims.jti);
        self.issued
            .write()
            .expect("codec lock poisoned")
            .insert(token.clone(), claims);
        Ok(token)
    }

    fn decode(&self, token: &str) -> Option<SessionClaims> {
        let issued = self.issued.read().expect("codec lock poisoned");
        let claims = issued.get(token)?.clone();
        if claims.exp <= Utc::now().timestamp() {
            return None;
        }
        Some(claims)
    }
}
