use std::sync::Arc;

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{email::Email, user::User, verification_code::VerificationCode};

// UserStore port trait and errors
#[derive(Debug, Error, PartialEq)]
pub enum UserStoreError {
    #[error("Email already registered")]
    EmailTaken,
    #[error("User not found")]
    UserNotFound,
    #[error("Database error: {0}")]
    Database(String),
}

/// The identity collaborator. The auth subsystem does not own the record's
/// lifecycle beyond creating unverified identities and flipping the
/// verified flag.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserStoreError>;
    async fn create_unverified(
        &self,
        email: Email,
        password_hash: Secret<String>,
    ) -> Result<User, UserStoreError>;
    async fn mark_verified(&self, id: Uuid) -> Result<(), UserStoreError>;
}

#[async_trait]
impl<T: UserStore + ?Sized> UserStore for Arc<T> {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        (**self).find_by_email(email).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserStoreError> {
        (**self).find_by_id(id).await
    }

    async fn create_unverified(
        &self,
        email: Email,
        password_hash: Secret<String>,
    ) -> Result<User, UserStoreError> {
        (**self).create_unverified(email, password_hash).await
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), UserStoreError> {
        (**self).mark_verified(id).await
    }
}

// RevocationStore port trait and errors
#[derive(Debug, Error, PartialEq)]
pub enum RevocationStoreError {
    #[error("Revocation store error: {0}")]
    Store(String),
}

/// Shared blocklist of token ids that must be rejected despite an
/// otherwise-valid signature and expiry.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Idempotent. The marker expires after `ttl_seconds`.
    async fn revoke(&self, token_id: Uuid, ttl_seconds: u64) -> Result<(), RevocationStoreError>;
    async fn is_revoked(&self, token_id: Uuid) -> Result<bool, RevocationStoreError>;
}

#[async_trait]
impl<T: RevocationStore + ?Sized> RevocationStore for Arc<T> {
    async fn revoke(&self, token_id: Uuid, ttl_seconds: u64) -> Result<(), RevocationStoreError> {
        (**self).revoke(token_id, ttl_seconds).await
    }

    async fn is_revoked(&self, token_id: Uuid) -> Result<bool, RevocationStoreError> {
        (**self).is_revoked(token_id).await
    }
}

// VerificationCodeStore port trait and errors
#[derive(Debug, Error, PartialEq)]
pub enum VerificationCodeStoreError {
    #[error("Please wait before requesting another code")]
    RateLimited,
    #[error("Verification code store error: {0}")]
    Store(String),
}

/// Short-lived verification codes plus the per-email issuance cooldown.
#[async_trait]
pub trait VerificationCodeStore: Send + Sync {
    /// Generate and store a fresh code. Fails with `RateLimited` while a
    /// cooldown marker is live for `email`.
    async fn issue(&self, email: &Email) -> Result<VerificationCode, VerificationCodeStoreError>;
    async fn fetch(
        &self,
        email: &Email,
    ) -> Result<Option<VerificationCode>, VerificationCodeStoreError>;
    /// Removes the stored code. Does not clear the cooldown marker.
    async fn clear(&self, email: &Email) -> Result<(), VerificationCodeStoreError>;
}

#[async_trait]
impl<T: VerificationCodeStore + ?Sized> VerificationCodeStore for Arc<T> {
    async fn issue(&self, email: &Email) -> Result<VerificationCode, VerificationCodeStoreError> {
        (**self).issue(email).await
    }

    async fn fetch(
        &self,
        email: &Email,
    ) -> Result<Option<VerificationCode>, VerificationCodeStoreError> {
        (**self).fetch(email).await
    }

    async fn clear(&self, email: &Email) -> Result<(), VerificationCodeStoreError> {
        (**self).clear(email).await
    }
}
