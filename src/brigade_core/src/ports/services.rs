use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::Password,
    session::{SessionClaims, Subject, TokenClass},
};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

#[async_trait]
impl<T: EmailClient + ?Sized> EmailClient for Arc<T> {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        (**self).send_email(recipient, subject, content).await
    }
}

#[derive(Debug, Error)]
pub enum CredentialHasherError {
    #[error("Failed to hash password: {0}")]
    Hash(String),
}

/// One-way password hashing. Hashing is deliberately expensive and must
/// not run on the request-serving path of a cooperative runtime.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, CredentialHasherError>;
    /// A malformed stored hash verifies `false`, never an error.
    async fn verify(&self, password: &Password, stored_hash: &Secret<String>) -> bool;
}

#[async_trait]
impl<T: CredentialHasher + ?Sized> CredentialHasher for Arc<T> {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, CredentialHasherError> {
        (**self).hash(password).await
    }

    async fn verify(&self, password: &Password, stored_hash: &Secret<String>) -> bool {
        (**self).verify(password, stored_hash).await
    }
}

#[derive(Debug, Error)]
pub enum TokenCodecError {
    #[error("Invalid encryption key material")]
    InvalidKeyMaterial,
    #[error("Failed to issue token: {0}")]
    Issue(String),
}

/// Builds, signs and encrypts session tokens; decrypts, verifies and
/// decodes them back to claims.
///
/// Pure function of its inputs plus the process-wide keys, so the trait is
/// synchronous.
pub trait TokenCodec: Send + Sync {
    /// Sign-then-encrypt a token for `subject` with a fresh token id.
    fn issue(
        &self,
        subject: &Subject,
        ttl: Duration,
        class: TokenClass,
    ) -> Result<String, TokenCodecError>;

    /// Every failure mode - bad ciphertext, bad signature, expired -
    /// collapses to `None` so callers cannot distinguish why a token was
    /// rejected.
    fn decode(&self, token: &str) -> Option<SessionClaims>;
}

impl<T: TokenCodec + ?Sized> TokenCodec for Arc<T> {
    fn issue(
        &self,
        subject: &Subject,
        ttl: Duration,
        class: TokenClass,
    ) -> Result<String, TokenCodecError> {
        (**self).issue(subject, ttl, class)
    }

    fn decode(&self, token: &str) -> Option<SessionClaims> {
        (**self).decode(token)
    }
}
