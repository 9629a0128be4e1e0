use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use async_trait::async_trait;
use brigade_core::{CredentialHasher, CredentialHasherError, Password};
use secrecy::{ExposeSecret, Secret};

/// Argon2id password hasher.
///
/// Hashing costs tens of milliseconds of CPU on purpose, so both
/// operations run on the blocking pool instead of the request-serving
/// path.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

fn argon2() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<Secret<String>, CredentialHasherError> {
        let password = password.clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|hash| Secret::from(hash.to_string()))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| CredentialHasherError::Hash(e.to_string()))?
        .map_err(CredentialHasherError::Hash)
    }

    #[tracing::instrument(name = "Verifying password hash", skip_all)]
    async fn verify(&self, password: &Password, stored_hash: &Secret<String>) -> bool {
        let password = password.clone();
        let stored_hash = stored_hash.clone();
        let current_span: tracing::Span = tracing::Span::current();

        let outcome = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                // A malformed stored hash is a verification failure, not an error
                let Ok(expected) = PasswordHash::new(stored_hash.expose_secret()) else {
                    return false;
                };
                let Ok(hasher) = argon2() else {
                    return false;
                };
                hasher
                    .verify_password(password.as_ref().expose_secret().as_bytes(), &expected)
                    .is_ok()
            })
        })
        .await;

        outcome.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_owned())).unwrap()
    }

    #[tokio::test]
    async fn hash_then_verify_round_trips() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash(&password("pw12345678")).await.unwrap();
        assert!(hasher.verify(&password("pw12345678"), &hash).await);
    }

    #[tokio::test]
    async fn wrong_password_does_not_verify() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash(&password("pw12345678")).await.unwrap();
        assert!(!hasher.verify(&password("wrong-password"), &hash).await);
    }

    #[tokio::test]
    async fn hash_output_is_not_the_plaintext() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash(&password("pw12345678")).await.unwrap();
        assert_ne!(hash.expose_secret(), "pw12345678");
    }

    #[tokio::test]
    async fn malformed_stored_hash_verifies_false() {
        let hasher = Argon2Hasher::new();
        let garbage = Secret::from("not-a-phc-string".to_owned());
        assert!(!hasher.verify(&password("pw12345678"), &garbage).await);
    }
}
