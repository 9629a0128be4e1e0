use brigade_core::{
    Email, Subject, TokenCodec, TokenCodecError, UserStore, UserStoreError, VerificationCodeStore,
    VerificationCodeStoreError,
};
use secrecy::ExposeSecret;

use super::{TokenLifetimes, TokenPair, issue_token_pair};

#[derive(Debug, thiserror::Error)]
pub enum VerifyEmailError {
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid or expired verification code")]
    InvalidCode,
    #[error("User store error: {0}")]
    UserStore(UserStoreError),
    #[error("Verification code store error: {0}")]
    CodeStore(#[from] VerificationCodeStoreError),
    #[error("{0}")]
    Codec(#[from] TokenCodecError),
}

impl From<UserStoreError> for VerifyEmailError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => VerifyEmailError::UserNotFound,
            other => VerifyEmailError::UserStore(other),
        }
    }
}

/// Verify email use case - checks the 6-digit code, marks the identity
/// verified and issues the first real token pair.
pub struct VerifyEmailUseCase<U, V, C>
where
    U: UserStore,
    V: VerificationCodeStore,
    C: TokenCodec,
{
    user_store: U,
    code_store: V,
    token_codec: C,
    lifetimes: TokenLifetimes,
}

impl<U, V, C> VerifyEmailUseCase<U, V, C>
where
    U: UserStore,
    V: VerificationCodeStore,
    C: TokenCodec,
{
    pub fn new(user_store: U, code_store: V, token_codec: C, lifetimes: TokenLifetimes) -> Self {
        Self {
            user_store,
            code_store,
            token_codec,
            lifetimes,
        }
    }

    /// "No code stored" and "wrong code" are the same failure to the
    /// caller. The cooldown marker survives `clear` by design.
    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email, code: &str) -> Result<TokenPair, VerifyEmailError> {
        let user = self
            .user_store
            .find_by_email(&email)
            .await?
            .ok_or(VerifyEmailError::UserNotFound)?;

        match self.code_store.fetch(&email).await? {
            Some(stored) if stored.as_str() == code => {}
            _ => return Err(VerifyEmailError::InvalidCode),
        }

        self.user_store.mark_verified(user.id()).await?;
        self.code_store.clear(&email).await?;

        let subject = Subject::new(user.id(), email.as_ref().expose_secret().clone());
        Ok(issue_token_pair(
            &self.token_codec,
            &subject,
            &self.lifetimes,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        MockCodec, MockUserStore, MockVerificationCodeStore, email, password,
    };
    use brigade_core::CredentialHasher;

    async fn registered_store() -> (MockUserStore, MockVerificationCodeStore, String) {
        let user_store = MockUserStore::default();
        let code_store = MockVerificationCodeStore::default();
        let hash = crate::use_cases::test_support::MockHasher
            .hash(&password("pw12345678"))
            .await
            .unwrap();
        user_store
            .create_unverified(email("a@x.com"), hash)
            .await
            .unwrap();
        let code = code_store.issue(&email("a@x.com")).await.unwrap();
        (user_store, code_store, code.as_str().to_owned())
    }

    #[tokio::test]
    async fn correct_code_verifies_and_issues_a_pair() {
        let (user_store, code_store, code) = registered_store().await;
        let use_case = VerifyEmailUseCase::new(
            user_store.clone(),
            code_store.clone(),
            MockCodec::default(),
            TokenLifetimes::default(),
        );

        let pair = use_case.execute(email("a@x.com"), &code).await.unwrap();
        assert_ne!(pair.access_token, pair.refresh_token);

        let user = user_store
            .find_by_email(&email("a@x.com"))
            .await
            .unwrap()
            .unwrap();
        assert!(user.email_verified());

        // Code is consumed
        assert!(code_store.fetch(&email("a@x.com")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn wrong_code_is_rejected() {
        let (user_store, code_store, code) = registered_store().await;
        let use_case = VerifyEmailUseCase::new(
            user_store.clone(),
            code_store,
            MockCodec::default(),
            TokenLifetimes::default(),
        );

        let wrong = if code == "000000" { "000001" } else { "000000" };
        let result = use_case.execute(email("a@x.com"), wrong).await;
        assert!(matches!(result, Err(VerifyEmailError::InvalidCode)));

        let user = user_store
            .find_by_email(&email("a@x.com"))
            .await
            .unwrap()
            .unwrap();
        assert!(!user.email_verified());
    }

    #[tokio::test]
    async fn missing_code_counts_as_mismatch() {
        let user_store = MockUserStore::default();
        user_store
            .create_unverified(email("a@x.com"), secrecy::Secret::from("hash".to_owned()))
            .await
            .unwrap();
        let use_case = VerifyEmailUseCase::new(
            user_store,
            MockVerificationCodeStore::default(),
            MockCodec::default(),
            TokenLifetimes::default(),
        );

        let result = use_case.execute(email("a@x.com"), "123456").await;
        assert!(matches!(result, Err(VerifyEmailError::InvalidCode)));
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let use_case = VerifyEmailUseCase::new(
            MockUserStore::default(),
            MockVerificationCodeStore::default(),
            MockCodec::default(),
            TokenLifetimes::default(),
        );

        let result = use_case.execute(email("ghost@x.com"), "123456").await;
        assert!(matches!(result, Err(VerifyEmailError::UserNotFound)));
    }
}
