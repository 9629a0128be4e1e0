use brigade_core::{
    EmailClient, UserStore, UserStoreError, VerificationCodeStore, VerificationCodeStoreError,
};
use uuid::Uuid;

use super::dispatch_email;

#[derive(Debug, thiserror::Error)]
pub enum ResendVerificationError {
    #[error("User not found")]
    UserNotFound,
    #[error("Email is already verified")]
    AlreadyVerified,
    #[error("Please wait before requesting another code")]
    RateLimited,
    #[error("User store error: {0}")]
    UserStore(UserStoreError),
    #[error("Verification code store error: {0}")]
    CodeStore(VerificationCodeStoreError),
}

impl From<UserStoreError> for ResendVerificationError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => ResendVerificationError::UserNotFound,
            other => ResendVerificationError::UserStore(other),
        }
    }
}

impl From<VerificationCodeStoreError> for ResendVerificationError {
    fn from(error: VerificationCodeStoreError) -> Self {
        match error {
            VerificationCodeStoreError::RateLimited => ResendVerificationError::RateLimited,
            other => ResendVerificationError::CodeStore(other),
        }
    }
}

/// Resend verification use case - issues a fresh code for a
/// still-unverified identity.
pub struct ResendVerificationUseCase<U, V, E>
where
    U: UserStore,
    V: VerificationCodeStore,
    E: EmailClient + Clone + 'static,
{
    user_store: U,
    code_store: V,
    email_client: E,
}

impl<U, V, E> ResendVerificationUseCase<U, V, E>
where
    U: UserStore,
    V: VerificationCodeStore,
    E: EmailClient + Clone + 'static,
{
    pub fn new(user_store: U, code_store: V, email_client: E) -> Self {
        Self {
            user_store,
            code_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "ResendVerificationUseCase::execute", skip_all)]
    pub async fn execute(&self, user_id: Uuid) -> Result<(), ResendVerificationError> {
        let user = self
            .user_store
            .find_by_id(user_id)
            .await?
            .ok_or(ResendVerificationError::UserNotFound)?;

        if user.email_verified() {
            return Err(ResendVerificationError::AlreadyVerified);
        }

        let code = self.code_store.issue(user.email()).await?;

        dispatch_email(
            self.email_client.clone(),
            user.email().clone(),
            "Resend Email Verification".to_owned(),
            format!("Your new verification code is: {}", code.as_str()),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        MockEmailClient, MockUserStore, MockVerificationCodeStore, email, verified_user,
    };
    use secrecy::Secret;

    #[tokio::test]
    async fn resend_issues_a_new_code_for_an_unverified_user() {
        let user_store = MockUserStore::default();
        let code_store = MockVerificationCodeStore::default();
        let user = user_store
            .create_unverified(email("a@x.com"), Secret::from("hash".to_owned()))
            .await
            .unwrap();

        let use_case = ResendVerificationUseCase::new(
            user_store,
            code_store.clone(),
            MockEmailClient::default(),
        );
        use_case.execute(user.id()).await.unwrap();

        assert!(code_store.fetch(&email("a@x.com")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn resend_rejects_an_already_verified_user() {
        let user_store = MockUserStore::default();
        let user = verified_user("a@x.com", "pw12345678");
        let user_id = user.id();
        user_store.seed(user).await;

        let use_case = ResendVerificationUseCase::new(
            user_store,
            MockVerificationCodeStore::default(),
            MockEmailClient::default(),
        );
        let result = use_case.execute(user_id).await;
        assert!(matches!(
            result,
            Err(ResendVerificationError::AlreadyVerified)
        ));
    }

    #[tokio::test]
    async fn resend_propagates_the_cooldown() {
        let user_store = MockUserStore::default();
        let user = user_store
            .create_unverified(email("a@x.com"), Secret::from("hash".to_owned()))
            .await
            .unwrap();

        let use_case = ResendVerificationUseCase::new(
            user_store,
            MockVerificationCodeStore::rate_limited(),
            MockEmailClient::default(),
        );
        let result = use_case.execute(user.id()).await;
        assert!(matches!(result, Err(ResendVerificationError::RateLimited)));
    }

    #[tokio::test]
    async fn resend_for_an_unknown_identity_is_not_found() {
        let use_case = ResendVerificationUseCase::new(
            MockUserStore::default(),
            MockVerificationCodeStore::default(),
            MockEmailClient::default(),
        );
        let result = use_case.execute(Uuid::new_v4()).await;
        assert!(matches!(result, Err(ResendVerificationError::UserNotFound)));
    }
}
