use brigade_core::{
    CredentialHasher, Email, Password, Subject, TokenCodec, TokenCodecError, UserStore,
    UserStoreError,
};
use secrecy::ExposeSecret;

use super::{TokenLifetimes, TokenPair, issue_token_pair};

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User not found")]
    UserNotFound,
    #[error("Account email is not verified")]
    AccountNotVerified,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User store error: {0}")]
    UserStore(UserStoreError),
    #[error("{0}")]
    Codec(#[from] TokenCodecError),
}

impl From<UserStoreError> for LoginError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => LoginError::UserNotFound,
            other => LoginError::UserStore(other),
        }
    }
}

/// Login use case - authenticates credentials and issues the session
/// token pair.
pub struct LoginUseCase<U, C, H>
where
    U: UserStore,
    C: TokenCodec,
    H: CredentialHasher,
{
    user_store: U,
    token_codec: C,
    hasher: H,
    lifetimes: TokenLifetimes,
}

impl<U, C, H> LoginUseCase<U, C, H>
where
    U: UserStore,
    C: TokenCodec,
    H: CredentialHasher,
{
    pub fn new(user_store: U, token_codec: C, hasher: H, lifetimes: TokenLifetimes) -> Self {
        Self {
            user_store,
            token_codec,
            hasher,
            lifetimes,
        }
    }

    /// Unknown email, unverified account and wrong password are reported
    /// as distinct outcomes.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email, password: Password) -> Result<TokenPair, LoginError> {
        let user = self
            .user_store
            .find_by_email(&email)
            .await?
            .ok_or(LoginError::UserNotFound)?;

        if !user.email_verified() {
            return Err(LoginError::AccountNotVerified);
        }

        if !self.hasher.verify(&password, user.password_hash()).await {
            return Err(LoginError::InvalidCredentials);
        }

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
        MockCodec, MockHasher, MockUserStore, email, password, verified_user,
    };
    use brigade_core::TokenClass;

    fn use_case(user_store: MockUserStore) -> LoginUseCase<MockUserStore, MockCodec, MockHasher> {
        LoginUseCase::new(
            user_store,
            MockCodec::default(),
            MockHasher,
            TokenLifetimes::default(),
        )
    }

    #[tokio::test]
    async fn login_issues_an_access_and_refresh_pair() {
        let user_store = MockUserStore::default();
        user_store.seed(verified_user("a@x.com", "pw12345678")).await;
        let codec = MockCodec::default();
        let use_case = LoginUseCase::new(
            user_store,
            codec.clone(),
            MockHasher,
            TokenLifetimes::default(),
        );

        let pair = use_case
            .execute(email("a@x.com"), password("pw12345678"))
            .await
            .unwrap();

        let access = codec.decode(&pair.access_token).unwrap();
        let refresh = codec.decode(&pair.refresh_token).unwrap();
        assert_eq!(access.class(), TokenClass::Access);
        assert_eq!(refresh.class(), TokenClass::Refresh);
        assert_eq!(access.user.id, refresh.user.id);
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let use_case = use_case(MockUserStore::default());
        let result = use_case
            .execute(email("ghost@x.com"), password("pw12345678"))
            .await;
        assert!(matches!(result, Err(LoginError::UserNotFound)));
    }

    #[tokio::test]
    async fn unverified_account_is_rejected() {
        let user_store = MockUserStore::default();
        user_store
            .create_unverified(
                email("a@x.com"),
                secrecy::Secret::from("hashed-pw12345678".to_owned()),
            )
            .await
            .unwrap();
        let use_case = use_case(user_store);

        let result = use_case
            .execute(email("a@x.com"), password("pw12345678"))
            .await;
        assert!(matches!(result, Err(LoginError::AccountNotVerified)));
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let user_store = MockUserStore::default();
        user_store.seed(verified_user("a@x.com", "pw12345678")).await;
        let use_case = use_case(user_store);

        let result = use_case
            .execute(email("a@x.com"), password("wrong-password"))
            .await;
        assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    }
}
