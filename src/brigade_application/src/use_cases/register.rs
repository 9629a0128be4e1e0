use brigade_core::{
    CredentialHasher, CredentialHasherError, Email, EmailClient, Password, Subject, TokenClass,
    TokenCodec, TokenCodecError, UserStore, UserStoreError, VerificationCodeStore,
    VerificationCodeStoreError,
};
use secrecy::ExposeSecret;
use uuid::Uuid;

use super::{TokenLifetimes, dispatch_email};

/// Outcome of a successful registration: the pending identity and a
/// short-lived resend-only token for driving verification resends.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user_id: Uuid,
    pub verification_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Email already registered")]
    EmailTaken,
    #[error("Please wait before requesting another code")]
    RateLimited,
    #[error("User store error: {0}")]
    UserStore(UserStoreError),
    #[error("Verification code store error: {0}")]
    CodeStore(VerificationCodeStoreError),
    #[error("{0}")]
    Hasher(#[from] CredentialHasherError),
    #[error("{0}")]
    Codec(#[from] TokenCodecError),
}

impl From<UserStoreError> for RegisterError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::EmailTaken => RegisterError::EmailTaken,
            other => RegisterError::UserStore(other),
        }
    }
}

impl From<VerificationCodeStoreError> for RegisterError {
    fn from(error: VerificationCodeStoreError) -> Self {
        match error {
            VerificationCodeStoreError::RateLimited => RegisterError::RateLimited,
            other => RegisterError::CodeStore(other),
        }
    }
}

/// Register use case - creates an unverified identity and kicks off the
/// email verification workflow.
pub struct RegisterUseCase<U, V, E, C, H>
where
    U: UserStore,
    V: VerificationCodeStore,
    E: EmailClient + Clone + 'static,
    C: TokenCodec,
    H: CredentialHasher,
{
    user_store: U,
    code_store: V,
    email_client: E,
    token_codec: C,
    hasher: H,
    lifetimes: TokenLifetimes,
}

impl<U, V, E, C, H> RegisterUseCase<U, V, E, C, H>
where
    U: UserStore,
    V: VerificationCodeStore,
    E: EmailClient + Clone + 'static,
    C: TokenCodec,
    H: CredentialHasher,
{
    pub fn new(
        user_store: U,
        code_store: V,
        email_client: E,
        token_codec: C,
        hasher: H,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            user_store,
            code_store,
            email_client,
            token_codec,
            hasher,
            lifetimes,
        }
    }

    /// Execute the register use case.
    ///
    /// The verification code is issued before the identity is created so a
    /// cooldown hit aborts the whole registration. The verification email
    /// is dispatched in the background after the response is assembled.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<Registration, RegisterError> {
        if self.user_store.find_by_email(&email).await?.is_some() {
            return Err(RegisterError::EmailTaken);
        }

        let password_hash = self.hasher.hash(&password).await?;
        let code = self.code_store.issue(&email).await?;

        let user = self
            .user_store
            .create_unverified(email.clone(), password_hash)
            .await?;

        let subject = Subject::resend_only(user.id(), email.as_ref().expose_secret().clone());
        let verification_token =
            self.token_codec
                .issue(&subject, self.lifetimes.resend, TokenClass::Access)?;

        dispatch_email(
            self.email_client.clone(),
            user.email().clone(),
            "Verify Your Email".to_owned(),
            format!("Your verification code is: {}", code.as_str()),
        );

        Ok(Registration {
            user_id: user.id(),
            verification_token,
        })
    }
}
