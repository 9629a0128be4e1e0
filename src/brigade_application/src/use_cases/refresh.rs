use brigade_core::{
    RevocationStore, RevocationStoreError, Subject, TokenClass, TokenCodec, TokenCodecError,
};

use super::{TokenLifetimes, TokenPair};

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("{0}")]
    Revocation(#[from] RevocationStoreError),
    #[error("{0}")]
    Codec(#[from] TokenCodecError),
}

/// Refresh use case - mints a new access token from a live refresh token.
///
/// Refresh tokens are not rotated: the presented token is echoed back in
/// the response pair.
pub struct RefreshUseCase<C, R>
where
    C: TokenCodec,
    R: RevocationStore,
{
    token_codec: C,
    revocation_store: R,
    lifetimes: TokenLifetimes,
}

impl<C, R> RefreshUseCase<C, R>
where
    C: TokenCodec,
    R: RevocationStore,
{
    pub fn new(token_codec: C, revocation_store: R, lifetimes: TokenLifetimes) -> Self {
        Self {
            token_codec,
            revocation_store,
            lifetimes,
        }
    }

    /// Decode failure, a revoked token id and a non-refresh token all
    /// collapse to `InvalidToken`.
    #[tracing::instrument(name = "RefreshUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: &str) -> Result<TokenPair, RefreshError> {
        let claims = self
            .token_codec
            .decode(refresh_token)
            .ok_or(RefreshError::InvalidToken)?;

        if self.revocation_store.is_revoked(claims.jti).await? {
            return Err(RefreshError::InvalidToken);
        }

        if claims.class() != TokenClass::Refresh {
            return Err(RefreshError::InvalidToken);
        }

        let subject = Subject::new(claims.user.id, claims.user.email.clone());
        let access_token =
            self.token_codec
                .issue(&subject, self.lifetimes.access, TokenClass::Access)?;

        Ok(TokenPair {
            access_token,
            refresh_token: refresh_token.to_owned(),
        })
    }
}
