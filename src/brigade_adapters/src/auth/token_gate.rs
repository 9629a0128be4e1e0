use brigade_core::{
    RevocationStore, RevocationStoreError, SessionClaims, TokenClass, TokenCodec,
};
use http::{HeaderMap, header};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenGateError {
    #[error("Missing or malformed authorization credentials")]
    InvalidCredentialsFormat,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Access token required")]
    AccessTokenRequired,
    #[error("Refresh token required")]
    RefreshTokenRequired,
    #[error("{0}")]
    Store(#[from] RevocationStoreError),
}

/// Request-time bearer-token gate, parameterized by the expected token
/// class. Stateless per call; the only shared state it consults is the
/// revocation store.
pub struct TokenGate<C, R>
where
    C: TokenCodec,
    R: RevocationStore,
{
    token_codec: C,
    revocation_store: R,
    expected: TokenClass,
}

impl<C, R> TokenGate<C, R>
where
    C: TokenCodec,
    R: RevocationStore,
{
    pub fn access(token_codec: C, revocation_store: R) -> Self {
        Self {
            token_codec,
            revocation_store,
            expected: TokenClass::Access,
        }
    }

    pub fn refresh(token_codec: C, revocation_store: R) -> Self {
        Self {
            token_codec,
            revocation_store,
            expected: TokenClass::Refresh,
        }
    }

    /// Extract the bearer credential from the `Authorization` header and
    /// run it through [`Self::check_token`].
    #[tracing::instrument(name = "TokenGate::authorize", skip_all)]
    pub async fn authorize(&self, headers: &HeaderMap) -> Result<SessionClaims, TokenGateError> {
        let token = extract_bearer(headers)?;
        self.check_token(token).await
    }

    /// Decode, reject revoked token ids, and enforce the expected class.
    /// Used directly for flows that carry the token in the request body.
    pub async fn check_token(&self, token: &str) -> Result<SessionClaims, TokenGateError> {
        let claims = self
            .token_codec
            .decode(token)
            .ok_or(TokenGateError::InvalidToken)?;

        if self.revocation_store.is_revoked(claims.jti).await? {
            return Err(TokenGateError::InvalidToken);
        }

        if claims.class() != self.expected {
            return Err(match self.expected {
                TokenClass::Access => TokenGateError::AccessTokenRequired,
                TokenClass::Refresh => TokenGateError::RefreshTokenRequired,
            });
        }

        Ok(claims)
    }
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, TokenGateError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(TokenGateError::InvalidCredentialsFormat)?;
    let value = value
        .to_str()
        .map_err(|_| TokenGateError::InvalidCredentialsFormat)?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or(TokenGateError::InvalidCredentialsFormat)?
        .trim();
    if token.is_empty() {
        return Err(TokenGateError::InvalidCredentialsFormat);
    }
    Ok(token)
}
