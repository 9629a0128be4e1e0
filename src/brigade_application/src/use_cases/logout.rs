use brigade_core::{RevocationStore, RevocationStoreError, SessionClaims};
use chrono::Utc;

#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("{0}")]
    Revocation(#[from] RevocationStoreError),
}

/// Logout use case - blocklists the refresh token's id.
///
/// Access tokens issued before logout remain valid until their own
/// expiry; logout only blocks future refreshes.
pub struct LogoutUseCase<R>
where
    R: RevocationStore,
{
    revocation_store: R,
    revocation_ttl_floor: u64,
}

impl<R> LogoutUseCase<R>
where
    R: RevocationStore,
{
    pub fn new(revocation_store: R, revocation_ttl_floor: u64) -> Self {
        Self {
            revocation_store,
            revocation_ttl_floor,
        }
    }

    /// The marker must outlive the token: TTL is the remaining token
    /// lifetime, but never below the configured floor.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute(&self, claims: &SessionClaims) -> Result<(), LogoutError> {
        let remaining = (claims.expires_at() - Utc::now()).num_seconds().max(0) as u64;
        let ttl = remaining.max(self.revocation_ttl_floor);

        self.revocation_store.revoke(claims.jti, ttl).await?;
        Ok(())
    }
}
