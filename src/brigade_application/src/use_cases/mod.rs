pub mod current_user;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod resend_verification;
pub mod verify_email;

#[cfg(test)]
pub(crate) mod test_support;

use brigade_core::{Email, EmailClient, Subject, TokenClass, TokenCodec, TokenCodecError};
use chrono::Duration;

/// Token lifetimes used at issuance, loaded once from configuration.
#[derive(Debug, Clone)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
    /// Lifetime of the resend-only token handed out at registration.
    pub resend: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(60),
            refresh: Duration::days(7),
            resend: Duration::minutes(15),
        }
    }
}

impl TokenLifetimes {
    pub fn new(access_minutes: i64, refresh_days: i64, resend_minutes: i64) -> Self {
        Self {
            access: Duration::minutes(access_minutes),
            refresh: Duration::days(refresh_days),
            resend: Duration::minutes(resend_minutes),
        }
    }
}

/// An access/refresh token pair as returned to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub(crate) fn issue_token_pair<C: TokenCodec>(
    codec: &C,
    subject: &Subject,
    lifetimes: &TokenLifetimes,
) -> Result<TokenPair, TokenCodecError> {
    let access_token = codec.issue(subject, lifetimes.access, TokenClass::Access)?;
    let refresh_token = codec.issue(subject, lifetimes.refresh, TokenClass::Refresh)?;
    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Fire-and-forget email dispatch: the HTTP response must not wait for
/// delivery, failures are logged and never retried.
pub(crate) fn dispatch_email<E>(client: E, recipient: Email, subject: String, content: String)
where
    E: EmailClient + 'static,
{
    tokio::spawn(async move {
        if let Err(error) = client.send_email(&recipient, &subject, &content).await {
            tracing::warn!(error = %error, "failed to send email");
        }
    });
}
