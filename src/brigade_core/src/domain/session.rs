use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Expected token class at a gate, and the class recorded in claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Access,
    Refresh,
}

/// The identity a token speaks for.
///
/// The resend-only marker rides inside the subject: the token issued at
/// registration may only be used to drive verification resends and is not
/// a full session credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub resend_only: bool,
}

impl Subject {
    pub fn new(id: Uuid, email: String) -> Self {
        Self {
            id,
            email,
            resend_only: false,
        }
    }

    pub fn resend_only(id: Uuid, email: String) -> Self {
        Self {
            id,
            email,
            resend_only: true,
        }
    }
}

/// Claims carried inside the encrypted token blob. Never persisted.
///
/// A decoded token is trusted only if the signature verified, `exp` is in
/// the future, and `jti` is absent from the revocation store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user: Subject,
    pub exp: i64,
    pub jti: Uuid,
    pub refresh: bool,
}

impl SessionClaims {
    /// Build claims for a fresh token: new `jti`, expiry `ttl` from now.
    pub fn new(user: Subject, ttl: Duration, class: TokenClass) -> Self {
        Self {
            user,
            exp: (Utc::now() + ttl).timestamp(),
            jti: Uuid::new_v4(),
            refresh: class == TokenClass::Refresh,
        }
    }

    pub fn class(&self) -> TokenClass {
        if self.refresh {
            TokenClass::Refresh
        } else {
            TokenClass::Access
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> Subject {
        Subject::new(Uuid::new_v4(), "a@x.com".to_owned())
    }

    #[test]
    fn fresh_claims_carry_a_unique_jti() {
        let a = SessionClaims::new(subject(), Duration::minutes(60), TokenClass::Access);
        let b = SessionClaims::new(subject(), Duration::minutes(60), TokenClass::Access);
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn class_follows_the_refresh_flag() {
        let access = SessionClaims::new(subject(), Duration::minutes(60), TokenClass::Access);
        let refresh = SessionClaims::new(subject(), Duration::days(7), TokenClass::Refresh);
        assert_eq!(access.class(), TokenClass::Access);
        assert_eq!(refresh.class(), TokenClass::Refresh);
    }

    #[test]
    fn resend_only_defaults_to_false_on_the_wire() {
        let json = serde_json::json!({
            "user": { "id": Uuid::new_v4(), "email": "a@x.com" },
            "exp": 4_102_444_800i64,
            "jti": Uuid::new_v4(),
            "refresh": false,
        });
        let claims: SessionClaims = serde_json::from_value(json).unwrap();
        assert!(!claims.user.resend_only);
    }
}
