use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{email::Email, role::Role};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
}

/// A persisted identity record.
///
/// The auth subsystem reads the password hash and owns the verified flag;
/// the rest of the record belongs to the identity collaborator.
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    email: Email,
    username: Option<String>,
    password_hash: Secret<String>,
    email_verified: bool,
    role: Role,
}

impl User {
    /// A freshly registered, unverified customer. Username defaults to the
    /// email local part.
    pub fn unverified(email: Email, password_hash: Secret<String>) -> Self {
        let username = Some(email.local_part().to_owned());
        Self {
            id: Uuid::new_v4(),
            email,
            username,
            password_hash,
            email_verified: false,
            role: Role::customer(),
        }
    }

    /// Rehydrate a record loaded from storage.
    pub fn restore(
        id: Uuid,
        email: Email,
        username: Option<String>,
        password_hash: Secret<String>,
        email_verified: bool,
        role: Role,
    ) -> Self {
        Self {
            id,
            email,
            username,
            password_hash,
            email_verified,
            role,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }

    pub fn email_verified(&self) -> bool {
        self.email_verified
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn mark_verified(&mut self) {
        self.email_verified = true;
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.as_ref().expose_secret().clone(),
            email_verified: self.email_verified,
            role: self.role.clone(),
        }
    }
}

/// The identity view handed to authenticated callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: String,
    pub email_verified: bool,
    #[serde(flatten)]
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(raw: &str) -> Email {
        Email::try_from(Secret::from(raw.to_owned())).unwrap()
    }

    #[test]
    fn unverified_users_start_as_customers() {
        let user = User::unverified(email("a@x.com"), Secret::from("hash".to_owned()));
        assert!(!user.email_verified());
        assert_eq!(user.role(), &Role::customer());
        assert_eq!(user.username(), Some("a"));
    }

    #[test]
    fn mark_verified_flips_the_flag() {
        let mut user = User::unverified(email("a@x.com"), Secret::from("hash".to_owned()));
        user.mark_verified();
        assert!(user.email_verified());
    }

    #[test]
    fn profile_flattens_the_role_tag() {
        let user = User::unverified(email("a@x.com"), Secret::from("hash".to_owned()));
        let json = serde_json::to_value(user.profile()).unwrap();
        assert_eq!(json["role"], "customer");
        assert_eq!(json["email"], "a@x.com");
    }
}
