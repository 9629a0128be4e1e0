use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

const MIN_PASSWORD_LENGTH: usize = 8;

/// A plaintext password that satisfied the minimum-length policy.
///
/// Only ever held transiently on the way to the credential hasher; the
/// stored representation is always a salted hash.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().chars().count() >= MIN_PASSWORD_LENGTH {
            Ok(Self(value))
        } else {
            Err(UserError::PasswordTooShort)
        }
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
