use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// A validated email address.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    /// The part before the `@`, used as the default username at registration.
    pub fn local_part(&self) -> &str {
        let raw = self.0.expose_secret();
        raw.split('@').next().unwrap_or(raw)
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if EMAIL_REGEX.is_match(value.expose_secret()) {
            Ok(Self(value))
        } else {
            Err(UserError::InvalidEmail)
        }
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Email, UserError> {
        Email::try_from(Secret::from(raw.to_owned()))
    }

    #[test]
    fn accepts_plain_addresses() {
        assert!(parse("a@x.com").is_ok());
        assert!(parse("waiter.station-3@brigade.example").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(parse("").is_err());
        assert!(parse("no-at-sign").is_err());
        assert!(parse("two@@x.com").is_err());
        assert!(parse("spaces in@x.com").is_err());
        assert!(parse("missing@tld").is_err());
    }

    #[test]
    fn local_part_is_the_prefix() {
        let email = parse("chef@kitchen.example").unwrap();
        assert_eq!(email.local_part(), "chef");
    }
}
