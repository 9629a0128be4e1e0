use rand::Rng;

/// A 6-digit, zero-padded email verification code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Generate a fresh code, uniform over 000000-999999.
    pub fn random() -> Self {
        let value: u32 = rand::rng().random_range(0..1_000_000);
        Self(format!("{value:06}"))
    }

    /// Parse a stored representation; `None` for anything that is not
    /// exactly six ASCII digits.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == 6 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_owned()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
