use brigade_application::TokenLifetimes;
use config::{Config, ConfigError, Environment};
use http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

use super::constants::defaults;

/// Environment-sourced configuration, loaded once at process start and
/// immutable thereafter. Nested fields map to `SECTION__FIELD` variables,
/// e.g. `AUTH__SIGNING_KEY`, `POSTGRES__URL`, `EMAIL_CLIENT__SENDER`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: AppSettings,
    pub auth: AuthSettings,
    pub postgres: PostgresSettings,
    pub redis: RedisSettings,
    pub email_client: EmailClientSettings,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn token_lifetimes(&self) -> TokenLifetimes {
        TokenLifetimes::new(
            self.auth.access_token_ttl_minutes,
            self.auth.refresh_token_ttl_days,
            self.auth.resend_token_ttl_minutes,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// HMAC key for the inner token signature.
    pub signing_key: Secret<String>,
    /// 32-byte key for the outer token encryption; hex, base64 or raw.
    pub encryption_key: Secret<String>,
    #[serde(default = "default_access_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_token_ttl_days: i64,
    #[serde(default = "default_resend_ttl_minutes")]
    pub resend_token_ttl_minutes: i64,
    #[serde(default = "default_revocation_ttl_seconds")]
    pub revocation_ttl_seconds: u64,
    #[serde(default = "default_code_ttl_seconds")]
    pub verification_code_ttl_seconds: u64,
    /// Comma-separated list of allowed CORS origins.
    #[serde(default)]
    pub allowed_origins: Option<String>,
}

impl AuthSettings {
    pub fn allowed_origins(&self) -> Option<AllowedOrigins> {
        self.allowed_origins
            .as_deref()
            .map(AllowedOrigins::parse)
            .filter(|origins| !origins.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    #[serde(default = "default_email_base_url")]
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    #[serde(default = "default_email_timeout_millis")]
    pub timeout_millis: u64,
}

/// CORS origins the service will answer for.
#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .filter_map(|origin| HeaderValue::from_str(origin).ok())
                .collect(),
        )
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.contains(origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn default_address() -> String {
    defaults::APP_ADDRESS.to_owned()
}

fn default_access_ttl_minutes() -> i64 {
    defaults::ACCESS_TOKEN_TTL_MINUTES
}

fn default_refresh_ttl_days() -> i64 {
    defaults::REFRESH_TOKEN_TTL_DAYS
}

fn default_resend_ttl_minutes() -> i64 {
    defaults::RESEND_TOKEN_TTL_MINUTES
}

fn default_revocation_ttl_seconds() -> u64 {
    defaults::REVOCATION_TTL_SECONDS
}

fn default_code_ttl_seconds() -> u64 {
    defaults::VERIFICATION_CODE_TTL_SECONDS
}

fn default_email_base_url() -> String {
    defaults::email_client::BASE_URL.to_owned()
}

fn default_email_timeout_millis() -> u64 {
    defaults::email_client::TIMEOUT_MILLIS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_origins_parse_a_comma_separated_list() {
        let origins = AllowedOrigins::parse("https://pos.example, https://kds.example");
        assert!(origins.contains(&HeaderValue::from_static("https://pos.example")));
        assert!(origins.contains(&HeaderValue::from_static("https://kds.example")));
        assert!(!origins.contains(&HeaderValue::from_static("https://other.example")));
    }

    #[test]
    fn an_empty_list_is_empty() {
        assert!(AllowedOrigins::parse("").is_empty());
        assert!(AllowedOrigins::parse(" , ").is_empty());
    }
}
