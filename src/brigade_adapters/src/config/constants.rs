/// Minimum interval between verification-code issuances for one address.
/// Fixed by design, not configurable.
pub const COOLDOWN_SECONDS: u64 = 60;

// Key prefixes to prevent collisions and organize data in the shared store
pub const VERIFICATION_CODE_KEY_PREFIX: &str = "verify:";
pub const COOLDOWN_KEY_PREFIX: &str = "cooldown:";
pub const REVOKED_TOKEN_KEY_PREFIX: &str = "revoked:";

pub mod defaults {
    pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 60;
    pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;
    pub const RESEND_TOKEN_TTL_MINUTES: i64 = 15;
    pub const REVOCATION_TTL_SECONDS: u64 = 900;
    pub const VERIFICATION_CODE_TTL_SECONDS: u64 = 300;

    pub const APP_ADDRESS: &str = "0.0.0.0:3000";

    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT_MILLIS: u64 = 10_000;
    }
}
