use std::sync::Arc;
use std::time::Duration;

use brigade_adapters::auth::{Argon2Hasher, EncryptedJwtCodec};
use brigade_adapters::config::Settings;
use brigade_adapters::email::PostmarkEmailClient;
use brigade_adapters::http::AuthState;
use brigade_adapters::persistence::{
    PostgresUserStore, RedisRevocationStore, RedisVerificationCodeStore,
};
use brigade_core::Email;
use brigade_service::{AuthService, configure_postgresql, configure_redis};
use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;
use secrecy::Secret;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;

    // Setup database connection pool and run migrations
    let pg_pool = configure_postgresql(&settings.postgres.url).await?;

    // Shared Redis handle; the connection is established on first use
    let redis_handle = configure_redis(&settings.redis.url)?;

    // Create stores
    let user_store = Arc::new(PostgresUserStore::new(pg_pool));
    let revocation_store = Arc::new(RedisRevocationStore::new(redis_handle.clone()));
    let code_store = Arc::new(RedisVerificationCodeStore::new(
        redis_handle.clone(),
        settings.auth.verification_code_ttl_seconds,
    ));

    // Create email client
    let http_client = HttpClient::builder()
        .timeout(Duration::from_millis(settings.email_client.timeout_millis))
        .build()?;

    let email_client = Arc::new(PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::try_from(Secret::from(settings.email_client.sender.clone()))?,
        settings.email_client.auth_token.clone(),
        http_client,
    ));

    // Token codec: signing and encryption keys are loaded once, immutable
    let token_codec = Arc::new(EncryptedJwtCodec::new(
        &settings.auth.signing_key,
        &settings.auth.encryption_key,
    )?);

    let state = AuthState {
        user_store,
        revocation_store,
        code_store,
        email_client,
        credential_hasher: Arc::new(Argon2Hasher::new()),
        token_codec,
        lifetimes: settings.token_lifetimes(),
        revocation_ttl_floor: settings.auth.revocation_ttl_seconds,
    };

    let listener = tokio::net::TcpListener::bind(&settings.app.address).await?;
    tracing::info!("Starting brigade auth service...");

    AuthService::new(state)
        .run(listener, settings.auth.allowed_origins())
        .await?;

    // Explicit teardown of the shared store client
    redis_handle.shutdown().await;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
