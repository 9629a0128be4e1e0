//! Composition root for the Brigade auth service: route table, tracing
//! and CORS layers, and the Postgres/Redis bootstrap used by the binary.

pub mod telemetry;

use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use brigade_adapters::config::AllowedOrigins;
use brigade_adapters::http::{
    AuthState,
    routes::{login, logout, me, refresh, register, resend_verification, verify_email},
};
use brigade_adapters::persistence::RedisHandle;
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// The assembled authentication service.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    pub fn new(state: AuthState) -> Self {
        let router = Router::new()
            .route("/auth/register", post(register))
            .route("/auth/verify", post(verify_email))
            .route("/auth/login", post(login))
            .route("/auth/refresh", post(refresh))
            .route("/auth/logout", post(logout))
            .route("/auth/resend-verification", post(resend_verification))
            .route("/auth/me", get(me))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finish the router, optionally restricting CORS to the given
    /// origins. Usable standalone or nested into a larger POS router.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Serve until the listener is closed.
    pub async fn run(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

/// Connection pool plus migrations, as one startup step.
pub async fn configure_postgresql(url: &Secret<String>) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

/// The shared Redis handle backing the revocation and code stores.
/// Connection establishment is deferred to first use.
pub fn configure_redis(url: &str) -> Result<RedisHandle, redis::RedisError> {
    RedisHandle::new(url)
}
