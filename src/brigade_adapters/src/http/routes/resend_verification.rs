use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use brigade_application::ResendVerificationUseCase;
use serde_json::json;

use super::error::AuthApiError;
use crate::http::AuthState;

/// Issue a fresh verification code for a still-unverified account.
///
/// Gated by the access-class token gate; the resend-only token handed out
/// at registration passes it.
#[tracing::instrument(name = "Resend verification", skip_all)]
pub async fn resend_verification(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthApiError> {
    let claims = state.access_gate().authorize(&headers).await?;

    let use_case = ResendVerificationUseCase::new(
        state.user_store.clone(),
        state.code_store.clone(),
        state.email_client.clone(),
    );
    use_case.execute(claims.user.id).await?;

    Ok(Json(
        json!({ "message": "Verification email resent successfully" }),
    ))
}
