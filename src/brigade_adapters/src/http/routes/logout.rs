use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use brigade_application::LogoutUseCase;
use serde_json::json;

use super::error::AuthApiError;
use crate::http::AuthState;

/// Logout requires a valid refresh token in the `Authorization` header;
/// its token id is blocklisted so it cannot mint further access tokens.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthApiError> {
    let claims = state.refresh_gate().authorize(&headers).await?;

    let use_case = LogoutUseCase::new(state.revocation_store.clone(), state.revocation_ttl_floor);
    use_case.execute(&claims).await?;

    Ok(Json(json!({ "message": "Successfully logged out" })))
}
