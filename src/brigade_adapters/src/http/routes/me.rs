use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use brigade_application::CurrentUserUseCase;

use super::error::AuthApiError;
use crate::http::AuthState;

/// Resolve the access token's subject to a user profile.
#[tracing::instrument(name = "Current user", skip_all)]
pub async fn me(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthApiError> {
    let claims = state.access_gate().authorize(&headers).await?;

    let use_case = CurrentUserUseCase::new(state.user_store.clone());
    let profile = use_case.execute(claims.user.id).await?;

    Ok(Json(profile))
}
