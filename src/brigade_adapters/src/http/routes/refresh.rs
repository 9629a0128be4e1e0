use axum::{Json, extract::State, response::IntoResponse};
use brigade_application::RefreshUseCase;
use serde::Deserialize;

use super::error::AuthApiError;
use super::login::TokenResponse;
use crate::http::AuthState;

#[derive(Deserialize)]
pub struct TokenRefreshRequest {
    pub refresh_token: String,
}

#[tracing::instrument(name = "Refresh", skip_all)]
pub async fn refresh(
    State(state): State<AuthState>,
    Json(request): Json<TokenRefreshRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    let use_case = RefreshUseCase::new(
        state.token_codec.clone(),
        state.revocation_store.clone(),
        state.lifetimes.clone(),
    );

    let pair = use_case.execute(&request.refresh_token).await?;

    Ok(Json(TokenResponse::bearer(pair)))
}
