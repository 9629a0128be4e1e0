use axum::{Json, extract::State, response::IntoResponse};
use brigade_application::VerifyEmailUseCase;
use brigade_core::Email;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::error::AuthApiError;
use crate::http::AuthState;

#[derive(Deserialize)]
pub struct VerifyEmailRequest {
    pub email: Secret<String>,
    pub code: String,
}

#[derive(Serialize, Deserialize)]
pub struct VerifyEmailResponse {
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email(
    State(state): State<AuthState>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    let email = Email::try_from(request.email)?;

    let use_case = VerifyEmailUseCase::new(
        state.user_store.clone(),
        state.code_store.clone(),
        state.token_codec.clone(),
        state.lifetimes.clone(),
    );

    let pair = use_case.execute(email, &request.code).await?;

    Ok(Json(VerifyEmailResponse {
        message: "Email verified successfully".to_owned(),
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: "bearer".to_owned(),
    }))
}
