use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use brigade_application::RegisterUseCase;
use brigade_core::{Email, Password};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::AuthApiError;
use crate::http::AuthState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub message: String,
    pub verification_token: String,
    pub token_type: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register(
    State(state): State<AuthState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = RegisterUseCase::new(
        state.user_store.clone(),
        state.code_store.clone(),
        state.email_client.clone(),
        state.token_codec.clone(),
        state.credential_hasher.clone(),
        state.lifetimes.clone(),
    );

    let registration = use_case.execute(email, password).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: registration.user_id,
            message: "Verification email sent".to_owned(),
            verification_token: registration.verification_token,
            token_type: "bearer".to_owned(),
        }),
    ))
}
