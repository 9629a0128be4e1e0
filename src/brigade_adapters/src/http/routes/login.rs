use axum::{Json, extract::State, response::IntoResponse};
use brigade_application::LoginUseCase;
use brigade_core::{Email, Password};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::error::AuthApiError;
use crate::http::AuthState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub(crate) fn bearer(pair: brigade_application::TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "bearer".to_owned(),
        }
    }
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AuthState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = LoginUseCase::new(
        state.user_store.clone(),
        state.token_codec.clone(),
        state.credential_hasher.clone(),
        state.lifetimes.clone(),
    );

    let pair = use_case.execute(email, password).await?;

    Ok(Json(TokenResponse::bearer(pair)))
}
