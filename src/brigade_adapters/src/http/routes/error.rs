use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use brigade_application::{
    CurrentUserError, LoginError, LogoutError, RefreshError, RegisterError,
    ResendVerificationError, VerifyEmailError,
};
use brigade_core::UserError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::TokenGateError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every failure the auth routes can surface, with its HTTP mapping.
#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Account email is not verified")]
    AccountNotVerified,

    #[error("Email is already verified")]
    AlreadyVerified,

    #[error("Invalid or expired verification code")]
    InvalidVerificationCode,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing or malformed authorization credentials")]
    InvalidCredentialsFormat,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Access token required")]
    AccessTokenRequired,

    #[error("Refresh token required")]
    RefreshTokenRequired,

    #[error("Please wait before requesting another code")]
    RateLimited,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let status_code = match self {
            AuthApiError::InvalidInput(_)
            | AuthApiError::AccountNotVerified
            | AuthApiError::AlreadyVerified
            | AuthApiError::InvalidVerificationCode => StatusCode::BAD_REQUEST,

            AuthApiError::EmailTaken => StatusCode::CONFLICT,

            AuthApiError::UserNotFound => StatusCode::NOT_FOUND,

            AuthApiError::InvalidCredentials
            | AuthApiError::InvalidCredentialsFormat
            | AuthApiError::InvalidToken
            | AuthApiError::AccessTokenRequired
            | AuthApiError::RefreshTokenRequired => StatusCode::UNAUTHORIZED,

            AuthApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,

            AuthApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<UserError> for AuthApiError {
    fn from(error: UserError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<TokenGateError> for AuthApiError {
    fn from(error: TokenGateError) -> Self {
        match error {
            TokenGateError::InvalidCredentialsFormat => AuthApiError::InvalidCredentialsFormat,
            TokenGateError::InvalidToken => AuthApiError::InvalidToken,
            TokenGateError::AccessTokenRequired => AuthApiError::AccessTokenRequired,
            TokenGateError::RefreshTokenRequired => AuthApiError::RefreshTokenRequired,
            TokenGateError::Store(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<RegisterError> for AuthApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::EmailTaken => AuthApiError::EmailTaken,
            RegisterError::RateLimited => AuthApiError::RateLimited,
            RegisterError::UserStore(e) => AuthApiError::UnexpectedError(e.to_string()),
            RegisterError::CodeStore(e) => AuthApiError::UnexpectedError(e.to_string()),
            RegisterError::Hasher(e) => AuthApiError::UnexpectedError(e.to_string()),
            RegisterError::Codec(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<VerifyEmailError> for AuthApiError {
    fn from(error: VerifyEmailError) -> Self {
        match error {
            VerifyEmailError::UserNotFound => AuthApiError::UserNotFound,
            VerifyEmailError::InvalidCode => AuthApiError::InvalidVerificationCode,
            VerifyEmailError::UserStore(e) => AuthApiError::UnexpectedError(e.to_string()),
            VerifyEmailError::CodeStore(e) => AuthApiError::UnexpectedError(e.to_string()),
            VerifyEmailError::Codec(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UserNotFound => AuthApiError::UserNotFound,
            LoginError::AccountNotVerified => AuthApiError::AccountNotVerified,
            LoginError::InvalidCredentials => AuthApiError::InvalidCredentials,
            LoginError::UserStore(e) => AuthApiError::UnexpectedError(e.to_string()),
            LoginError::Codec(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<RefreshError> for AuthApiError {
    fn from(error: RefreshError) -> Self {
        match error {
            RefreshError::InvalidToken => AuthApiError::InvalidToken,
            RefreshError::Revocation(e) => AuthApiError::UnexpectedError(e.to_string()),
            RefreshError::Codec(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<LogoutError> for AuthApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::Revocation(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<ResendVerificationError> for AuthApiError {
    fn from(error: ResendVerificationError) -> Self {
        match error {
            ResendVerificationError::UserNotFound => AuthApiError::UserNotFound,
            ResendVerificationError::AlreadyVerified => AuthApiError::AlreadyVerified,
            ResendVerificationError::RateLimited => AuthApiError::RateLimited,
            ResendVerificationError::UserStore(e) => AuthApiError::UnexpectedError(e.to_string()),
            ResendVerificationError::CodeStore(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<CurrentUserError> for AuthApiError {
    fn from(error: CurrentUserError) -> Self {
        match error {
            CurrentUserError::UserNotFound => AuthApiError::UserNotFound,
            CurrentUserError::UserStore(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}
