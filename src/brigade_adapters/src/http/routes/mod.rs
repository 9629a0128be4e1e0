//! Axum route handlers for the auth subsystem.
//!
//! Handlers extract request data, call the matching use case, and map
//! typed failures onto HTTP statuses via [`error::AuthApiError`]. Nothing
//! below this layer decides HTTP semantics.

pub mod error;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
pub mod resend_verification;
pub mod verify_email;

pub use error::{AuthApiError, ErrorResponse};
pub use login::login;
pub use logout::logout;
pub use me::me;
pub use refresh::refresh;
pub use register::register;
pub use resend_verification::resend_verification;
pub use verify_email::verify_email;
