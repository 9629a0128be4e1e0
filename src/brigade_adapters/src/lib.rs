//! Infrastructure adapters for the Brigade auth subsystem.
//!
//! Everything that touches the outside world lives here: the encrypted
//! token codec and request-time token gate, Postgres and Redis stores and
//! their in-memory test doubles, the email client, configuration loading,
//! and the axum route handlers.

pub mod auth;
pub mod config;
pub mod email;
pub mod http;
pub mod persistence;
