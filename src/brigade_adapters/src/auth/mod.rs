pub mod password_hasher;
pub mod token_codec;
pub mod token_gate;

pub use password_hasher::Argon2Hasher;
pub use token_codec::EncryptedJwtCodec;
pub use token_gate::{TokenGate, TokenGateError};
