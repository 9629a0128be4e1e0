pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    password::Password,
    role::Role,
    session::{SessionClaims, Subject, TokenClass},
    user::{User, UserError, UserProfile},
    verification_code::VerificationCode,
};

pub use ports::{
    repositories::{
        RevocationStore, RevocationStoreError, UserStore, UserStoreError, VerificationCodeStore,
        VerificationCodeStoreError,
    },
    services::{
        CredentialHasher, CredentialHasherError, EmailClient, TokenCodec, TokenCodecError,
    },
};
