//! # Brigade - Restaurant POS Authentication Service Library
//!
//! This is a facade crate that re-exports all public APIs from the auth
//! subsystem components of the Brigade point-of-sale backend.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `SessionClaims`, etc.
//! - **Port traits**: `UserStore`, `RevocationStore`, `VerificationCodeStore`,
//!   `EmailClient`, `CredentialHasher`, `TokenCodec`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `RedisRevocationStore`,
//!   `EncryptedJwtCodec`, `PostmarkEmailClient`, etc.
//! - **Service**: `AuthService` - the assembled HTTP service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use brigade_core::*;
}

// Re-export most commonly used core types at the root level
pub use brigade_core::{
    Email, Password, Role, SessionClaims, Subject, TokenClass, User, UserError, UserProfile,
    VerificationCode,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use brigade_core::{
        CredentialHasher, CredentialHasherError, EmailClient, RevocationStore,
        RevocationStoreError, TokenCodec, TokenCodecError, UserStore, UserStoreError,
        VerificationCodeStore, VerificationCodeStoreError,
    };
}

// Re-export port traits at root level
pub use brigade_core::{
    CredentialHasher, EmailClient, RevocationStore, TokenCodec, UserStore, VerificationCodeStore,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use brigade_application::*;
}

// Re-export use cases at root level
pub use brigade_application::{
    CurrentUserUseCase, LoginUseCase, LogoutUseCase, RefreshUseCase, RegisterUseCase,
    ResendVerificationUseCase, TokenLifetimes, TokenPair, VerifyEmailUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers and state
    pub mod http {
        pub use brigade_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use brigade_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use brigade_adapters::email::*;
    }

    /// Token codec, token gate and password hashing
    pub mod auth {
        pub use brigade_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use brigade_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use brigade_adapters::{
    auth::{Argon2Hasher, EncryptedJwtCodec, TokenGate, TokenGateError},
    email::{MockEmailClient, PostmarkEmailClient},
    http::AuthState,
    persistence::{
        HashMapUserStore, MemoryRevocationStore, MemoryVerificationCodeStore, PostgresUserStore,
        RedisHandle, RedisRevocationStore, RedisVerificationCodeStore,
    },
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use brigade_service::AuthService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
