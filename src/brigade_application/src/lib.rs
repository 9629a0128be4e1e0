pub mod use_cases;

pub use use_cases::{
    TokenLifetimes, TokenPair,
    current_user::{CurrentUserError, CurrentUserUseCase},
    login::{LoginError, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    refresh::{RefreshError, RefreshUseCase},
    register::{RegisterError, RegisterUseCase, Registration},
    resend_verification::{ResendVerificationError, ResendVerificationUseCase},
    verify_email::{VerifyEmailError, VerifyEmailUseCase},
};
