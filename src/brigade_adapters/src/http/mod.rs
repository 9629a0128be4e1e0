pub mod routes;

use std::sync::Arc;

use brigade_application::TokenLifetimes;
use brigade_core::{
    CredentialHasher, EmailClient, RevocationStore, TokenCodec, UserStore, VerificationCodeStore,
};

use crate::auth::TokenGate;

/// Shared handler state: the assembled ports plus token issuance
/// parameters, injected once at startup.
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<dyn UserStore>,
    pub revocation_store: Arc<dyn RevocationStore>,
    pub code_store: Arc<dyn VerificationCodeStore>,
    pub email_client: Arc<dyn EmailClient>,
    pub credential_hasher: Arc<dyn CredentialHasher>,
    pub token_codec: Arc<dyn TokenCodec>,
    pub lifetimes: TokenLifetimes,
    pub revocation_ttl_floor: u64,
}

impl AuthState {
    pub fn access_gate(&self) -> TokenGate<Arc<dyn TokenCodec>, Arc<dyn RevocationStore>> {
        TokenGate::access(self.token_codec.clone(), self.revocation_store.clone())
    }

    pub fn refresh_gate(&self) -> TokenGate<Arc<dyn TokenCodec>, Arc<dyn RevocationStore>> {
        TokenGate::refresh(self.token_codec.clone(), self.revocation_store.clone())
    }
}
