use brigade_core::{UserProfile, UserStore, UserStoreError};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CurrentUserError {
    #[error("User not found")]
    UserNotFound,
    #[error("User store error: {0}")]
    UserStore(UserStoreError),
}

impl From<UserStoreError> for CurrentUserError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => CurrentUserError::UserNotFound,
            other => CurrentUserError::UserStore(other),
        }
    }
}

/// Current user use case - resolves the token subject to a profile.
pub struct CurrentUserUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> CurrentUserUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "CurrentUserUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: Uuid) -> Result<UserProfile, CurrentUserError> {
        let user = self
            .user_store
            .find_by_id(user_id)
            .await?
            .ok_or(CurrentUserError::UserNotFound)?;

        Ok(user.profile())
    }
}
