use std::sync::Arc;

use tracing::instrument;

use crate::auth::domain::{normalize_email, AuthUser, TechnologyView};
use crate::auth::errors::AuthError;
use crate::auth::repository::UserRepository;

/// Read-only views over registered users.
pub struct UserService<R: UserRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Profile of the user registered under `email`.
    #[instrument(skip(self))]
    pub async fn profile(&self, email: &str) -> Result<AuthUser, AuthError> {
        self.repo
            .find_by_email(&normalize_email(email))
            .await?
            .map(|stored| stored.user)
            .ok_or(AuthError::NotFound)
    }

    pub async fn get(&self, id: i32) -> Result<AuthUser, AuthError> {
        self.repo.find_by_id(id).await?.ok_or(AuthError::NotFound)
    }

    /// All known technologies, ordered by name.
    pub async fn technologies(&self) -> Result<Vec<TechnologyView>, AuthError> {
        self.repo.list_technologies().await
    }
}
