use std::sync::Arc;

use service::auth::repository::UserRepository;
use service::auth::{AuthConfig, AuthService};
use service::user_service::UserService;

/// Shared handler state. Services hold the repository behind a trait object so
/// the same router runs against postgres or the in-memory mock.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<dyn UserRepository>>,
    pub users: Arc<UserService<dyn UserRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn UserRepository>, cfg: AuthConfig) -> Self {
        Self {
            auth: Arc::new(AuthService::new(repo.clone(), cfg)),
            users: Arc::new(UserService::new(repo)),
        }
    }
}
