use async_trait::async_trait;

use super::domain::{AuthUser, NewAccount, StoredUser, TechnologyView};
use super::errors::AuthError;

/// Repository abstraction for user persistence.
///
/// Emails passed in are already normalized by the service layer.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, AuthError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<AuthUser>, AuthError>;

    /// Insert the account and link its technologies in one unit of work.
    /// Unknown technology names are created.
    async fn create_user(&self, account: NewAccount) -> Result<AuthUser, AuthError>;

    async fn list_technologies(&self) -> Result<Vec<TechnologyView>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Inner {
        users: HashMap<String, StoredUser>, // key: email
        technologies: BTreeMap<String, i32>, // key: name
        next_user_id: i32,
    }

    #[derive(Default)]
    pub struct MockUserRepository {
        inner: Mutex<Inner>,
    }

    impl MockUserRepository {
        fn lock(&self) -> Result<MutexGuard<'_, Inner>, AuthError> {
            self.inner.lock().map_err(|_| AuthError::Repository("mock repository poisoned".into()))
        }

        /// Remove a user, as if deleted out of band.
        pub fn remove(&self, email: &str) -> Result<(), AuthError> {
            self.lock()?.users.remove(email);
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, AuthError> {
            Ok(self.lock()?.users.get(email).cloned())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<AuthUser>, AuthError> {
            Ok(self.lock()?.users.values().find(|s| s.user.id == id).map(|s| s.user.clone()))
        }

        async fn create_user(&self, account: NewAccount) -> Result<AuthUser, AuthError> {
            let mut inner = self.lock()?;
            if inner.users.contains_key(&account.email) {
                return Err(AuthError::Conflict);
            }
            let mut technologies = Vec::new();
            for name in &account.technologies {
                let name = name.trim().to_string();
                let next = inner.technologies.len() as i32 + 1;
                inner.technologies.entry(name.clone()).or_insert(next);
                if !technologies.contains(&name) {
                    technologies.push(name);
                }
            }
            technologies.sort();
            inner.next_user_id += 1;
            let user = AuthUser {
                id: inner.next_user_id,
                first_name: account.first_name,
                last_name: account.last_name,
                email: account.email.clone(),
                birthday: account.birthday,
                role: account.role,
                address: account.address,
                phone: account.phone,
                technologies,
            };
            inner.users.insert(account.email, StoredUser { user: user.clone(), password_hash: account.password_hash });
            Ok(user)
        }

        async fn list_technologies(&self) -> Result<Vec<TechnologyView>, AuthError> {
            Ok(self
                .lock()?
                .technologies
                .iter()
                .map(|(name, id)| TechnologyView { id: *id, name: name.clone() })
                .collect())
        }
    }
}
