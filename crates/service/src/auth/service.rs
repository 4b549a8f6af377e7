use std::sync::Arc;

use chrono::Utc;
use models::UserRole;
use tracing::{debug, info, instrument, warn};

use super::domain::{normalize_email, AuthSession, AuthUser, LoginInput, NewAccount, RegisterInput};
use super::errors::AuthError;
use super::identity::UserDetails;
use super::password::{hash_password, verify_password};
use super::repository::UserRepository;
use super::token::{Claims, TokenKeys};
use super::validation;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl From<&configs::AuthSettings> for AuthConfig {
    fn from(s: &configs::AuthSettings) -> Self {
        Self { jwt_secret: s.jwt_secret.clone(), token_ttl_secs: s.jwt_expiration_secs }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: UserRepository + ?Sized> {
    repo: Arc<R>,
    keys: TokenKeys,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, keys: TokenKeys::new(&cfg.jwt_secret, cfg.token_ttl_secs) }
    }

    pub fn keys(&self) -> &TokenKeys {
        &self.keys
    }

    /// Register a new user with a hashed password and the `USER` role.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use chrono::NaiveDate;
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockUserRepository};
    /// use service::auth::domain::RegisterInput;
    /// let repo = Arc::new(MockUserRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_secs: 3600 });
    /// let input = RegisterInput {
    ///     first_name: "Ana".into(),
    ///     last_name: "Pop".into(),
    ///     email: "Ana@Example.com".into(),
    ///     pass: "Secret123".into(),
    ///     birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
    ///     address: "Main street 1".into(),
    ///     phone: "0712345678".into(),
    ///     technologies: vec!["Rust".into()],
    /// };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "ana@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        validation::validate_registration(&input, Utc::now().date_naive())?;
        let email = normalize_email(&input.email);
        if let Some(existing) = self.repo.find_by_email(&email).await? {
            debug!("user exists: {}", existing.user.email);
            return Err(AuthError::Conflict);
        }

        let password_hash = hash_password(&input.pass)?;
        let mut technologies: Vec<String> = input.technologies.iter().map(|t| t.trim().to_string()).collect();
        technologies.sort();
        technologies.dedup();

        let user = self
            .repo
            .create_user(NewAccount {
                first_name: input.first_name.trim().to_string(),
                last_name: input.last_name.trim().to_string(),
                email,
                password_hash,
                birthday: input.birthday,
                role: UserRole::User,
                address: input.address.trim().to_string(),
                phone: input.phone.trim().to_string(),
                technologies,
            })
            .await?;
        info!(user_id = user.id, email = %user.email, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and issue a bearer token.
    ///
    /// Unknown email and wrong password are both `Unauthorized`.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        validation::validate_login(&input)?;
        let email = normalize_email(&input.email);
        let stored = self.repo.find_by_email(&email).await?.ok_or(AuthError::Unauthorized)?;

        if !verify_password(&input.pass, &stored.password_hash)? {
            warn!(user_id = stored.user.id, "password mismatch");
            return Err(AuthError::Unauthorized);
        }

        let issued = self.keys.issue(&stored.user)?;
        info!(user_id = stored.user.id, "user_logged_in");
        Ok(AuthSession { user: stored.user, token: issued.token, expires_in: issued.expires_in })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.keys.verify(token)
    }

    /// Identity for `username` (the email), as consumed by the security filter.
    pub async fn load_user_by_username(&self, username: &str) -> Result<UserDetails, AuthError> {
        let stored = self
            .repo
            .find_by_email(&normalize_email(username))
            .await?
            .ok_or(AuthError::NotFound)?;
        Ok(UserDetails::from_user(&stored.user))
    }

    /// Verify a bearer token and resolve it to the current identity.
    ///
    /// A token whose subject no longer exists, or now belongs to a different
    /// user id, is `Unauthorized`.
    #[instrument(skip_all)]
    pub async fn authenticate(&self, token: &str) -> Result<UserDetails, AuthError> {
        let claims = self.keys.verify(token)?;
        let stored = self
            .repo
            .find_by_email(&normalize_email(&claims.sub))
            .await?
            .ok_or(AuthError::Unauthorized)?;
        if stored.user.id != claims.uid {
            debug!(sub = %claims.sub, "token uid does not match stored user");
            return Err(AuthError::Unauthorized);
        }
        Ok(UserDetails::from_user(&stored.user))
    }
}
