//! Identity handed to the HTTP layer once a bearer token has been accepted.
//!
//! [`UserDetails`] adapts a persisted user to the [`Principal`] contract the
//! security filter works with: the email is the username, the password is
//! never exposed, and the role becomes a single granted authority.

use serde::{Deserialize, Serialize};

use super::domain::AuthUser;

/// A granted authority such as `ROLE_USER`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the security layer needs to know about an authenticated identity.
pub trait Principal {
    fn username(&self) -> &str;
    fn password(&self) -> Option<&str>;
    fn authorities(&self) -> &[Authority];
    fn is_account_non_expired(&self) -> bool;
    fn is_account_non_locked(&self) -> bool;
    fn is_credentials_non_expired(&self) -> bool;
    fn is_enabled(&self) -> bool;

    /// All account status flags allow authentication.
    fn is_usable(&self) -> bool {
        self.is_enabled()
            && self.is_account_non_expired()
            && self.is_account_non_locked()
            && self.is_credentials_non_expired()
    }

    fn has_authority(&self, name: &str) -> bool {
        self.authorities().iter().any(|a| a.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    email: String,
    authorities: Vec<Authority>,
}

impl UserDetails {
    pub fn new(email: impl Into<String>, authorities: Vec<Authority>) -> Self {
        Self { email: email.into(), authorities }
    }

    pub fn from_user(user: &AuthUser) -> Self {
        Self::new(user.email.clone(), vec![Authority::new(user.role.authority())])
    }
}

impl Principal for UserDetails {
    fn username(&self) -> &str {
        &self.email
    }

    fn password(&self) -> Option<&str> {
        None
    }

    fn authorities(&self) -> &[Authority] {
        &self.authorities
    }

    fn is_account_non_expired(&self) -> bool {
        true
    }

    fn is_account_non_locked(&self) -> bool {
        true
    }

    fn is_credentials_non_expired(&self) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use models::UserRole;

    fn user(role: UserRole) -> AuthUser {
        AuthUser {
            id: 7,
            first_name: "Ana".into(),
            last_name: "Pop".into(),
            email: "ana@example.com".into(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            role,
            address: "Main street 1".into(),
            phone: "0712345678".into(),
            technologies: vec![],
        }
    }

    #[test]
    fn username_is_email_and_password_hidden() {
        let details = UserDetails::from_user(&user(UserRole::User));
        assert_eq!(details.username(), "ana@example.com");
        assert_eq!(details.password(), None);
    }

    #[test]
    fn role_becomes_single_authority() {
        let details = UserDetails::from_user(&user(UserRole::Admin));
        assert_eq!(details.authorities(), &[Authority::new("ROLE_ADMIN")]);
        assert!(details.has_authority("ROLE_ADMIN"));
        assert!(!details.has_authority("ROLE_USER"));
    }

    #[test]
    fn account_flags_are_always_true() {
        let details = UserDetails::from_user(&user(UserRole::User));
        assert!(details.is_account_non_expired());
        assert!(details.is_account_non_locked());
        assert!(details.is_credentials_non_expired());
        assert!(details.is_enabled());
        assert!(details.is_usable());
    }

    #[test]
    fn serializes_without_password() {
        let json = serde_json::to_value(UserDetails::from_user(&user(UserRole::User))).unwrap();
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["authorities"][0], "ROLE_USER");
        assert!(json.get("password").is_none());
    }
}
