use chrono::NaiveDate;
use models::UserRole;
use serde::{Deserialize, Serialize};

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub pass: String,
    pub birthday: NaiveDate,
    #[serde(alias = "adresses")]
    pub address: String,
    #[serde(alias = "phoneNumbers", alias = "phone_numbers")]
    pub phone: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub pass: String,
}

/// Domain user (business view, no password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birthday: NaiveDate,
    pub role: UserRole,
    pub address: String,
    pub phone: String,
    pub technologies: Vec<String>,
}

/// A user together with its stored password hash, as read for login.
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user: AuthUser,
    pub password_hash: String,
}

/// Everything needed to persist a new account; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub birthday: NaiveDate,
    pub role: UserRole,
    pub address: String,
    pub phone: String,
    pub technologies: Vec<String>,
}

/// Login result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnologyView {
    pub id: i32,
    pub name: String,
}

/// Emails are compared and stored trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
