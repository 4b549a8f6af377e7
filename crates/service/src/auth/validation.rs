//! Input rules for registration and login.
//!
//! Registration checks run in a fixed order and the first failure is reported.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::domain::{LoginInput, RegisterInput};
use super::errors::AuthError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,4}$")
        .case_insensitive(true)
        .build()
        .expect("email regex")
});
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-z]+$").expect("name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").expect("phone regex"));

pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_TECHNOLOGY_LEN: usize = 64;

// Column widths of `login_app_schema.users`.
pub const MAX_NAME_LEN: usize = 128;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_ADDRESS_LEN: usize = 512;

pub const EMAIL_MSG: &str = "Email must be in the format example@mail.com";
pub const PASSWORD_MSG: &str = "Password must be at least 8 characters long and contain at least one lowercase letter, one uppercase letter, and one number";
pub const FIRST_NAME_MSG: &str = "First name must start with a capital letter and contain only letters";
pub const LAST_NAME_MSG: &str = "Last name must start with a capital letter and contain only letters";
pub const PHONE_MSG: &str = "Phone number must contain 10 digits";
pub const ADDRESS_MSG: &str = "Address must contain the word 'street'";
pub const BIRTHDAY_MSG: &str = "Birthday cannot be in the future";

pub fn is_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

pub fn is_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn is_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

pub fn is_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn is_address(address: &str) -> bool {
    address.contains("street")
}

fn invalid(msg: &str) -> AuthError {
    AuthError::Validation(msg.to_string())
}

fn require(field: &str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn within(field: &str, value: &str, max: usize) -> Result<(), AuthError> {
    if value.trim().chars().count() > max {
        return Err(AuthError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

/// Validate a registration against the rules, `today` bounding the birthday.
pub fn validate_registration(input: &RegisterInput, today: NaiveDate) -> Result<(), AuthError> {
    require("email", &input.email)?;
    require("pass", &input.pass)?;
    require("firstName", &input.first_name)?;
    require("lastName", &input.last_name)?;
    require("phone", &input.phone)?;
    require("address", &input.address)?;

    within("email", &input.email, MAX_EMAIL_LEN)?;
    within("firstName", &input.first_name, MAX_NAME_LEN)?;
    within("lastName", &input.last_name, MAX_NAME_LEN)?;
    within("address", &input.address, MAX_ADDRESS_LEN)?;

    if !is_email(&input.email) {
        return Err(invalid(EMAIL_MSG));
    }
    if !is_password(&input.pass) {
        return Err(invalid(PASSWORD_MSG));
    }
    if !is_name(&input.first_name) {
        return Err(invalid(FIRST_NAME_MSG));
    }
    if !is_name(&input.last_name) {
        return Err(invalid(LAST_NAME_MSG));
    }
    if !is_phone(&input.phone) {
        return Err(invalid(PHONE_MSG));
    }
    if !is_address(&input.address) {
        return Err(invalid(ADDRESS_MSG));
    }
    if input.birthday > today {
        return Err(invalid(BIRTHDAY_MSG));
    }

    for tech in &input.technologies {
        let t = tech.trim();
        if t.is_empty() || t.chars().count() > MAX_TECHNOLOGY_LEN {
            return Err(AuthError::Validation(format!(
                "technology names must be 1..={MAX_TECHNOLOGY_LEN} characters"
            )));
        }
    }
    Ok(())
}

pub fn validate_login(input: &LoginInput) -> Result<(), AuthError> {
    require("email", &input.email)?;
    require("pass", &input.pass)?;
    if !is_email(&input.email) {
        return Err(invalid(EMAIL_MSG));
    }
    Ok(())
}
