//! Service layer: registration, login and identity logic on top of `models`.
//! - Business rules live here, independent of the web framework.
//! - Persistence is reached through the `UserRepository` trait.

pub mod auth;
pub mod user_service;
#[cfg(test)]
pub mod test_support;
