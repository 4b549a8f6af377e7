//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login, token handling and the identity DTO handed to the
//! HTTP security filter all live here.

pub mod domain;
pub mod errors;
pub mod identity;
pub mod password;
pub mod repository;
pub mod repo;
pub mod service;
pub mod token;
pub mod validation;

pub use errors::AuthError;
pub use identity::{Authority, Principal, UserDetails};
pub use service::{AuthConfig, AuthService};
