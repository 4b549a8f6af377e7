//! sea-orm entities for `login_app_schema` plus connection helpers.

pub mod errors;
pub mod db;
pub mod role;
pub mod user;
pub mod technology;
pub mod user_technology;

pub use role::UserRole;

#[cfg(test)]
mod tests;
