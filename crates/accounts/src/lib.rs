//! `oxcart-accounts`: users, roles, and credentials.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod credential;
pub mod user;

pub use credential::PasswordDigest;
pub use user::{User, UserRole};
