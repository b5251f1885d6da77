//! `oxcart-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod address;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use address::Address;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, OrderId, PaymentId, ProductId, ReviewId, UserId};
pub use money::Money;
pub use value_object::ValueObject;
