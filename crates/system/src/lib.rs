//! `oxcart-system`: the storefront façade.
//!
//! [`EcommerceSystem`] is the single owned registry for users, categories,
//! products, orders, and payment processors. All collaborators receive it
//! by reference; there is no ambient global state.

pub mod system;

pub use system::EcommerceSystem;
