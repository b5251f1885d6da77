//! `oxcart-payments`: payment methods, processors, and results.
//!
//! Processors are polymorphic behind [`PaymentProcessor`]; a registry keyed
//! by [`PaymentMethod`] lets new variants (wallet, bank transfer) be added
//! without touching call sites. Charging is simulated: once validation
//! passes it always succeeds, and it never partially charges.

pub mod card;
pub mod processor;

pub use card::{CardDetails, CreditCardProcessor};
pub use processor::{
    PaymentDetails, PaymentMethod, PaymentProcessor, PaymentResult, PaymentStatus,
};
