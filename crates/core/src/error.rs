//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic, recoverable business failure raised at
/// the point of violation. The caller decides whether to retry or abort;
/// nothing here indicates corrupted process state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Username or email is already registered.
    #[error("duplicate user: {0}")]
    DuplicateUser(String),

    /// A sibling category with the same name already exists.
    #[error("duplicate category: {0}")]
    DuplicateCategory(String),

    /// The acting user's role does not allow the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// A value failed validation (e.g. non-positive price, zero quantity).
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Requested quantity exceeds available stock.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// Order placement was attempted on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Payment details failed validation. Recoverable; the caller may retry.
    #[error("payment validation failed: {0}")]
    PaymentValidation(String),

    /// An order-status transition that the state machine does not allow.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// A referenced entity does not exist in the registry.
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn duplicate_user(msg: impl Into<String>) -> Self {
        Self::DuplicateUser(msg.into())
    }

    pub fn duplicate_category(msg: impl Into<String>) -> Self {
        Self::DuplicateCategory(msg.into())
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::InvalidValue(msg.into())
    }

    pub fn insufficient_stock(requested: u32, available: u32) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }

    pub fn payment_validation(msg: impl Into<String>) -> Self {
        Self::PaymentValidation(msg.into())
    }

    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
