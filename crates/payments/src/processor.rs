use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use oxcart_core::{DomainResult, Money, PaymentId};

/// Supported payment methods.
///
/// Only `CreditCard` has a processor registered today; the others exist so
/// a processor can be added without a wire-format change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    NetBanking,
    Wallet,
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PaymentMethod::CreditCard => write!(f, "credit_card"),
            PaymentMethod::DebitCard => write!(f, "debit_card"),
            PaymentMethod::NetBanking => write!(f, "net_banking"),
            PaymentMethod::Wallet => write!(f, "wallet"),
        }
    }
}

/// Payment attempt status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl core::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Failed => write!(f, "failed"),
            PaymentStatus::Refunded => write!(f, "refunded"),
        }
    }
}

/// Method-specific payment details presented by the caller.
///
/// Additional variants accompany additional processors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentDetails {
    Card(crate::card::CardDetails),
}

/// Outcome of a payment attempt, attached to exactly one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    id: PaymentId,
    method: PaymentMethod,
    amount: Money,
    status: PaymentStatus,
    processed_at: DateTime<Utc>,
}

impl PaymentResult {
    pub fn completed(method: PaymentMethod, amount: Money) -> Self {
        Self {
            id: PaymentId::new(),
            method,
            amount,
            status: PaymentStatus::Completed,
            processed_at: Utc::now(),
        }
    }

    pub fn failed(method: PaymentMethod, amount: Money) -> Self {
        Self {
            id: PaymentId::new(),
            method,
            amount,
            status: PaymentStatus::Failed,
            processed_at: Utc::now(),
        }
    }

    /// A refunded copy of this payment, keeping the payment id so the
    /// refund stays traceable to the original charge.
    pub fn refunded(&self) -> Self {
        Self {
            status: PaymentStatus::Refunded,
            processed_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn processed_at(&self) -> DateTime<Utc> {
        self.processed_at
    }
}

/// Capability contract for payment processors.
///
/// Object-safe so the registry can hold `Box<dyn PaymentProcessor>` keyed by
/// method. Implementations must never partially charge: `charge` either
/// returns a `Completed` result or an error with no side effects.
pub trait PaymentProcessor {
    /// The method this processor serves.
    fn method(&self) -> PaymentMethod;

    /// Check the shape of the presented details without charging.
    fn validate(&self, details: &PaymentDetails) -> DomainResult<()>;

    /// Validate and charge. Simulated gateways complete unconditionally
    /// once validation passes.
    fn charge(&self, amount: Money, details: &PaymentDetails) -> DomainResult<PaymentResult>;

    /// Reverse a completed charge.
    fn refund(&self, payment: &PaymentResult) -> DomainResult<PaymentResult>;
}
