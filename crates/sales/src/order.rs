use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oxcart_core::{Address, DomainError, DomainResult, Entity, Money, OrderId, ProductId, UserId};
use oxcart_payments::PaymentResult;

/// Order status lifecycle.
///
/// Allowed transitions:
///
/// ```text
/// Pending -> Processing -> Shipped -> Delivered
///    |            |
///    +-> Cancelled <-+
/// ```
///
/// `Delivered` and `Cancelled` are terminal. Anything else is rejected
/// with [`DomainError::InvalidTransition`] rather than silently applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether the state machine permits moving from `self` to `to`.
    pub fn can_transition(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (Pending, Processing)
                | (Pending, Cancelled)
                | (Processing, Shipped)
                | (Processing, Cancelled)
                | (Shipped, Delivered)
        )
    }

    /// Terminal states have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One line of an order: a snapshot of (product, quantity, unit price)
/// taken at checkout. Later cart or catalog mutation does not reach in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    product_id: ProductId,
    product_name: String,
    quantity: u32,
    unit_price: Money,
}

impl OrderLine {
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::invalid_value("order line quantity must be at least 1"));
        }
        Ok(Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn line_total(&self) -> DomainResult<Money> {
        self.unit_price.times(self.quantity)
    }
}

/// A placed order.
///
/// # Invariants
/// - Lines are a snapshot; they never change after placement.
/// - Status only changes along the [`OrderStatus`] machine.
/// - The tracking number is assigned exactly once, on shipment.
/// - At most one payment result is attached; a failed attempt may be
///   replaced by a later retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: UserId,
    lines: Vec<OrderLine>,
    shipping_address: Address,
    placed_at: DateTime<Utc>,
    status: OrderStatus,
    shipping_cost: Money,
    tracking_number: Option<String>,
    payment: Option<PaymentResult>,
}

impl Order {
    pub fn new(
        customer_id: UserId,
        lines: Vec<OrderLine>,
        shipping_address: Address,
        shipping_cost: Money,
    ) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::EmptyCart);
        }
        Ok(Self {
            id: OrderId::new(),
            customer_id,
            lines,
            shipping_address,
            placed_at: Utc::now(),
            status: OrderStatus::Pending,
            shipping_cost,
            tracking_number: None,
            payment: None,
        })
    }

    pub fn customer_id(&self) -> UserId {
        self.customer_id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn shipping_cost(&self) -> Money {
        self.shipping_cost
    }

    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number.as_deref()
    }

    pub fn payment(&self) -> Option<&PaymentResult> {
        self.payment.as_ref()
    }

    pub fn subtotal(&self) -> DomainResult<Money> {
        let mut subtotal = Money::ZERO;
        for line in &self.lines {
            subtotal = subtotal.plus(line.line_total()?)?;
        }
        Ok(subtotal)
    }

    pub fn total(&self) -> DomainResult<Money> {
        self.subtotal()?.plus(self.shipping_cost)
    }

    /// Move to a new status, rejecting anything the machine does not allow.
    pub fn transition(&mut self, to: OrderStatus) -> DomainResult<()> {
        if !self.status.can_transition(to) {
            return Err(DomainError::invalid_transition(
                self.status.to_string(),
                to.to_string(),
            ));
        }
        self.status = to;
        Ok(())
    }

    /// Ship the order, generating an opaque tracking number.
    pub fn ship(&mut self) -> DomainResult<&str> {
        self.transition(OrderStatus::Shipped)?;
        let tracking = format!("TRK-{}", Uuid::now_v7().simple());
        self.tracking_number = Some(tracking);
        Ok(self.tracking_number.as_deref().unwrap_or_default())
    }

    /// Attach the outcome of a payment attempt.
    pub fn record_payment(&mut self, payment: PaymentResult) {
        self.payment = Some(payment);
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxcart_payments::{PaymentMethod, PaymentStatus};

    fn test_address() -> Address {
        Address::new("123 Street", "Chittagong", "CTG", "4212", "Bangladesh")
    }

    fn test_order() -> Order {
        let line =
            OrderLine::new(ProductId::new(), "Widget", 2, Money::from_cents(1_000)).unwrap();
        Order::new(UserId::new(), vec![line], test_address(), Money::ZERO).unwrap()
    }

    #[test]
    fn new_order_starts_pending() {
        assert_eq!(test_order().status(), OrderStatus::Pending);
    }

    #[test]
    fn order_with_no_lines_is_rejected() {
        let err = Order::new(UserId::new(), Vec::new(), test_address(), Money::ZERO).unwrap_err();
        assert_eq!(err, DomainError::EmptyCart);
    }

    #[test]
    fn totals_sum_lines_plus_shipping() {
        let lines = vec![
            OrderLine::new(ProductId::new(), "A", 2, Money::from_cents(1_000)).unwrap(),
            OrderLine::new(ProductId::new(), "B", 1, Money::from_cents(500)).unwrap(),
        ];
        let order =
            Order::new(UserId::new(), lines, test_address(), Money::from_cents(250)).unwrap();

        assert_eq!(order.subtotal().unwrap(), Money::from_cents(2_500));
        assert_eq!(order.total().unwrap(), Money::from_cents(2_750));
    }

    #[test]
    fn happy_path_transitions_are_allowed() {
        let mut order = test_order();
        order.transition(OrderStatus::Processing).unwrap();
        order.ship().unwrap();
        order.transition(OrderStatus::Delivered).unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);
    }

    #[test]
    fn cancel_is_allowed_from_pending_and_processing_only() {
        let mut order = test_order();
        order.transition(OrderStatus::Cancelled).unwrap();

        let mut order = test_order();
        order.transition(OrderStatus::Processing).unwrap();
        order.transition(OrderStatus::Cancelled).unwrap();

        let mut order = test_order();
        order.transition(OrderStatus::Processing).unwrap();
        order.ship().unwrap();
        let err = order.transition(OrderStatus::Cancelled).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn delivered_back_to_pending_is_rejected() {
        let mut order = test_order();
        order.transition(OrderStatus::Processing).unwrap();
        order.ship().unwrap();
        order.transition(OrderStatus::Delivered).unwrap();

        let err = order.transition(OrderStatus::Pending).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(order.status(), OrderStatus::Delivered);
    }

    #[test]
    fn shipping_assigns_a_tracking_number_once() {
        let mut order = test_order();
        assert!(order.tracking_number().is_none());

        order.transition(OrderStatus::Processing).unwrap();
        let tracking = order.ship().unwrap().to_owned();
        assert!(tracking.starts_with("TRK-"));

        // A second ship attempt is an invalid transition and keeps the number.
        let err = order.ship().unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(order.tracking_number(), Some(tracking.as_str()));
    }

    #[test]
    fn payment_result_is_attached_to_the_order() {
        let mut order = test_order();
        let payment =
            PaymentResult::completed(PaymentMethod::CreditCard, order.total().unwrap());
        order.record_payment(payment);

        assert_eq!(
            order.payment().map(PaymentResult::status),
            Some(PaymentStatus::Completed)
        );
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_status() -> impl Strategy<Value = OrderStatus> {
            prop_oneof![
                Just(OrderStatus::Pending),
                Just(OrderStatus::Processing),
                Just(OrderStatus::Shipped),
                Just(OrderStatus::Delivered),
                Just(OrderStatus::Cancelled),
            ]
        }

        proptest! {
            /// Property: terminal states have no outgoing transitions, so no
            /// sequence of attempts can leave them.
            #[test]
            fn terminal_states_are_closed(
                attempts in proptest::collection::vec(any_status(), 1..20),
            ) {
                let mut order = test_order();
                order.transition(OrderStatus::Cancelled).unwrap();

                for to in attempts {
                    prop_assert!(order.transition(to).is_err());
                    prop_assert_eq!(order.status(), OrderStatus::Cancelled);
                }
            }

            /// Property: a rejected transition never changes state.
            #[test]
            fn rejected_transitions_leave_state_unchanged(
                attempts in proptest::collection::vec(any_status(), 1..30),
            ) {
                let mut order = test_order();
                for to in attempts {
                    let before = order.status();
                    match order.transition(to) {
                        Ok(()) => prop_assert!(before.can_transition(to)),
                        Err(_) => prop_assert_eq!(order.status(), before),
                    }
                }
            }
        }
    }
}
