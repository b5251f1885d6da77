use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use oxcart_core::{DomainError, DomainResult, Money};

use crate::processor::{
    PaymentDetails, PaymentMethod, PaymentProcessor, PaymentResult, PaymentStatus,
};

/// Raw card data presented at checkout.
///
/// Never stored; the processor only inspects it long enough to validate and
/// charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    /// Expiry in `MM/YY` form.
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    pub fn new(
        number: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            expiry: expiry.into(),
            cvv: cvv.into(),
        }
    }
}

/// Simulated credit-card processor.
///
/// Validates card number format, expiry plausibility, and CVV shape; a
/// charge that passes validation always completes (no real gateway).
#[derive(Debug, Clone, Copy, Default)]
pub struct CreditCardProcessor;

impl CreditCardProcessor {
    pub fn new() -> Self {
        Self
    }

    fn validate_card(&self, card: &CardDetails) -> DomainResult<()> {
        if card.number.len() != 16 || !card.number.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::payment_validation(
                "card number must be exactly 16 digits",
            ));
        }

        let (month, year) = parse_expiry(&card.expiry)?;
        let now = Utc::now();
        // Two-digit years are anchored to the 2000s, matching card fronts.
        let full_year = 2000 + i32::from(year);
        let current_year = now.year();
        let current_month = now.month();
        let expired =
            full_year < current_year || (full_year == current_year && u32::from(month) < current_month);
        if expired {
            return Err(DomainError::payment_validation("card is expired"));
        }

        if !(3..=4).contains(&card.cvv.len()) || !card.cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::payment_validation("CVV must be 3 or 4 digits"));
        }

        Ok(())
    }
}

fn parse_expiry(expiry: &str) -> DomainResult<(u8, u8)> {
    let malformed = || DomainError::payment_validation("expiry must be in MM/YY form");
    let (month, year) = expiry.split_once('/').ok_or_else(malformed)?;
    if month.len() != 2 || year.len() != 2 {
        return Err(malformed());
    }
    let month: u8 = month.parse().map_err(|_| malformed())?;
    let year: u8 = year.parse().map_err(|_| malformed())?;
    if !(1..=12).contains(&month) {
        return Err(DomainError::payment_validation("expiry month out of range"));
    }
    Ok((month, year))
}

impl PaymentProcessor for CreditCardProcessor {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::CreditCard
    }

    fn validate(&self, details: &PaymentDetails) -> DomainResult<()> {
        match details {
            PaymentDetails::Card(card) => self.validate_card(card),
        }
    }

    fn charge(&self, amount: Money, details: &PaymentDetails) -> DomainResult<PaymentResult> {
        self.validate(details)?;
        Ok(PaymentResult::completed(PaymentMethod::CreditCard, amount))
    }

    fn refund(&self, payment: &PaymentResult) -> DomainResult<PaymentResult> {
        if payment.status() != PaymentStatus::Completed {
            return Err(DomainError::invalid_value(
                "only completed payments can be refunded",
            ));
        }
        Ok(payment.refunded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_card() -> CardDetails {
        CardDetails::new("1234567890123456", "12/99", "123")
    }

    fn details(card: CardDetails) -> PaymentDetails {
        PaymentDetails::Card(card)
    }

    #[test]
    fn charge_completes_for_a_valid_card() {
        let processor = CreditCardProcessor::new();
        let amount = Money::from_cents(99_999);
        let payment = processor.charge(amount, &details(valid_card())).unwrap();

        assert_eq!(payment.status(), PaymentStatus::Completed);
        assert_eq!(payment.amount(), amount);
        assert_eq!(payment.method(), PaymentMethod::CreditCard);
    }

    #[test]
    fn card_number_with_wrong_length_is_rejected() {
        let processor = CreditCardProcessor::new();
        let card = CardDetails::new("12345", "12/99", "123");
        let err = processor.validate(&details(card)).unwrap_err();
        assert!(matches!(err, DomainError::PaymentValidation(_)));
    }

    #[test]
    fn card_number_with_non_digits_is_rejected() {
        let processor = CreditCardProcessor::new();
        let card = CardDetails::new("1234-5678-9012-34", "12/99", "123");
        let err = processor.validate(&details(card)).unwrap_err();
        assert!(matches!(err, DomainError::PaymentValidation(_)));
    }

    #[test]
    fn expired_card_is_rejected() {
        let processor = CreditCardProcessor::new();
        let card = CardDetails::new("1234567890123456", "01/20", "123");
        let err = processor.validate(&details(card)).unwrap_err();
        assert!(matches!(err, DomainError::PaymentValidation(_)));
    }

    #[test]
    fn malformed_expiry_is_rejected() {
        let processor = CreditCardProcessor::new();
        for expiry in ["1299", "13/99", "1/99", "12/2099", "ab/cd"] {
            let card = CardDetails::new("1234567890123456", expiry, "123");
            let err = processor.validate(&details(card)).unwrap_err();
            assert!(
                matches!(err, DomainError::PaymentValidation(_)),
                "expiry {expiry:?} should be rejected"
            );
        }
    }

    #[test]
    fn cvv_shape_is_checked() {
        let processor = CreditCardProcessor::new();
        for cvv in ["12", "12345", "12a"] {
            let card = CardDetails::new("1234567890123456", "12/99", cvv);
            let err = processor.validate(&details(card)).unwrap_err();
            assert!(
                matches!(err, DomainError::PaymentValidation(_)),
                "cvv {cvv:?} should be rejected"
            );
        }
    }

    #[test]
    fn refund_flips_a_completed_payment() {
        let processor = CreditCardProcessor::new();
        let payment = processor
            .charge(Money::from_cents(1_000), &details(valid_card()))
            .unwrap();
        let refunded = processor.refund(&payment).unwrap();

        assert_eq!(refunded.status(), PaymentStatus::Refunded);
        assert_eq!(refunded.id(), payment.id());
        assert_eq!(refunded.amount(), payment.amount());
    }

    #[test]
    fn refund_of_a_failed_payment_is_rejected() {
        let processor = CreditCardProcessor::new();
        let payment = PaymentResult::failed(PaymentMethod::CreditCard, Money::from_cents(1_000));
        let err = processor.refund(&payment).unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue(_)));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any 16-digit number with a future expiry and a
            /// 3-digit CVV validates; charging it completes for the exact
            /// requested amount.
            #[test]
            fn well_formed_cards_always_charge(
                number in "[0-9]{16}",
                month in 1u8..=12,
                cvv in "[0-9]{3}",
                cents in 1u64..10_000_000,
            ) {
                let processor = CreditCardProcessor::new();
                let card = CardDetails::new(number, format!("{month:02}/99"), cvv);
                let amount = Money::from_cents(cents);
                let payment = processor
                    .charge(amount, &PaymentDetails::Card(card))
                    .unwrap();
                prop_assert_eq!(payment.status(), PaymentStatus::Completed);
                prop_assert_eq!(payment.amount(), amount);
            }

            /// Property: numbers that are not exactly 16 digits never pass.
            #[test]
            fn malformed_numbers_never_charge(
                number in "[0-9]{0,15}|[0-9]{17,20}|[a-z0-9]{16}",
            ) {
                prop_assume!(!(number.len() == 16 && number.chars().all(|c| c.is_ascii_digit())));
                let processor = CreditCardProcessor::new();
                let card = CardDetails::new(number, "12/99", "123");
                let result = processor.charge(
                    Money::from_cents(1_000),
                    &PaymentDetails::Card(card),
                );
                prop_assert!(matches!(result, Err(DomainError::PaymentValidation(_))));
            }
        }
    }
}
