//! Black-box exercise of the full storefront flow through the façade.

use oxcart_accounts::UserRole;
use oxcart_core::{Address, DomainError, Money};
use oxcart_payments::{CardDetails, PaymentDetails, PaymentMethod, PaymentStatus};
use oxcart_sales::OrderStatus;
use oxcart_system::EcommerceSystem;

fn shipping_address() -> Address {
    Address::new("123 Street", "Chittagong", "CTG", "4212", "Bangladesh")
}

fn card() -> PaymentDetails {
    PaymentDetails::Card(CardDetails::new("1234567890123456", "12/99", "123"))
}

#[test]
fn full_storefront_flow_from_registration_to_delivery() {
    let mut system = EcommerceSystem::new();

    // Categories: a root with one child.
    let electronics = system
        .add_category("Electronics", "Electronic devices and accessories", None)
        .unwrap();
    let phones = system
        .add_category("Phones", "Mobile phones and accessories", Some(electronics))
        .unwrap();
    assert_eq!(system.category_path(phones).unwrap(), "Electronics > Phones");

    // One user per role.
    let _admin = system
        .register_user(UserRole::Admin, "john", "john@example.com", "123456")
        .unwrap();
    let vendor = system
        .register_user(UserRole::Vendor, "doe", "doe@example.com", "123456")
        .unwrap();
    let customer = system
        .register_user(UserRole::Customer, "doe2", "doe2@example.com", "123456")
        .unwrap();

    // Vendor lists a product with specifications.
    let iphone = system
        .add_product(
            vendor,
            "Iphone X",
            "Latest iPhone model",
            Money::from_cents(99_999),
            10,
            phones,
            [
                ("screen size".to_owned(), "6 inch".to_owned()),
                ("storage".to_owned(), "128gb".to_owned()),
            ],
        )
        .unwrap();
    assert_eq!(
        system.product(iphone).unwrap().specifications().len(),
        2
    );

    // Search finds it; the customer carts and orders it.
    assert_eq!(system.search_products("iphone", Some(phones)).len(), 1);
    system.add_to_cart(customer, iphone, 2).unwrap();
    assert_eq!(
        system.cart_total(customer).unwrap(),
        Money::from_cents(199_998)
    );

    let order_id = system.place_order(customer, shipping_address()).unwrap();
    assert_eq!(system.product(iphone).unwrap().stock_quantity(), 8);
    assert!(system.user(customer).unwrap().cart().unwrap().is_empty());

    // Pay, ship, deliver.
    system
        .process_payment(order_id, PaymentMethod::CreditCard, &card())
        .unwrap();
    let tracking = system.ship_order(order_id).unwrap();
    assert!(tracking.starts_with("TRK-"));
    system.deliver_order(order_id).unwrap();

    let order = system.order(order_id).unwrap();
    assert_eq!(order.status(), OrderStatus::Delivered);
    assert_eq!(order.total().unwrap(), Money::from_cents(199_998));
    assert_eq!(
        order.payment().map(|p| p.status()),
        Some(PaymentStatus::Completed)
    );

    // A delivered order is terminal.
    let err = system.cancel_order(order_id).unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition { .. }));

    // The customer leaves a review.
    system.add_review(customer, iphone, 5, "works great").unwrap();
    assert_eq!(system.product(iphone).unwrap().reviews().len(), 1);
}

#[test]
fn declined_card_keeps_the_order_payable() {
    let mut system = EcommerceSystem::new();
    let category = system.add_category("Electronics", "", None).unwrap();
    let vendor = system
        .register_user(UserRole::Vendor, "doe", "doe@example.com", "123456")
        .unwrap();
    let customer = system
        .register_user(UserRole::Customer, "doe2", "doe2@example.com", "123456")
        .unwrap();
    let product = system
        .add_product(
            vendor,
            "Iphone X",
            "",
            Money::from_cents(99_999),
            10,
            category,
            [],
        )
        .unwrap();
    system.add_to_cart(customer, product, 1).unwrap();
    let order_id = system.place_order(customer, shipping_address()).unwrap();

    let bad = PaymentDetails::Card(CardDetails::new("not-a-card", "12/99", "123"));
    let err = system
        .process_payment(order_id, PaymentMethod::CreditCard, &bad)
        .unwrap_err();
    assert!(matches!(err, DomainError::PaymentValidation(_)));
    assert_eq!(system.order(order_id).unwrap().status(), OrderStatus::Pending);

    system
        .process_payment(order_id, PaymentMethod::CreditCard, &card())
        .unwrap();
    assert_eq!(
        system.order(order_id).unwrap().status(),
        OrderStatus::Processing
    );
}

#[test]
fn placed_orders_serialize_for_inspection() {
    let mut system = EcommerceSystem::new();
    let category = system.add_category("Electronics", "", None).unwrap();
    let vendor = system
        .register_user(UserRole::Vendor, "doe", "doe@example.com", "123456")
        .unwrap();
    let customer = system
        .register_user(UserRole::Customer, "doe2", "doe2@example.com", "123456")
        .unwrap();
    let product = system
        .add_product(
            vendor,
            "Iphone X",
            "",
            Money::from_cents(99_999),
            10,
            category,
            [],
        )
        .unwrap();
    system.add_to_cart(customer, product, 1).unwrap();
    let order_id = system.place_order(customer, shipping_address()).unwrap();

    let json = serde_json::to_value(system.order(order_id).unwrap()).unwrap();
    assert_eq!(json["status"], "pending");
    assert_eq!(json["lines"][0]["product_name"], "Iphone X");
    assert_eq!(json["lines"][0]["unit_price"], 99_999);
}
