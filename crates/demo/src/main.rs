//! Scripted walkthrough of the storefront: set up a catalog, register
//! users, and take one order from cart to paid.

use oxcart_accounts::UserRole;
use oxcart_core::{Address, Money};
use oxcart_payments::{CardDetails, PaymentDetails, PaymentMethod};
use oxcart_system::EcommerceSystem;

fn main() -> anyhow::Result<()> {
    oxcart_observability::init();

    let mut system = EcommerceSystem::new();

    let electronics =
        system.add_category("Electronics", "Electronic devices and accessories", None)?;
    let phones =
        system.add_category("Phones", "Mobile phones and accessories", Some(electronics))?;
    println!("category: {}", system.category_path(phones)?);

    let _admin = system.register_user(UserRole::Admin, "john", "john@example.com", "123456")?;
    let vendor = system.register_user(UserRole::Vendor, "doe", "doe@example.com", "123456")?;
    let customer = system.register_user(UserRole::Customer, "doe2", "doe2@example.com", "123456")?;
    println!("registered admin, vendor, and customer accounts");

    let iphone = system.add_product(
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
    )?;
    let product = system.product(iphone)?;
    println!("listed {} at {}", product.name(), product.price());

    system.add_to_cart(customer, iphone, 2)?;
    println!("cart total: {}", system.cart_total(customer)?);

    let address = Address::new("123 Street", "Chittagong", "CTG", "4212", "Bangladesh");
    system.add_address(customer, address.clone())?;
    let order_id = system.place_order(customer, address)?;
    let order = system.order(order_id)?;
    println!(
        "order {} placed, {} line(s), total {}",
        order_id,
        order.lines().len(),
        order.total()?,
    );

    let details = PaymentDetails::Card(CardDetails::new("1234567890123456", "12/30", "123"));
    system.process_payment(order_id, PaymentMethod::CreditCard, &details)?;
    println!("order status: {}", system.order(order_id)?.status());

    let tracking = system.ship_order(order_id)?;
    println!("shipped with tracking number {tracking}");

    system.deliver_order(order_id)?;
    println!("order status: {}", system.order(order_id)?.status());

    Ok(())
}
