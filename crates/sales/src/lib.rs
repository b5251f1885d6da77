//! `oxcart-sales`: shopping carts and orders.

pub mod cart;
pub mod order;

pub use cart::{Cart, CartItem};
pub use order::{Order, OrderLine, OrderStatus};
