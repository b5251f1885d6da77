//! `oxcart-catalog`: categories, products, and reviews.

pub mod category;
pub mod product;
pub mod review;

pub use category::Category;
pub use product::Product;
pub use review::Review;
