use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use oxcart_core::{CategoryId, DomainError, DomainResult, Entity, Money, ProductId, UserId};

use crate::review::Review;

/// A catalog product.
///
/// # Invariants
/// - `price` is strictly positive.
/// - `stock_quantity` never goes negative (unsigned plus checked removal).
/// - `reviews` is an append-only ordered sequence.
///
/// Owned by the catalog registry; carts and order lines reference it by
/// typed id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Money,
    stock_quantity: u32,
    vendor_id: UserId,
    category_id: CategoryId,
    specifications: BTreeMap<String, String>,
    images: Vec<String>,
    reviews: Vec<Review>,
    active: bool,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        vendor_id: UserId,
        category_id: CategoryId,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invalid_value("product name cannot be empty"));
        }
        if price.is_zero() {
            return Err(DomainError::invalid_value("price must be positive"));
        }
        Ok(Self {
            id: ProductId::new(),
            name,
            description: description.into(),
            price,
            stock_quantity: 0,
            vendor_id,
            category_id,
            specifications: BTreeMap::new(),
            images: Vec::new(),
            reviews: Vec::new(),
            active: true,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    pub fn vendor_id(&self) -> UserId {
        self.vendor_id
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn specifications(&self) -> &BTreeMap<String, String> {
        &self.specifications
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Reprice the product. Zero is rejected; placed orders are unaffected
    /// because their lines snapshot the unit price at checkout.
    pub fn set_price(&mut self, price: Money) -> DomainResult<()> {
        if price.is_zero() {
            return Err(DomainError::invalid_value("price must be positive"));
        }
        self.price = price;
        Ok(())
    }

    pub fn add_stock(&mut self, quantity: u32) -> DomainResult<()> {
        self.stock_quantity = self
            .stock_quantity
            .checked_add(quantity)
            .ok_or_else(|| DomainError::invalid_value("stock quantity overflow"))?;
        Ok(())
    }

    /// Take stock for an order line. Fails without mutating when the
    /// requested quantity exceeds what is available.
    pub fn remove_stock(&mut self, quantity: u32) -> DomainResult<()> {
        if quantity > self.stock_quantity {
            return Err(DomainError::insufficient_stock(quantity, self.stock_quantity));
        }
        self.stock_quantity -= quantity;
        Ok(())
    }

    pub fn add_specification(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.specifications.insert(key.into(), value.into());
    }

    pub fn add_image(&mut self, reference: impl Into<String>) {
        self.images.push(reference.into());
    }

    pub fn add_review(&mut self, review: Review) {
        self.reviews.push(review);
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Case-insensitive substring match against name and description.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
