use serde::{Deserialize, Serialize};

use oxcart_core::{DomainError, DomainResult, Money, ProductId};

/// A quantity-annotated product reference inside a cart.
///
/// Holds a non-owning reference (the typed id) to a catalog product; the
/// catalog remains the owner of product state, including stock and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    product_id: ProductId,
    quantity: u32,
}

impl CartItem {
    fn new(product_id: ProductId, quantity: u32) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::invalid_value("cart quantity must be at least 1"));
        }
        Ok(Self {
            product_id,
            quantity,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// A customer's shopping cart.
///
/// # Invariants
/// - At most one line per product (adding merges quantities).
/// - Every line has quantity >= 1 (an update to zero removes the line).
/// - The total is always derived from current items, never cached.
///
/// Stock availability is not a cart concern; the registry that owns both
/// the cart and the catalog checks stock before mutating the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity currently carried for a product, zero if absent.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map_or(0, |item| item.quantity)
    }

    /// Add a product, merging into an existing line for the same product.
    pub fn add_item(&mut self, product_id: ProductId, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::invalid_value("cart quantity must be at least 1"));
        }
        match self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            Some(item) => {
                item.quantity = item.quantity.checked_add(quantity).ok_or_else(|| {
                    DomainError::invalid_value("cart quantity overflow")
                })?;
            }
            None => self.items.push(CartItem::new(product_id, quantity)?),
        }
        Ok(())
    }

    /// Remove the line for a product. Removing an absent product is a no-op.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.product_id != product_id);
    }

    /// Set the quantity for a product already in the cart.
    ///
    /// A quantity of zero is equivalent to removing the line.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            self.remove_item(product_id);
            return Ok(());
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
            .ok_or_else(|| DomainError::not_found(format!("cart line for {product_id}")))?;
        item.quantity = quantity;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total cost, recomputed on demand from current unit prices.
    ///
    /// `price_of` resolves a product id against the catalog; a line whose
    /// product cannot be resolved is a registry-consistency failure.
    pub fn total_with<F>(&self, price_of: F) -> DomainResult<Money>
    where
        F: Fn(ProductId) -> Option<Money>,
    {
        let mut total = Money::ZERO;
        for item in &self.items {
            let unit = price_of(item.product_id).ok_or_else(|| {
                DomainError::not_found(format!("product {}", item.product_id))
            })?;
            total = total.plus(unit.times(item.quantity)?)?;
        }
        Ok(total)
    }
}
