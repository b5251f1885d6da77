//! User entity and roles.

use serde::{Deserialize, Serialize};

use oxcart_core::{Address, DomainError, DomainResult, Entity, OrderId, ProductId, UserId};
use oxcart_sales::Cart;

use crate::credential::PasswordDigest;

// ─────────────────────────────────────────────────────────────────────────────
// Role
// ─────────────────────────────────────────────────────────────────────────────

/// User role, fixed at creation and never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Admin,
    Vendor,
}

impl core::fmt::Display for UserRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UserRole::Customer => write!(f, "customer"),
            UserRole::Admin => write!(f, "admin"),
            UserRole::Vendor => write!(f, "vendor"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// A registered user.
///
/// # Invariants
/// - Username and email are unique across the registry (enforced there;
///   the registry is the only place that sees all users).
/// - The role never changes after creation.
/// - Only customers carry a cart, created with the user and kept for the
///   user's lifetime.
/// - The wishlist holds no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
    digest: PasswordDigest,
    role: UserRole,
    addresses: Vec<Address>,
    wishlist: Vec<ProductId>,
    orders: Vec<OrderId>,
    cart: Option<Cart>,
}

impl User {
    pub fn new(
        role: UserRole,
        username: impl Into<String>,
        email: impl Into<String>,
        password: &str,
    ) -> DomainResult<Self> {
        let username = username.into();
        let email = email.into();
        if username.trim().is_empty() {
            return Err(DomainError::invalid_value("username cannot be empty"));
        }
        if !email.contains('@') {
            return Err(DomainError::invalid_value("email must contain '@'"));
        }
        if password.is_empty() {
            return Err(DomainError::invalid_value("password cannot be empty"));
        }
        Ok(Self {
            id: UserId::new(),
            username,
            email,
            digest: PasswordDigest::from_password(password),
            role,
            addresses: Vec::new(),
            wishlist: Vec::new(),
            orders: Vec::new(),
            cart: (role == UserRole::Customer).then(Cart::new),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn verify_password(&self, password: &str) -> bool {
        self.digest.verify(password)
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn add_address(&mut self, address: Address) {
        self.addresses.push(address);
    }

    pub fn wishlist(&self) -> &[ProductId] {
        &self.wishlist
    }

    /// Add to the wishlist; already-present products are left alone.
    pub fn wishlist_add(&mut self, product_id: ProductId) {
        if !self.wishlist.contains(&product_id) {
            self.wishlist.push(product_id);
        }
    }

    /// Remove from the wishlist; absent products are a no-op.
    pub fn wishlist_remove(&mut self, product_id: ProductId) {
        self.wishlist.retain(|id| *id != product_id);
    }

    pub fn orders(&self) -> &[OrderId] {
        &self.orders
    }

    pub fn record_order(&mut self, order_id: OrderId) {
        self.orders.push(order_id);
    }

    /// The customer's cart; other roles have none.
    pub fn cart(&self) -> DomainResult<&Cart> {
        self.cart
            .as_ref()
            .ok_or_else(|| DomainError::permission_denied("only customers have a cart"))
    }

    pub fn cart_mut(&mut self) -> DomainResult<&mut Cart> {
        self.cart
            .as_mut()
            .ok_or_else(|| DomainError::permission_denied("only customers have a cart"))
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> User {
        User::new(UserRole::Customer, "doe2", "doe2@example.com", "123456").unwrap()
    }

    #[test]
    fn customers_get_a_cart_and_vendors_do_not() {
        assert!(customer().cart().is_ok());

        let vendor = User::new(UserRole::Vendor, "doe", "doe@example.com", "123456").unwrap();
        let err = vendor.cart().unwrap_err();
        assert!(matches!(err, DomainError::PermissionDenied(_)));
    }

    #[test]
    fn password_verification_is_by_digest() {
        let user = customer();
        assert!(user.verify_password("123456"));
        assert!(!user.verify_password("guess"));
    }

    #[test]
    fn blank_username_is_rejected() {
        let err = User::new(UserRole::Customer, "  ", "a@b.c", "pw").unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue(_)));
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let err = User::new(UserRole::Customer, "doe", "not-an-email", "pw").unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue(_)));
    }

    #[test]
    fn wishlist_add_is_idempotent() {
        let mut user = customer();
        let product = ProductId::new();
        user.wishlist_add(product);
        user.wishlist_add(product);
        assert_eq!(user.wishlist(), &[product]);
    }

    #[test]
    fn wishlist_remove_of_absent_product_is_a_noop() {
        let mut user = customer();
        let kept = ProductId::new();
        user.wishlist_add(kept);
        user.wishlist_remove(ProductId::new());
        assert_eq!(user.wishlist(), &[kept]);
    }
}
