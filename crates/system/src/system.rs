use std::collections::HashMap;

use tracing::{debug, info};

use oxcart_accounts::{User, UserRole};
use oxcart_catalog::{Category, Product, Review};
use oxcart_core::{
    Address, CategoryId, DomainError, DomainResult, Entity, Money, OrderId, ProductId, UserId,
};
use oxcart_payments::{
    CreditCardProcessor, PaymentDetails, PaymentMethod, PaymentProcessor, PaymentResult,
    PaymentStatus,
};
use oxcart_sales::{Order, OrderLine, OrderStatus};

/// The in-memory root registry and single operational façade.
///
/// Owns every user, category, product, and order for the lifetime of the
/// process. Registries keep deterministic insertion order alongside the
/// id-keyed maps so reads (search, listings) are reproducible.
///
/// Single-threaded by design: every operation runs to completion and
/// either commits its whole effect or leaves all registries untouched.
pub struct EcommerceSystem {
    users: HashMap<UserId, User>,
    categories: HashMap<CategoryId, Category>,
    products: HashMap<ProductId, Product>,
    /// Catalog insertion order; also the documented search-result order.
    product_order: Vec<ProductId>,
    orders: HashMap<OrderId, Order>,
    processors: HashMap<PaymentMethod, Box<dyn PaymentProcessor>>,
}

impl EcommerceSystem {
    /// A fresh system with the credit-card processor registered.
    pub fn new() -> Self {
        let mut system = Self {
            users: HashMap::new(),
            categories: HashMap::new(),
            products: HashMap::new(),
            product_order: Vec::new(),
            orders: HashMap::new(),
            processors: HashMap::new(),
        };
        system.register_processor(Box::new(CreditCardProcessor::new()));
        system
    }

    /// Register a processor for its method, replacing any previous one.
    /// New methods (wallet, bank transfer) plug in here without touching
    /// any call site.
    pub fn register_processor(&mut self, processor: Box<dyn PaymentProcessor>) {
        self.processors.insert(processor.method(), processor);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────

    /// Register a new user. Username and email must be unique across the
    /// whole registry; customers are created with their cart.
    pub fn register_user(
        &mut self,
        role: UserRole,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<UserId> {
        if self.users.values().any(|u| u.username() == username) {
            return Err(DomainError::duplicate_user(format!(
                "username {username:?} is already taken"
            )));
        }
        if self.users.values().any(|u| u.email() == email) {
            return Err(DomainError::duplicate_user(format!(
                "email {email:?} is already registered"
            )));
        }

        let user = User::new(role, username, email, password)?;
        let user_id = *user.id();
        self.users.insert(user_id, user);
        info!(%user_id, username, %role, "user registered");
        Ok(user_id)
    }

    /// Digest-comparison login. The same error covers unknown usernames
    /// and wrong passwords so callers cannot probe the registry.
    pub fn authenticate(&self, username: &str, password: &str) -> DomainResult<UserId> {
        self.users
            .values()
            .find(|u| u.username() == username && u.verify_password(password))
            .map(|u| *u.id())
            .ok_or_else(|| DomainError::permission_denied("invalid credentials"))
    }

    pub fn add_address(&mut self, user_id: UserId, address: Address) -> DomainResult<()> {
        self.user_mut(user_id)?.add_address(address);
        Ok(())
    }

    pub fn add_to_wishlist(&mut self, user_id: UserId, product_id: ProductId) -> DomainResult<()> {
        self.product(product_id)?;
        self.user_mut(user_id)?.wishlist_add(product_id);
        Ok(())
    }

    pub fn remove_from_wishlist(
        &mut self,
        user_id: UserId,
        product_id: ProductId,
    ) -> DomainResult<()> {
        self.user_mut(user_id)?.wishlist_remove(product_id);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Catalog
    // ─────────────────────────────────────────────────────────────────────

    /// Create a category, optionally under a parent. The name must be
    /// unique among its siblings.
    pub fn add_category(
        &mut self,
        name: &str,
        description: &str,
        parent: Option<CategoryId>,
    ) -> DomainResult<CategoryId> {
        if name.trim().is_empty() {
            return Err(DomainError::invalid_value("category name cannot be empty"));
        }
        if let Some(parent_id) = parent {
            self.category(parent_id)?;
        }
        if self
            .categories
            .values()
            .any(|c| c.parent() == parent && c.name() == name)
        {
            return Err(DomainError::duplicate_category(name));
        }

        let category = Category::new(name, description, parent);
        let category_id = *category.id();
        self.categories.insert(category_id, category);
        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.categories.get_mut(&parent_id) {
                parent_node.add_child(category_id);
            }
        }
        info!(%category_id, name, "category added");
        Ok(category_id)
    }

    /// Full path from the root, e.g. `Electronics > Phones`.
    pub fn category_path(&self, category_id: CategoryId) -> DomainResult<String> {
        let mut names = Vec::new();
        let mut cursor = Some(category_id);
        while let Some(id) = cursor {
            let node = self.category(id)?;
            names.push(node.name().to_owned());
            cursor = node.parent();
        }
        names.reverse();
        Ok(names.join(" > "))
    }

    /// Add a product to the catalog. Only vendors may list products.
    pub fn add_product(
        &mut self,
        vendor_id: UserId,
        name: &str,
        description: &str,
        price: Money,
        initial_stock: u32,
        category_id: CategoryId,
        specifications: impl IntoIterator<Item = (String, String)>,
    ) -> DomainResult<ProductId> {
        let vendor = self.user(vendor_id)?;
        if vendor.role() != UserRole::Vendor {
            return Err(DomainError::permission_denied(format!(
                "role {} cannot list products",
                vendor.role()
            )));
        }
        self.category(category_id)?;

        let mut product = Product::new(name, description, price, vendor_id, category_id)?;
        product.add_stock(initial_stock)?;
        for (key, value) in specifications {
            product.add_specification(key, value);
        }

        let product_id = *product.id();
        self.products.insert(product_id, product);
        self.product_order.push(product_id);
        info!(%product_id, name, %price, initial_stock, "product added");
        Ok(product_id)
    }

    pub fn add_stock(&mut self, product_id: ProductId, quantity: u32) -> DomainResult<()> {
        self.product_mut(product_id)?.add_stock(quantity)
    }

    pub fn add_product_image(
        &mut self,
        product_id: ProductId,
        reference: &str,
    ) -> DomainResult<()> {
        self.product_mut(product_id)?.add_image(reference);
        Ok(())
    }

    /// Attach a review to a product. Any registered user may review.
    pub fn add_review(
        &mut self,
        user_id: UserId,
        product_id: ProductId,
        rating: u8,
        comment: &str,
    ) -> DomainResult<()> {
        self.user(user_id)?;
        let review = Review::new(user_id, rating, comment)?;
        self.product_mut(product_id)?.add_review(review);
        Ok(())
    }

    /// Case-insensitive substring search over product name and
    /// description, optionally restricted to one category. Inactive
    /// products are skipped. Results come back in catalog insertion
    /// order.
    pub fn search_products(&self, query: &str, category: Option<CategoryId>) -> Vec<&Product> {
        let results: Vec<&Product> = self
            .product_order
            .iter()
            .filter_map(|id| self.products.get(id))
            .filter(|p| p.is_active())
            .filter(|p| p.matches(query))
            .filter(|p| category.is_none_or(|c| p.category_id() == c))
            .collect();
        debug!(query, hits = results.len(), "product search");
        results
    }

    // ─────────────────────────────────────────────────────────────────────
    // Cart
    // ─────────────────────────────────────────────────────────────────────

    /// Add a product to a customer's cart, merging into an existing line.
    /// The combined line quantity may not exceed available stock.
    pub fn add_to_cart(
        &mut self,
        customer_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> DomainResult<()> {
        let available = self.product(product_id)?.stock_quantity();
        let cart = self.user_mut(customer_id)?.cart_mut()?;
        let requested = cart
            .quantity_of(product_id)
            .checked_add(quantity)
            .ok_or_else(|| DomainError::invalid_value("cart quantity overflow"))?;
        if requested > available {
            return Err(DomainError::insufficient_stock(requested, available));
        }
        cart.add_item(product_id, quantity)
    }

    /// Set the quantity of a cart line; zero removes the line.
    pub fn update_cart_quantity(
        &mut self,
        customer_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> DomainResult<()> {
        let available = self.product(product_id)?.stock_quantity();
        if quantity > available {
            return Err(DomainError::insufficient_stock(quantity, available));
        }
        self.user_mut(customer_id)?
            .cart_mut()?
            .update_quantity(product_id, quantity)
    }

    pub fn remove_from_cart(
        &mut self,
        customer_id: UserId,
        product_id: ProductId,
    ) -> DomainResult<()> {
        self.user_mut(customer_id)?.cart_mut()?.remove_item(product_id);
        Ok(())
    }

    /// Derived cart total at current catalog prices.
    pub fn cart_total(&self, customer_id: UserId) -> DomainResult<Money> {
        self.user(customer_id)?
            .cart()?
            .total_with(|id| self.products.get(&id).map(Product::price))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Orders
    // ─────────────────────────────────────────────────────────────────────

    /// Check out a customer's cart into a new `Pending` order.
    ///
    /// Every line is validated against stock before anything is
    /// decremented; on any failure no stock changes, the cart stays
    /// intact, and no order is created. On success the lines are
    /// snapshotted at current prices and the cart is cleared.
    pub fn place_order(
        &mut self,
        customer_id: UserId,
        shipping_address: Address,
    ) -> DomainResult<OrderId> {
        let cart = self.user(customer_id)?.cart()?;
        if cart.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        let mut lines = Vec::with_capacity(cart.items().len());
        for item in cart.items() {
            let product = self.product(item.product_id())?;
            if item.quantity() > product.stock_quantity() {
                return Err(DomainError::insufficient_stock(
                    item.quantity(),
                    product.stock_quantity(),
                ));
            }
            lines.push(OrderLine::new(
                item.product_id(),
                product.name(),
                item.quantity(),
                product.price(),
            )?);
        }

        // Commit point: every line passed, so decrements cannot fail.
        for line in &lines {
            self.product_mut(line.product_id())?
                .remove_stock(line.quantity())?;
        }

        let order = Order::new(customer_id, lines, shipping_address, Money::ZERO)?;
        let order_id = *order.id();
        let total = order.total()?;
        self.orders.insert(order_id, order);

        let user = self.user_mut(customer_id)?;
        user.record_order(order_id);
        user.cart_mut()?.clear();

        info!(%order_id, %customer_id, %total, "order placed");
        Ok(order_id)
    }

    /// Charge a `Pending` order through the processor registered for the
    /// method. On success the order moves to `Processing` with a
    /// `Completed` payment attached; on validation failure a `Failed`
    /// payment is attached, the order stays `Pending`, and the error is
    /// returned so the caller may retry.
    pub fn process_payment(
        &mut self,
        order_id: OrderId,
        method: PaymentMethod,
        details: &PaymentDetails,
    ) -> DomainResult<()> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| DomainError::not_found(format!("order {order_id}")))?;
        if order.status() != OrderStatus::Pending {
            return Err(DomainError::invalid_transition(
                order.status().to_string(),
                OrderStatus::Processing.to_string(),
            ));
        }

        let processor = self.processors.get(&method).ok_or_else(|| {
            DomainError::payment_validation(format!("no processor registered for {method}"))
        })?;

        let amount = order.total()?;
        if let Err(err) = processor.validate(details) {
            order.record_payment(PaymentResult::failed(method, amount));
            info!(%order_id, %err, "payment rejected");
            return Err(err);
        }

        let payment = processor.charge(amount, details)?;
        order.transition(OrderStatus::Processing)?;
        order.record_payment(payment);
        info!(%order_id, %amount, %method, "payment completed");
        Ok(())
    }

    /// Ship a `Processing` order, generating its tracking number.
    pub fn ship_order(&mut self, order_id: OrderId) -> DomainResult<String> {
        let order = self.order_mut(order_id)?;
        let tracking = order.ship()?.to_owned();
        info!(%order_id, tracking, "order shipped");
        Ok(tracking)
    }

    /// Mark a `Shipped` order as delivered.
    pub fn deliver_order(&mut self, order_id: OrderId) -> DomainResult<()> {
        self.order_mut(order_id)?.transition(OrderStatus::Delivered)?;
        info!(%order_id, "order delivered");
        Ok(())
    }

    /// Cancel a `Pending` or `Processing` order. Every line is restocked,
    /// and a completed payment is refunded through its processor.
    pub fn cancel_order(&mut self, order_id: OrderId) -> DomainResult<()> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| DomainError::not_found(format!("order {order_id}")))?;
        order.transition(OrderStatus::Cancelled)?;

        let lines = order.lines().to_vec();
        let to_refund = order
            .payment()
            .filter(|p| p.status() == PaymentStatus::Completed)
            .cloned();

        for line in &lines {
            self.product_mut(line.product_id())?
                .add_stock(line.quantity())?;
        }

        if let Some(payment) = to_refund {
            let processor = self.processors.get(&payment.method()).ok_or_else(|| {
                DomainError::payment_validation(format!(
                    "no processor registered for {}",
                    payment.method()
                ))
            })?;
            let refunded = processor.refund(&payment)?;
            if let Some(order) = self.orders.get_mut(&order_id) {
                order.record_payment(refunded);
            }
        }

        info!(%order_id, "order cancelled");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn user(&self, user_id: UserId) -> DomainResult<&User> {
        self.users
            .get(&user_id)
            .ok_or_else(|| DomainError::not_found(format!("user {user_id}")))
    }

    pub fn category(&self, category_id: CategoryId) -> DomainResult<&Category> {
        self.categories
            .get(&category_id)
            .ok_or_else(|| DomainError::not_found(format!("category {category_id}")))
    }

    pub fn product(&self, product_id: ProductId) -> DomainResult<&Product> {
        self.products
            .get(&product_id)
            .ok_or_else(|| DomainError::not_found(format!("product {product_id}")))
    }

    pub fn order(&self, order_id: OrderId) -> DomainResult<&Order> {
        self.orders
            .get(&order_id)
            .ok_or_else(|| DomainError::not_found(format!("order {order_id}")))
    }

    fn user_mut(&mut self, user_id: UserId) -> DomainResult<&mut User> {
        self.users
            .get_mut(&user_id)
            .ok_or_else(|| DomainError::not_found(format!("user {user_id}")))
    }

    fn product_mut(&mut self, product_id: ProductId) -> DomainResult<&mut Product> {
        self.products
            .get_mut(&product_id)
            .ok_or_else(|| DomainError::not_found(format!("product {product_id}")))
    }

    fn order_mut(&mut self, order_id: OrderId) -> DomainResult<&mut Order> {
        self.orders
            .get_mut(&order_id)
            .ok_or_else(|| DomainError::not_found(format!("order {order_id}")))
    }
}

impl Default for EcommerceSystem {
    fn default() -> Self {
        Self::new()
    }
}
