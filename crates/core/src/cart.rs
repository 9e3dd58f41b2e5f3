//! In-memory cart store.
//!
//! The cart is a pure state container: an ordered list of (product, quantity)
//! lines plus an orthogonal drawer-visibility flag. It lives in the visitor's
//! session for the duration of that session and is never persisted. None of
//! the operations can fail - inputs come from the in-process catalog, so there
//! is no validation layer here.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// A single cart line: a product and a positive quantity.
///
/// Invariant: `quantity >= 1`. A decrement to zero removes the line instead
/// of storing a zero quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal: price × quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// The cart: ordered lines plus the drawer-open flag.
///
/// Invariant: at most one line per distinct product ID - adding a product
/// that is already in the cart merges into the existing line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    drawer_open: bool,
}

impl Cart {
    /// Create an empty cart with the drawer closed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            drawer_open: false,
        }
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// True when the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of a product.
    ///
    /// Merges into the existing line when the product is already in the cart,
    /// otherwise appends a new line. No inventory check, no price re-fetch.
    pub fn add(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine { product, quantity });
        }
    }

    /// Add a single unit of a product.
    pub fn add_one(&mut self, product: Product) {
        self.add(product, 1);
    }

    /// Remove the line for a product. No-op when absent.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|l| &l.product.id != product_id);
    }

    /// Set the quantity of a line. Zero removes the line; there is no upper
    /// bound. No-op when the product is not in the cart.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| &l.product.id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart. The drawer flag is independent and not reset here.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total across all lines; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of quantities across all lines (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Drawer visibility.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.drawer_open
    }

    /// Open the slide-in drawer (add-to-cart does this).
    pub const fn open_drawer(&mut self) {
        self.drawer_open = true;
    }

    /// Close the slide-in drawer (explicit close or overlay click).
    pub const fn close_drawer(&mut self) {
        self.drawer_open = false;
    }
}

/// A confirmed order summary.
///
/// Orders are not sent anywhere - checkout logs the summary and clears the
/// cart. Kept as a type so the log line has a stable, serializable shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub customer_name: String,
    pub phone_number: String,
    pub lines: Vec<CartLine>,
    pub total: Price,
}

impl Order {
    /// Build an order summary from the current cart contents.
    #[must_use]
    pub fn from_cart(cart: &Cart, customer_name: String, phone_number: String) -> Self {
        Self {
            customer_name,
            phone_number,
            lines: cart.lines().to_vec(),
            total: cart.total(),
        }
    }
}
