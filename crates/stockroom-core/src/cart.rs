//! # Cart
//!
//! An ordered list of (product, quantity) selections submitted to
//! [`Store::order`](crate::store::Store::order).
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Front-end Action         Cart Method            Cart Change            │
//! │  ───────────────          ───────────            ───────────            │
//! │                                                                         │
//! │  Pick product + qty ─────► add() ──────────────► lines.push(line)      │
//! │                                                                         │
//! │  "Already in cart?" ─────► contains_named() ───► (read only)           │
//! │                                                                         │
//! │  Cancel order ───────────► clear() ────────────► lines.clear()         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines keep insertion order and are NOT merged; the store settles
//!   each line independently
//! - A limited product with maximum 1 may appear only once (by name)

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::product::Product;

/// One selection in a cart.
///
/// `product_name` is captured when the line is added so duplicate
/// checks and error messages work without a store lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
}

/// The shopping cart.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Appends a line for `quantity` units of `product`.
    ///
    /// Quantity and stock are NOT validated here; settlement does that.
    /// The only rule enforced is the single-unit one: a limited product
    /// whose maximum is 1 cannot be added twice.
    pub fn add(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if product.maximum() == Some(1) && self.contains_named(product.name()) {
            return Err(CoreError::PurchaseLimitExceeded {
                product: product.name().to_string(),
                maximum: 1,
                requested: self.quantity_named(product.name()).saturating_add(quantity),
            });
        }

        self.lines.push(CartLine {
            product_id: product.id().to_string(),
            product_name: product.name().to_string(),
            quantity,
        });
        Ok(())
    }

    /// Whether any line refers to a product with this name.
    pub fn contains_named(&self, name: &str) -> bool {
        self.lines.iter().any(|line| line.product_name == name)
    }

    /// Summed quantity of all lines for a product name, saturating at
    /// `i64::MAX`.
    pub fn quantity_named(&self, name: &str) -> i64 {
        self.lines
            .iter()
            .filter(|line| line.product_name == name)
            .fold(0_i64, |sum, line| sum.saturating_add(line.quantity))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
