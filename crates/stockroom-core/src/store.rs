//! # Store
//!
//! An ordered collection of products plus order settlement.
//!
//! ## Order Settlement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order(cart)                                                            │
//! │                                                                         │
//! │  for (product_id, qty) in cart:                                        │
//! │      product = lookup(product_id)     ── missing → ProductNotFound     │
//! │      total += product.buy(qty)        ── failure → return Err          │
//! │      total past the i64 range         ── TotalOverflow                  │
//! │                                                                         │
//! │  return total                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency Policies
//! - [`SettlementPolicy::NoRollback`] (used by [`Store::order`]): lines
//!   before a failing line keep their stock mutation. The first failure
//!   aborts the rest of the cart and is returned as-is.
//! - [`SettlementPolicy::AllOrNothing`] (used by [`Store::order_atomic`]):
//!   the whole cart is checked against current stock first; on failure
//!   nothing is mutated.
//!
//! Single-threaded by construction: settlement takes `&mut self`, so
//! concurrent callers must serialize access to the store themselves.

use std::collections::HashMap;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::Product;
use crate::receipt::{Receipt, ReceiptLine};

/// How a partially failing cart is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettlementPolicy {
    /// Settle line by line; earlier lines stay settled on failure.
    #[default]
    NoRollback,
    /// Validate the whole cart first; mutate only if every line passes.
    AllOrNothing,
}

/// The store's product collection.
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: Vec<Product>,
}

impl Store {
    /// Creates a store holding `products` in the given order.
    pub fn new(products: Vec<Product>) -> Self {
        Store { products }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Active products, in insertion order.
    pub fn active_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_active()).collect()
    }

    /// Every held product, active or not, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Sum of the quantities of ALL held products, active or not.
    ///
    /// Saturates at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.products
            .iter()
            .fold(0_i64, |total, p| total.saturating_add(p.quantity()))
    }

    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == product_id)
    }

    pub fn get_mut(&mut self, product_id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == product_id)
    }

    /// First product with this name.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name() == name)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    pub fn add_product(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Removes a product by id. Absent products are a no-op (`None`).
    pub fn remove_product(&mut self, product_id: &str) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id() == product_id)?;
        Some(self.products.remove(index))
    }

    // -------------------------------------------------------------------------
    // Settlement
    // -------------------------------------------------------------------------

    /// Settles a cart line by line and returns the total charged.
    ///
    /// No rollback: if a line fails, earlier lines have already
    /// mutated stock and the failure is returned unchanged.
    ///
    /// ```rust
    /// use stockroom_core::{Cart, CoreError, Money, Product, Store};
    ///
    /// let a = Product::new("A", Money::from_cents(100), 10).unwrap();
    /// let b = Product::new("B", Money::from_cents(100), 5).unwrap();
    /// let (a_id, b_id) = (a.id().to_string(), b.id().to_string());
    ///
    /// let mut cart = Cart::new();
    /// cart.add(&a, 2).unwrap();
    /// cart.add(&b, 1000).unwrap();
    ///
    /// let mut store = Store::new(vec![a, b]);
    /// let err = store.order(&cart).unwrap_err();
    ///
    /// assert!(matches!(err, CoreError::InsufficientStock { .. }));
    /// assert_eq!(store.get(&a_id).unwrap().quantity(), 8); // kept
    /// assert_eq!(store.get(&b_id).unwrap().quantity(), 5);
    /// ```
    pub fn order(&mut self, cart: &Cart) -> CoreResult<Money> {
        self.checkout(cart, SettlementPolicy::NoRollback)
            .map(|receipt| receipt.total)
    }

    /// Settles a cart only if every line can be settled.
    pub fn order_atomic(&mut self, cart: &Cart) -> CoreResult<Money> {
        self.checkout(cart, SettlementPolicy::AllOrNothing)
            .map(|receipt| receipt.total)
    }

    /// Settles a cart under `policy` and returns the receipt.
    pub fn checkout(&mut self, cart: &Cart, policy: SettlementPolicy) -> CoreResult<Receipt> {
        if policy == SettlementPolicy::AllOrNothing {
            self.preflight(cart)?;
        }

        let mut lines = Vec::with_capacity(cart.len());
        for line in cart {
            let product = self
                .get_mut(&line.product_id)
                .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;

            let amount = product.buy(line.quantity)?;
            lines.push(ReceiptLine {
                product_id: line.product_id.clone(),
                product_name: product.name().to_string(),
                quantity: line.quantity,
                amount,
                promotion: product.promotion().map(|p| p.name().to_string()),
            });
        }

        Receipt::from_lines(lines)
    }

    /// Checks every line without mutating anything.
    ///
    /// Per-line rules (sign, maximum, stock, price range) run against each
    /// line; stock is then checked again against the summed demand per
    /// product, since repeated lines for one product draw from the same
    /// shelf. The order total must fit in the money range as well.
    fn preflight(&self, cart: &Cart) -> CoreResult<()> {
        // Summed in i128 so any number of i64 lines adds up exactly.
        let mut demand: HashMap<&str, i128> = HashMap::new();
        let mut total = Money::zero();

        for line in cart {
            let product = self
                .get(&line.product_id)
                .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;
            let amount = product.price_purchase(line.quantity)?;
            total = total
                .checked_add(amount)
                .ok_or(CoreError::TotalOverflow)?;
            *demand.entry(product.id()).or_insert(0) += i128::from(line.quantity);
        }

        // Walk the cart again so the reported product is deterministic.
        for line in cart {
            let (Some(product), Some(&requested)) = (
                self.get(&line.product_id),
                demand.get(line.product_id.as_str()),
            ) else {
                continue;
            };
            if product.is_stocked() && requested > i128::from(product.quantity()) {
                return Err(CoreError::InsufficientStock {
                    product: product.name().to_string(),
                    available: product.quantity(),
                    requested: i64::try_from(requested).unwrap_or(i64::MAX),
                });
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
