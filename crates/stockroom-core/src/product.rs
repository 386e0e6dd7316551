//! # Products
//!
//! Stock-keeping entities and their purchase settlement.
//!
//! ## Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          ProductKind                                    │
//! │                                                                         │
//! │  Standard      quantity-tracked, no extra purchase constraint           │
//! │  NonStocked    quantity pinned to 0, never checked or deducted,         │
//! │                set_quantity() is a hard error                           │
//! │  Limited       Standard + per-transaction maximum, checked first        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Settlement (`buy`)
//! ```text
//! buy(q)
//!   │
//!   ├── q < 0?                      → ValidationError
//!   ├── Limited and q > maximum?    → PurchaseLimitExceeded
//!   ├── stocked and q > quantity?   → InsufficientStock   (stock untouched)
//!   ├── price: promotion.apply(self, q)  or  q × price
//!   │     └── out of money range?   → AmountOverflow      (stock untouched)
//!   │
//!   └── stocked: quantity -= q; quantity == 0 → deactivate
//! ```
//!
//! Pricing is a read-only step computed before the stock mutation, so a
//! failed purchase never moves stock and the mutation happens exactly once.
//!
//! ## Activation
//! A product deactivates when its quantity reaches zero through `buy` or
//! `set_quantity(0)`. Setting a positive quantity afterwards does NOT
//! reactivate it; only [`Product::activate`] does.

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::promotion::Promotion;
use crate::validation::{validate_price, validate_product_name, validate_quantity, ValidationResult};

// =============================================================================
// Product Kind
// =============================================================================

/// Which purchase rules a product follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductKind {
    /// Quantity-tracked, no extra constraint.
    Standard,
    /// Non-physical: no stock to check or deduct.
    NonStocked,
    /// Quantity-tracked with a per-transaction maximum.
    Limited { maximum: i64 },
}

// =============================================================================
// Product
// =============================================================================

/// A product offered by the store.
///
/// ## Dual-Key Identity
/// - `id`: UUID v4, assigned at construction, used by carts and the store
/// - `name`: human-readable, used for display and cart de-duplication
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    id: String,
    name: String,
    price: Money,
    quantity: i64,
    active: bool,
    kind: ProductKind,
    promotion: Option<Promotion>,
}

impl Product {
    /// Creates a standard, quantity-tracked product.
    ///
    /// ```rust
    /// use stockroom_core::{Money, Product};
    ///
    /// let phone = Product::new("Google Pixel 7", Money::from_major_minor(500, 0), 250).unwrap();
    /// assert_eq!(phone.quantity(), 250);
    /// assert!(phone.is_active());
    ///
    /// assert!(Product::new("", Money::zero(), 1).is_err());
    /// assert!(Product::new("Phone", Money::from_cents(-1), 1).is_err());
    /// assert!(Product::new("Phone", Money::zero(), -1).is_err());
    /// ```
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> ValidationResult<Self> {
        Self::build(name.into(), price, quantity, ProductKind::Standard)
    }

    /// Creates a non-stocked product (licenses, services). Quantity is 0.
    pub fn non_stocked(name: impl Into<String>, price: Money) -> ValidationResult<Self> {
        Self::build(name.into(), price, 0, ProductKind::NonStocked)
    }

    /// Creates a product capped at `maximum` units per purchase.
    pub fn limited(
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        maximum: i64,
    ) -> ValidationResult<Self> {
        validate_quantity(maximum, "maximum")?;
        Self::build(name.into(), price, quantity, ProductKind::Limited { maximum })
    }

    fn build(name: String, price: Money, quantity: i64, kind: ProductKind) -> ValidationResult<Self> {
        validate_product_name(&name)?;
        validate_price(price)?;
        validate_quantity(quantity, "quantity")?;

        Ok(Product {
            id: Uuid::new_v4().to_string(),
            name,
            price,
            quantity,
            active: true,
            kind,
            promotion: None,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Current stock level. Always 0 for non-stocked products, which
    /// says nothing about whether a promotion applies.
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[inline]
    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    /// Per-transaction maximum, for limited products.
    pub fn maximum(&self) -> Option<i64> {
        match self.kind {
            ProductKind::Limited { maximum } => Some(maximum),
            _ => None,
        }
    }

    /// Whether purchases check and deduct stock.
    #[inline]
    pub fn is_stocked(&self) -> bool {
        !matches!(self.kind, ProductKind::NonStocked)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Sets the stock level directly.
    ///
    /// Deactivates on 0 but never reactivates; see the module docs.
    pub fn set_quantity(&mut self, quantity: i64) -> CoreResult<()> {
        if !self.is_stocked() {
            return Err(CoreError::QuantityNotAdjustable {
                product: self.name.clone(),
            });
        }

        validate_quantity(quantity, "quantity")?;
        self.quantity = quantity;
        if self.quantity == 0 {
            self.active = false;
        }
        Ok(())
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Attaches a promotion, replacing any existing one.
    pub fn set_promotion(&mut self, promotion: Promotion) {
        self.promotion = Some(promotion);
    }

    /// Removes the promotion, restoring `quantity × price` pricing.
    pub fn clear_promotion(&mut self) -> Option<Promotion> {
        self.promotion.take()
    }

    // -------------------------------------------------------------------------
    // Settlement
    // -------------------------------------------------------------------------

    /// Runs every check `buy` would run, without mutating anything.
    pub fn check_purchase(&self, quantity: i64) -> CoreResult<()> {
        self.price_purchase(quantity).map(|_| ())
    }

    /// Validates a purchase of `quantity` units and prices it.
    pub(crate) fn price_purchase(&self, quantity: i64) -> CoreResult<Money> {
        validate_quantity(quantity, "quantity to buy")?;

        if let ProductKind::Limited { maximum } = self.kind {
            if quantity > maximum {
                return Err(CoreError::PurchaseLimitExceeded {
                    product: self.name.clone(),
                    maximum,
                    requested: quantity,
                });
            }
        }

        if self.is_stocked() && quantity > self.quantity {
            return Err(CoreError::InsufficientStock {
                product: self.name.clone(),
                available: self.quantity,
                requested: quantity,
            });
        }

        self.settlement_price(quantity)
    }

    /// Settles a purchase: deducts stock and returns the amount charged.
    ///
    /// ```rust
    /// use stockroom_core::{Money, Product};
    ///
    /// let mut earbuds = Product::new("Bose QuietComfort Earbuds", Money::from_cents(25_000), 2).unwrap();
    /// assert_eq!(earbuds.buy(2).unwrap(), Money::from_cents(50_000));
    /// assert_eq!(earbuds.quantity(), 0);
    /// assert!(!earbuds.is_active());
    ///
    /// // Over-stock purchases fail and leave stock alone
    /// assert!(earbuds.buy(1).is_err());
    /// assert_eq!(earbuds.quantity(), 0);
    /// ```
    pub fn buy(&mut self, quantity: i64) -> CoreResult<Money> {
        let amount = self.price_purchase(quantity)?;

        if self.is_stocked() {
            self.quantity -= quantity;
            if self.quantity == 0 {
                self.active = false;
            }
        }

        Ok(amount)
    }

    /// Price of `quantity` units under the current promotion, if any.
    pub fn settlement_price(&self, quantity: i64) -> CoreResult<Money> {
        match &self.promotion {
            Some(promotion) => promotion.apply(self, quantity),
            None => self
                .price
                .multiply_quantity(quantity)
                .ok_or_else(|| self.amount_overflow(quantity)),
        }
    }

    pub(crate) fn amount_overflow(&self, quantity: i64) -> CoreError {
        CoreError::AmountOverflow {
            product: self.name.clone(),
            quantity,
        }
    }

    // -------------------------------------------------------------------------
    // Display
    // -------------------------------------------------------------------------

    /// Human-readable summary: name, price, stock (or non-stocked status),
    /// maximum for limited products, and the promotion name if any.
    pub fn show(&self) -> String {
        let mut line = format!("{}, Price: {}", self.name, self.price);

        match self.kind {
            ProductKind::Standard => {
                line.push_str(&format!(", Quantity: {}", self.quantity));
            }
            ProductKind::NonStocked => {
                line.push_str(", non-physical product - Not Stocked");
            }
            ProductKind::Limited { maximum } => {
                line.push_str(&format!(
                    ", Quantity: {}, Max Purchase: {}",
                    self.quantity, maximum
                ));
            }
        }

        if let Some(promotion) = &self.promotion {
            line.push_str(&format!(", Promotion: {}", promotion.name()));
        }

        line
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.show())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
