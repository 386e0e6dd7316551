//! # Promotions
//!
//! Pricing strategies that replace `unit price × quantity` for a single
//! purchase. A promotion is a pure function of the product's unit price
//! and the purchased quantity: it never touches stock.
//!
//! ## Variants
//! ```text
//! ┌──────────────────┬──────────────────────────────────────────────────────┐
//! │ PercentDiscount  │ price × q × (1 − percent/100)                        │
//! │ SecondHalfPrice  │ ceil(q/2) × price + floor(q/2) × price × 0.5         │
//! │ ThirdOneFree     │ (q − floor(q/3)) × price                             │
//! └──────────────────┴──────────────────────────────────────────────────────┘
//! ```
//!
//! Each line is rounded to the nearest cent exactly once. A line whose
//! price leaves the money range fails with `CoreError::AmountOverflow`
//! instead of wrapping.

use serde::Serialize;
use std::fmt;

use crate::error::CoreResult;
use crate::money::Money;
use crate::product::Product;
use crate::validation::{validate_percent, ValidationResult};

/// A promotional pricing rule attachable to a [`Product`].
///
/// Immutable once constructed. A product holds at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Promotion {
    /// Flat percentage off the whole line.
    PercentDiscount {
        name: String,
        /// Normalized percent: 3000 = 30%.
        percent_bps: u32,
    },
    /// Every second unit is half price.
    SecondHalfPrice { name: String },
    /// Every third unit is free.
    ThirdOneFree { name: String },
}

impl Promotion {
    /// Creates a percentage discount.
    ///
    /// ```rust
    /// use stockroom_core::Promotion;
    ///
    /// let promo = Promotion::percent_discount("30% off!", 30.0).unwrap();
    /// assert_eq!(promo.name(), "30% off!");
    /// assert!(Promotion::percent_discount("bad", -1.0).is_err());
    /// ```
    pub fn percent_discount(name: impl Into<String>, percent: f64) -> ValidationResult<Self> {
        let percent_bps = validate_percent(percent)?;
        Ok(Promotion::PercentDiscount {
            name: name.into(),
            percent_bps,
        })
    }

    /// Creates a "second item at half price" promotion.
    pub fn second_half_price(name: impl Into<String>) -> Self {
        Promotion::SecondHalfPrice { name: name.into() }
    }

    /// Creates a "buy two, get the third free" promotion.
    pub fn third_one_free(name: impl Into<String>) -> Self {
        Promotion::ThirdOneFree { name: name.into() }
    }

    /// Display label of the promotion.
    pub fn name(&self) -> &str {
        match self {
            Promotion::PercentDiscount { name, .. }
            | Promotion::SecondHalfPrice { name }
            | Promotion::ThirdOneFree { name } => name,
        }
    }

    /// Computes the promotional price of `quantity` units of `product`.
    ///
    /// Only `product.price()` is read. Negative quantities price as zero;
    /// `Product::buy` rejects them before a promotion is ever consulted.
    pub fn apply(&self, product: &Product, quantity: i64) -> CoreResult<Money> {
        let qty = quantity.max(0);
        let unit = product.price();

        let amount = match self {
            Promotion::PercentDiscount { percent_bps, .. } => unit
                .multiply_quantity(qty)
                .and_then(|line| line.apply_percentage_discount(*percent_bps)),
            Promotion::SecondHalfPrice { .. } => {
                // ceil(q/2) full-price units and floor(q/2) half-price units
                let full_price = i128::from(qty / 2 + qty % 2);
                let half_price = i128::from(qty / 2);
                (2 * full_price + half_price)
                    .checked_mul(i128::from(unit.cents()))
                    .and_then(Money::from_half_cents)
            }
            Promotion::ThirdOneFree { .. } => unit.multiply_quantity(qty - qty / 3),
        };

        amount.ok_or_else(|| product.amount_overflow(quantity))
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
