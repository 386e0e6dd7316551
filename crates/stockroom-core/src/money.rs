//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Promotions make it worse:                                              │
//! │    3 × $0.99 with "second half price" = $2.475                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Promotion math runs in i128 and rounds ONCE per line                 │
//! │    3 × 99 cents → 2 × 99 + 49.5 → 248 cents                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let doubled = price.multiply_quantity(2).unwrap(); // $21.98
//! assert_eq!(doubled.cents(), 2198);
//!
//! // Text input from a front-end
//! let parsed = Money::parse("$10.99").unwrap();
//! assert_eq!(parsed, price);
//!
//! // Amounts past the i64 range are refused, never wrapped
//! assert!(price.multiply_quantity(i64::MAX).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::validation::ValidationResult;
use crate::BPS_PER_WHOLE;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative text parses so validation can name it;
///   product prices are validated non-negative at construction
/// - **Checked arithmetic**: every operation that can leave the i64 range
///   returns `Option`, so a huge quantity is refused instead of wrapping
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// `from_major_minor(1450, 0)` = $1450.00
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        Money(major * 100 + minor)
    }

    /// Parses decimal text such as `"1450"`, `"12.5"` or `"$12.50"`.
    ///
    /// ## Rules
    /// - Optional leading `$` and surrounding whitespace are ignored
    /// - At most two fractional digits (no silent rounding of input)
    /// - A leading `-` is accepted here; price validation rejects it later
    ///
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// assert_eq!(Money::parse("12.5").unwrap().cents(), 1250);
    /// assert_eq!(Money::parse("1450").unwrap().cents(), 145_000);
    /// assert!(Money::parse("twelve").is_err());
    /// assert!(Money::parse("1.999").is_err());
    /// ```
    pub fn parse(text: &str) -> ValidationResult<Money> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let digits = unsigned.strip_prefix('$').unwrap_or(unsigned);

        let (major_text, minor_text) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if major_text.is_empty() && minor_text.is_empty() {
            return Err(invalid("must be a number"));
        }
        if !all_digits(major_text) || !all_digits(minor_text) {
            return Err(invalid("must be a number"));
        }
        if minor_text.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let major: i64 = if major_text.is_empty() {
            0
        } else {
            major_text.parse().map_err(|_| invalid("amount is too large"))?
        };
        let minor: i64 = match minor_text.len() {
            0 => 0,
            1 => minor_text.parse::<i64>().map_err(|_| invalid("must be a number"))? * 10,
            _ => minor_text.parse().map_err(|_| invalid("must be a number"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts. `None` when the sum leaves the `i64` range.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiplies money by a quantity. `None` on overflow.
    ///
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).unwrap().cents(), 897);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (3000 = 30%), capped at 100%
    ///
    /// The discount itself is rounded to the nearest cent (half away
    /// from zero) and then subtracted, so the result is never off by
    /// more than half a cent.
    ///
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(10_000); // $100.00
    /// let discounted = subtotal.apply_percentage_discount(3000).unwrap(); // 30% off
    /// assert_eq!(discounted.cents(), 7000);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Option<Money> {
        let bps = discount_bps.min(BPS_PER_WHOLE);
        let discount = round_div(
            i128::from(self.0) * i128::from(bps),
            i128::from(BPS_PER_WHOLE),
        )?;
        self.0.checked_sub(discount).map(Money)
    }

    /// Builds an amount from a count of half-cents, rounding once.
    ///
    /// Used by promotions that price some units at 50%: they sum the
    /// line in half-cents and convert back exactly once. `None` when the
    /// rounded amount does not fit in `i64` cents.
    pub(crate) fn from_half_cents(half_cents: i128) -> Option<Money> {
        round_div(half_cents, 2).map(Money)
    }
}

/// Integer division rounding half away from zero, narrowed to `i64`.
fn round_div(numerator: i128, denominator: i128) -> Option<i64> {
    let half = denominator / 2;
    let shifted = if numerator >= 0 {
        numerator.checked_add(half)?
    } else {
        numerator.checked_sub(half)?
    };
    i64::try_from(shifted / denominator).ok()
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$10.99` / `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(145_000)), "$1450.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_parse_accepts_decimal_text() {
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(" $10.05 ").unwrap().cents(), 1005);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("0").unwrap(), Money::zero());
        assert_eq!(Money::parse("-3.25").unwrap().cents(), -325);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for bad in ["", "  ", "abc", "1.2.3", "1,000", "1.234", "$", ".", "1e3"] {
            let err = Money::parse(bad).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "price"),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
        assert_eq!(a.multiply_quantity(3), Some(Money::from_cents(3000)));
        assert_eq!(a.multiply_quantity(0), Some(Money::zero()));
    }

    #[test]
    fn test_overflow_is_refused() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(12_500).multiply_quantity(i64::MAX / 100), None);
        assert_eq!(Money::from_cents(1).multiply_quantity(i64::MAX), Some(max));
    }

    #[test]
    fn test_percentage_discount() {
        let subtotal = Money::from_cents(10_000);
        assert_eq!(subtotal.apply_percentage_discount(3000), Some(Money::from_cents(7000)));
        assert_eq!(subtotal.apply_percentage_discount(0), Some(subtotal));
        assert_eq!(subtotal.apply_percentage_discount(10_000), Some(Money::zero()));
        // capped at 100%
        assert_eq!(subtotal.apply_percentage_discount(25_000), Some(Money::zero()));
        // the full i64 range stays exact
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.apply_percentage_discount(0), Some(max));
    }

    #[test]
    fn test_percentage_discount_rounds_discount_once() {
        // 12.5% of 99 cents = 12.375 → 12, leaving 87
        assert_eq!(Money::from_cents(99).apply_percentage_discount(1250).unwrap().cents(), 87);
        // 50% of 1 cent = 0.5 → 1, leaving 0
        assert_eq!(Money::from_cents(1).apply_percentage_discount(5000).unwrap().cents(), 0);
    }

    #[test]
    fn test_from_half_cents_rounds_half_up() {
        assert_eq!(Money::from_half_cents(495).unwrap().cents(), 248);
        assert_eq!(Money::from_half_cents(494).unwrap().cents(), 247);
        assert_eq!(Money::from_half_cents(0), Some(Money::zero()));
    }

    #[test]
    fn test_from_half_cents_refuses_out_of_range() {
        let max = i128::from(i64::MAX);
        assert_eq!(Money::from_half_cents(2 * max), Some(Money::from_cents(i64::MAX)));
        assert_eq!(Money::from_half_cents(2 * max + 2), None);
        assert_eq!(Money::from_half_cents(i128::MAX), None);
    }
}
