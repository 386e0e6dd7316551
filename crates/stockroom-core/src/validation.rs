//! # Validation Module
//!
//! Input validation rules shared by product construction, mutation and
//! settlement. Every check runs before any state changes, so a failed
//! validation never leaves a half-applied mutation behind.
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{validate_product_name, validate_quantity};
//!
//! assert!(validate_product_name("Google Pixel 7").is_ok());
//! assert!(validate_quantity(-1, "quantity").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace-only
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a non-negative integer such as a stock level, a purchase
/// quantity or a per-transaction maximum.
///
/// `field` names the value in the error message.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  buy(quantity)                                                          │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(quantity, "quantity to buy") ← THIS FUNCTION        │
/// │       │                                                                 │
/// │       ├── qty < 0? → Error: "quantity to buy cannot be negative"        │
/// │       │                                                                 │
/// │       └── OK → limit check → stock check → settle                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64, field: &str) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ```rust
/// use stockroom_core::money::Money;
/// use stockroom_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount percentage and normalizes it to basis points.
///
/// ## Rules
/// - Must be a finite number
/// - Must be between 0 and 100 inclusive
/// - Fractions are kept to two decimal places (12.5% → 1250 bps)
pub fn validate_percent(percent: f64) -> ValidationResult<u32> {
    if !percent.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "percent".to_string(),
            reason: "must be a number".to_string(),
        });
    }

    if percent < 0.0 {
        return Err(ValidationError::Negative {
            field: "percent".to_string(),
        });
    }

    if percent > 100.0 {
        return Err(ValidationError::OutOfRange {
            field: "percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok((percent * 100.0).round() as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================
