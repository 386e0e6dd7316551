//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── ValidationError  - Bad name / price / quantity / maximum          │
//! │  └── CoreError        - Settlement and state failures                  │
//! │      ├── recoverable:   Validation, InsufficientStock,                 │
//! │      │                  PurchaseLimitExceeded, AmountOverflow,         │
//! │      │                  TotalOverflow                                  │
//! │      └── fatal to call: QuantityNotAdjustable, ProductNotFound         │
//! │                                                                         │
//! │  stockroom-cli errors (separate crate)                                 │
//! │  └── CliError         - Config, catalog, I/O, wrapped CoreError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities)
//! 3. Errors are enum variants, never String
//! 4. The core never logs and never retries; callers decide

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A cart line names a product the store does not hold.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Insufficient stock to complete a purchase.
    ///
    /// ## User Workflow
    /// ```text
    /// buy(5) on "Google Pixel 7" with 3 in stock
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Google Pixel 7", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Stock untouched, caller re-prompts with a smaller quantity
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Requested quantity is above a capped product's per-transaction maximum.
    ///
    /// Checked before stock, so it fails even when plenty is on the shelf.
    #[error("Cannot purchase more than {maximum} of {product} at a time (requested {requested})")]
    PurchaseLimitExceeded {
        product: String,
        maximum: i64,
        requested: i64,
    },

    /// The price of one line does not fit in the money range.
    ///
    /// Priced before any stock moves, so the product is left untouched.
    #[error("Price of {quantity} x {product} is too large to charge")]
    AmountOverflow { product: String, quantity: i64 },

    /// The sum of an order's lines does not fit in the money range.
    #[error("Order total is too large to charge")]
    TotalOverflow,

    /// Attempted to set the quantity of a non-stocked product.
    #[error("{product} is not stocked; its quantity cannot be changed")]
    QuantityNotAdjustable { product: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Whether retrying with corrected input can succeed.
    ///
    /// Stock, limit and validation failures are recoverable. Setting the
    /// quantity of a non-stocked product is categorically disallowed, and
    /// a missing product will not reappear by retrying the same cart.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::Validation(_)
            | CoreError::InsufficientStock { .. }
            | CoreError::PurchaseLimitExceeded { .. }
            | CoreError::AmountOverflow { .. }
            | CoreError::TotalOverflow => true,
            CoreError::QuantityNotAdjustable { .. } | CoreError::ProductNotFound(_) => false,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at construction or mutation time, before any state changes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. non-numeric price text).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
