//! # stockroom-core: Pure Business Logic for Stockroom
//!
//! This crate models a small retail store: products with stock levels,
//! purchase rules and optional promotional pricing, and the order
//! settlement that turns a cart into a charge while mutating stock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    stockroom-cli (text menu)                    │   │
//! │  │    List ──► Total stock ──► Make order ──► Quit                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │ promotion │  │   store   │  │   money   │  │   │
//! │  │   │  Product  │  │ Promotion │  │   Store   │  │   Money   │  │   │
//! │  │   │  Kind     │  │           │  │  Receipt  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`promotion`] - Pricing strategies applied to a purchase
//! - [`product`] - Stock-keeping products and their settlement rules
//! - [`cart`] - Ordered (product, quantity) selections
//! - [`receipt`] - Settled order record
//! - [`store`] - Product collection and order settlement
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{Cart, Money, Product, Promotion, Store};
//!
//! let mut laptop = Product::new("MacBook Air M2", Money::from_major_minor(1450, 0), 100).unwrap();
//! laptop.set_promotion(Promotion::second_half_price("Second Half price!"));
//!
//! let mut cart = Cart::new();
//! cart.add(&laptop, 2).unwrap();
//!
//! let mut store = Store::new(vec![laptop]);
//! let total = store.order(&cart).unwrap();
//!
//! assert_eq!(total, Money::from_major_minor(2175, 0));
//! assert_eq!(store.total_quantity(), 98);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod product;
pub mod promotion;
pub mod receipt;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use product::{Product, ProductKind};
pub use promotion::Promotion;
pub use receipt::{Receipt, ReceiptLine};
pub use store::{SettlementPolicy, Store};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Basis points in one hundred percent.
///
/// Percent discounts are stored normalized as basis points
/// (1% = 100 bps) so promotion math stays in integers.
pub const BPS_PER_WHOLE: u32 = 10_000;
