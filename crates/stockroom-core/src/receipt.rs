//! # Receipts
//!
//! The record of a settled order: one line per cart line, in cart order,
//! with the amount each `buy` returned.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// One settled cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    /// Amount charged for this line (promotion applied).
    pub amount: Money,
    /// Name of the promotion that priced this line, if any.
    pub promotion: Option<String>,
}

/// A settled order.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// When settlement finished.
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<ReceiptLine>,
    /// Sum of all line amounts.
    pub total: Money,
}

impl Receipt {
    /// Fails with `TotalOverflow` when the lines sum past the money range.
    pub(crate) fn from_lines(lines: Vec<ReceiptLine>) -> CoreResult<Self> {
        let total = lines
            .iter()
            .try_fold(Money::zero(), |total, line| total.checked_add(line.amount))
            .ok_or(CoreError::TotalOverflow)?;

        Ok(Receipt {
            id: Uuid::new_v4().to_string(),
            placed_at: Utc::now(),
            lines,
            total,
        })
    }

    /// Total number of units across all lines, saturating at `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |count, line| count.saturating_add(line.quantity))
    }
}
