//! # Sale Records
//!
//! The immutable result of a checkout, and the sink that keeps them.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. CHECKOUT                                                           │
//! │     └── Cart::checkout() → SaleRecord { receipt_number: None }         │
//! │                                                                         │
//! │  2. RECORD                                                             │
//! │     └── SaleSink::record() → SaleRecord { receipt_number: Some(..) }   │
//! │                                                                         │
//! │  3. PRINT                                                              │
//! │     └── ReceiptRenderer::render(&record)                               │
//! │                                                                         │
//! │  4. REPORT                                                             │
//! │     └── report::* read the sales history                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A record owns copies of its lines and has no setters. The only way to
//! derive a different record is [`SaleRecord::with_receipt_number`], which
//! consumes the original.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::CartLine;
use crate::money::Money;
use crate::quantity::Quantity;

/// A committed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleRecord {
    id: String,
    receipt_number: Option<String>,
    seller_id: String,
    lines: Vec<CartLine>,
    total: Money,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl SaleRecord {
    /// Builds a record from lines, computing the exact total.
    pub fn new(
        seller_id: impl Into<String>,
        lines: Vec<CartLine>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total = lines.iter().map(CartLine::line_total).sum();
        SaleRecord {
            id: Uuid::new_v4().to_string(),
            receipt_number: None,
            seller_id: seller_id.into(),
            lines,
            total,
            created_at,
        }
    }

    /// Returns this record stamped with a receipt number.
    pub fn with_receipt_number(self, receipt_number: impl Into<String>) -> Self {
        SaleRecord {
            receipt_number: Some(receipt_number.into()),
            ..self
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Assigned by the sale sink; `None` until recorded.
    pub fn receipt_number(&self) -> Option<&str> {
        self.receipt_number.as_deref()
    }

    pub fn seller_id(&self) -> &str {
        &self.seller_id
    }

    /// Lines in cart order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Exact total, unrounded.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Calendar date (UTC) the sale falls on, used by reports.
    pub fn date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Sum of line quantities.
    pub fn total_quantity(&self) -> Quantity {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// Receives committed sales.
///
/// The cart only produces records; keeping them (and numbering them) is the
/// sink's job.
pub trait SaleSink {
    /// Stores the record and returns the stored copy.
    fn record(&mut self, sale: SaleRecord) -> SaleRecord;
}

impl SaleSink for Vec<SaleRecord> {
    fn record(&mut self, sale: SaleRecord) -> SaleRecord {
        self.push(sale.clone());
        sale
    }
}
