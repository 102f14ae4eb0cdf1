//! # Sale Repository
//!
//! The sales history and receipt numbering.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Recording                                         │
//! │                                                                         │
//! │  Cart::checkout() → SaleRecord { receipt_number: None }                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SaleRepository::insert()                                              │
//! │     ├── bump the counter for the sale's date                           │
//! │     ├── stamp "YYYYMMDD-RR-NNNN"                                       │
//! │     └── append to history                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SaleRecord { receipt_number: Some("20261018-01-0003") }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are never edited or removed once stored.

use std::sync::Arc;

use ranil_core::{SaleRecord, SaleSink};
use tracing::info;

use crate::store::Tables;

/// Repository for the sales history.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    tables: Arc<Tables>,
    register_id: u8,
}

impl SaleRepository {
    pub(crate) fn new(tables: Arc<Tables>, register_id: u8) -> Self {
        SaleRepository {
            tables,
            register_id,
        }
    }

    /// Numbers and stores a committed sale, returning the stored copy.
    ///
    /// A record that already carries a receipt number keeps it.
    pub fn insert(&self, sale: SaleRecord) -> SaleRecord {
        let mut table = self.tables.sales.write();

        let stored = if sale.receipt_number().is_some() {
            sale
        } else {
            let date = sale.date();
            let counter = table.counters.entry(date).or_insert(0);
            *counter += 1;
            let number = receipt_number(date, self.register_id, *counter);
            sale.with_receipt_number(number)
        };

        info!(
            sale_id = %stored.id(),
            receipt_number = stored.receipt_number().unwrap_or_default(),
            total = %stored.total(),
            "Sale recorded"
        );

        table.records.push(stored.clone());
        stored
    }

    /// Gets a sale by ID.
    pub fn get_by_id(&self, id: &str) -> Option<SaleRecord> {
        self.tables
            .sales
            .read()
            .records
            .iter()
            .find(|s| s.id() == id)
            .cloned()
    }

    /// Gets a sale by its printed receipt number.
    pub fn get_by_receipt_number(&self, number: &str) -> Option<SaleRecord> {
        self.tables
            .sales
            .read()
            .records
            .iter()
            .find(|s| s.receipt_number() == Some(number))
            .cloned()
    }

    /// Full history in recording order.
    pub fn list(&self) -> Vec<SaleRecord> {
        self.tables.sales.read().records.clone()
    }

    /// Sales rung up by one seller.
    pub fn by_seller(&self, seller_id: &str) -> Vec<SaleRecord> {
        self.tables
            .sales
            .read()
            .records
            .iter()
            .filter(|s| s.seller_id() == seller_id)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.tables.sales.read().records.len()
    }
}

impl SaleSink for SaleRepository {
    fn record(&mut self, sale: SaleRecord) -> SaleRecord {
        self.insert(sale)
    }
}

/// Formats a receipt number: `YYYYMMDD-RR-NNNN`.
///
/// ## Format
/// - YYYYMMDD: sale date (UTC)
/// - RR: register number, two digits
/// - NNNN: sequence within that date, starting at 1
///
/// ## Example
/// `20261018-01-0001`
fn receipt_number(date: chrono::NaiveDate, register_id: u8, sequence: u32) -> String {
    format!("{}-{:02}-{:04}", date.format("%Y%m%d"), register_id, sequence)
}

// =============================================================================
// Unit Tests
// =============================================================================
