//! # Sale Commands
//!
//! Checkout and receipt reprint.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout                                             │
//! │                                                                         │
//! │  Cart::checkout() ──► SaleRecord (lines + exact total), cart emptied   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  SaleSink::record() ──► receipt number YYYYMMDD-RR-NNNN assigned       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  deduct_stock on? ──yes──► ProductRepository::apply_sale               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ReceiptRenderer::render() ──► printed slip                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use ranil_core::{Money, ReceiptRenderer, SaleRecord, SaleSink};
use ranil_store::{ProductRepository, SaleRepository};

use crate::error::{ShellError, ShellResult};
use crate::state::{RegisterConfig, SessionState};

/// Result of a completed checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub sale_id: String,
    pub receipt_number: String,
    pub total: Money,
    pub item_count: usize,
    /// Plain-text receipt ready for the printer.
    pub receipt: String,
}

/// Completes the sale in progress.
///
/// ## Behavior
/// - Empty cart: `EmptyCart`, nothing recorded
/// - Otherwise the sale is recorded and numbered, the cart emptied
/// - Stock is deducted only when `config.deduct_stock` is on
pub fn checkout(
    products: &ProductRepository,
    sales: &mut SaleRepository,
    session: &mut SessionState,
    config: &RegisterConfig,
) -> ShellResult<CheckoutResponse> {
    debug!("checkout command");

    let record = session.cart_mut()?.checkout()?;
    let stored = sales.record(record);

    if config.deduct_stock {
        products.apply_sale(&stored)?;
    }

    let receipt_number = stored
        .receipt_number()
        .map(str::to_string)
        .ok_or_else(|| ShellError::internal("Recorded sale has no receipt number"))?;

    info!(
        sale_id = %stored.id(),
        receipt_number = %receipt_number,
        total = %stored.total(),
        deduct_stock = config.deduct_stock,
        "Checkout complete"
    );

    Ok(CheckoutResponse {
        sale_id: stored.id().to_string(),
        receipt_number,
        total: stored.total(),
        item_count: stored.lines().len(),
        receipt: render_receipt(&stored, config),
    })
}

/// Reprints a past sale by its receipt number.
pub fn reprint_receipt(
    sales: &SaleRepository,
    session: &SessionState,
    config: &RegisterConfig,
    receipt_number: &str,
) -> ShellResult<String> {
    debug!(receipt_number, "reprint_receipt command");
    session.require_user()?;

    let sale = sales
        .get_by_receipt_number(receipt_number.trim())
        .ok_or_else(|| ShellError::not_found("Receipt", receipt_number))?;
    Ok(render_receipt(&sale, config))
}

fn render_receipt(sale: &SaleRecord, config: &RegisterConfig) -> String {
    ReceiptRenderer::new(config.receipt_config()).render(sale)
}
