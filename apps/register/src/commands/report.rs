//! # Report Commands
//!
//! Sales reports and the dashboard.
//!
//! ## Access
//! ```text
//! ┌───────────────────────┬──────────┬──────────┐
//! │ Command               │  Admin   │  Seller  │
//! ├───────────────────────┼──────────┼──────────┤
//! │ report <period>       │    ✓     │    ✗     │
//! │ top                   │    ✓     │    ✗     │
//! │ dashboard             │    ✓     │    ✗     │
//! │ stock                 │    ✓     │    ✓     │
//! └───────────────────────┴──────────┴──────────┘
//! ```
//!
//! Dates are UTC calendar days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use ranil_core::report::{self, ProductSales};
use ranil_core::{
    DashboardSummary, Money, Product, ReportPeriod, SalesBucket, StockOverview,
    DEFAULT_TOP_PRODUCTS,
};
use ranil_store::{ProductRepository, SaleRepository};

use crate::error::ShellResult;
use crate::state::{RegisterConfig, SessionState};

/// Sales report for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub period: ReportPeriod,
    pub buckets: Vec<SalesBucket>,
    /// Revenue over every recorded sale.
    pub total_revenue: Money,
    pub transaction_count: usize,
    pub average_sale: Money,
}

/// Stock figures for the seller dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub overview: StockOverview,
    pub low_stock: Vec<Product>,
}

/// Sales grouped by day, week or month. Admin only.
pub fn sales_report(
    sales: &SaleRepository,
    session: &SessionState,
    period: ReportPeriod,
    today: NaiveDate,
) -> ShellResult<SalesReport> {
    debug!(?period, %today, "sales_report command");
    session.require_admin("view reports")?;

    let records = sales.list();
    Ok(SalesReport {
        period,
        buckets: report::sales_by_period(&records, period, today),
        total_revenue: report::total_revenue(&records),
        transaction_count: records.len(),
        average_sale: report::average_sale(&records),
    })
}

/// Best sellers by revenue. Admin only.
pub fn top_products(
    sales: &SaleRepository,
    session: &SessionState,
) -> ShellResult<Vec<ProductSales>> {
    debug!("top_products command");
    session.require_admin("view reports")?;

    Ok(report::top_products(&sales.list(), DEFAULT_TOP_PRODUCTS))
}

/// Admin dashboard counters.
pub fn dashboard(
    products: &ProductRepository,
    sales: &SaleRepository,
    session: &SessionState,
    today: NaiveDate,
) -> ShellResult<DashboardSummary> {
    debug!(%today, "dashboard command");
    session.require_admin("view the dashboard")?;

    Ok(report::dashboard_summary(
        &products.list(),
        &sales.list(),
        today,
    ))
}

/// Stock overview and low-stock list. Any signed-in user.
pub fn stock_report(
    products: &ProductRepository,
    session: &SessionState,
) -> ShellResult<StockReport> {
    debug!("stock_report command");
    session.require_user()?;

    Ok(StockReport {
        overview: report::stock_overview(&products.list()),
        low_stock: products.low_stock(),
    })
}

// =============================================================================
// Rendering
// =============================================================================

pub fn render_sales_report(report: &SalesReport, config: &RegisterConfig) -> String {
    let mut out = String::new();
    for bucket in &report.buckets {
        out.push_str(&format!(
            "{:<10} {:>16} {:>4} sale(s)\n",
            bucket.label,
            config.format_currency(bucket.sales_total),
            bucket.transaction_count
        ));
    }
    out.push_str(&format!(
        "Total revenue {}, {} transaction(s), average {}\n",
        config.format_currency(report.total_revenue),
        report.transaction_count,
        config.format_currency(report.average_sale)
    ));
    out
}

pub fn render_top_products(rows: &[ProductSales], config: &RegisterConfig) -> String {
    if rows.is_empty() {
        return "No sales yet.\n".to_string();
    }
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            format!(
                "{}. {:<28} {:>8} {:>16}\n",
                i + 1,
                row.name,
                row.quantity.to_string(),
                config.format_currency(row.revenue)
            )
        })
        .collect()
}

pub fn render_dashboard(summary: &DashboardSummary, config: &RegisterConfig) -> String {
    format!(
        "Products: {}\nLow stock: {}\nToday's sales: {}\nThis week: {}\n",
        summary.total_products,
        summary.low_stock_count,
        config.format_currency(summary.today_sales),
        config.format_currency(summary.week_sales)
    )
}

pub fn render_stock_report(report: &StockReport) -> String {
    let mut out = format!(
        "In stock: {}  Low: {}  Out: {}\n",
        report.overview.in_stock, report.overview.low_stock, report.overview.out_of_stock
    );
    for product in &report.low_stock {
        out.push_str(&format!(
            "  {:<5} {:<28} {} {} (threshold {})\n",
            product.id, product.name, product.stock, product.unit, product.low_stock_threshold
        ));
    }
    out
}
