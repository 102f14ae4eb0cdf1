//! # Reports
//!
//! Simple aggregation over the sales history and catalog, with typed
//! results for the charts and dashboard tiles.
//!
//! ## Buckets
//! ```text
//! Daily    last 7 calendar days        "Oct 12" .. "Oct 18"
//! Weekly   last 4 Sunday-started weeks "Week 1" .. "Week 4"
//! Monthly  last 6 calendar months      "May"    .. "Oct"
//! ```
//!
//! Buckets are listed oldest first. A sale belongs to the bucket containing
//! its UTC calendar date.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::quantity::Quantity;
use crate::sale::SaleRecord;
use crate::types::{Product, StockStatus};

/// Number of products shown in the "top products" table.
pub const DEFAULT_TOP_PRODUCTS: usize = 5;

/// Reporting granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl std::str::FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(ReportPeriod::Daily),
            "weekly" | "week" => Ok(ReportPeriod::Weekly),
            "monthly" | "month" => Ok(ReportPeriod::Monthly),
            other => Err(format!("unknown report period '{}'", other)),
        }
    }
}

/// Sales within one date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesBucket {
    pub label: String,
    #[ts(as = "String")]
    pub start: NaiveDate,
    /// Inclusive.
    #[ts(as = "String")]
    pub end: NaiveDate,
    pub sales_total: Money,
    pub transaction_count: usize,
}

/// Quantity and revenue per product across all sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: String,
    pub name: String,
    pub quantity: Quantity,
    pub revenue: Money,
}

/// Admin dashboard tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: usize,
    /// Products with `stock <= low_stock_threshold`.
    pub low_stock_count: usize,
    pub today_sales: Money,
    /// Sales dated on or after seven days before today.
    pub week_sales: Money,
}

/// Seller dashboard stock counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockOverview {
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

/// Groups sales into the buckets for `period`, ending at `today`.
pub fn sales_by_period(
    sales: &[SaleRecord],
    period: ReportPeriod,
    today: NaiveDate,
) -> Vec<SalesBucket> {
    bucket_ranges(period, today)
        .into_iter()
        .map(|(label, start, end)| {
            let in_range: Vec<&SaleRecord> = sales
                .iter()
                .filter(|s| (start..=end).contains(&s.date()))
                .collect();
            SalesBucket {
                label,
                start,
                end,
                sales_total: in_range.iter().map(|s| s.total()).sum(),
                transaction_count: in_range.len(),
            }
        })
        .collect()
}

fn bucket_ranges(period: ReportPeriod, today: NaiveDate) -> Vec<(String, NaiveDate, NaiveDate)> {
    match period {
        ReportPeriod::Daily => (0..7)
            .rev()
            .map(|i| {
                let day = today - Duration::days(i);
                (day.format("%b %-d").to_string(), day, day)
            })
            .collect(),
        ReportPeriod::Weekly => {
            let this_sunday =
                today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
            (0..4)
                .rev()
                .map(|i| {
                    let start = this_sunday - Duration::weeks(i);
                    (format!("Week {}", 4 - i), start, start + Duration::days(6))
                })
                .collect()
        }
        ReportPeriod::Monthly => (0..6)
            .rev()
            .filter_map(|i| {
                let start = month_start(today, i)?;
                let end = month_start(today, i - 1)? - Duration::days(1);
                Some((start.format("%b").to_string(), start, end))
            })
            .collect(),
    }
}

/// First day of the month `months_back` months before `today`'s month.
fn month_start(today: NaiveDate, months_back: i32) -> Option<NaiveDate> {
    let index = today.year() * 12 + today.month0() as i32 - months_back;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}

/// Sum of all sale totals.
pub fn total_revenue(sales: &[SaleRecord]) -> Money {
    sales.iter().map(SaleRecord::total).sum()
}

/// Mean sale total, zero with no sales.
pub fn average_sale(sales: &[SaleRecord]) -> Money {
    if sales.is_empty() {
        return Money::zero();
    }
    Money::new(total_revenue(sales).amount() / rust_decimal::Decimal::from(sales.len()))
}

/// Best-selling products by revenue.
///
/// Ties are broken by name so the table is stable.
pub fn top_products(sales: &[SaleRecord], limit: usize) -> Vec<ProductSales> {
    let mut by_product: HashMap<&str, ProductSales> = HashMap::new();

    for line in sales.iter().flat_map(|s| s.lines()) {
        let entry = by_product
            .entry(line.product_id.as_str())
            .or_insert_with(|| ProductSales {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                quantity: Quantity::zero(),
                revenue: Money::zero(),
            });
        entry.quantity = entry.quantity + line.quantity;
        entry.revenue += line.line_total();
    }

    let mut ranked: Vec<ProductSales> = by_product.into_values().collect();
    ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(limit);
    ranked
}

/// Admin dashboard numbers as of `today`.
pub fn dashboard_summary(
    products: &[Product],
    sales: &[SaleRecord],
    today: NaiveDate,
) -> DashboardSummary {
    let week_ago = today - Duration::days(7);
    DashboardSummary {
        total_products: products.len(),
        low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
        today_sales: sales
            .iter()
            .filter(|s| s.date() >= today)
            .map(SaleRecord::total)
            .sum(),
        week_sales: sales
            .iter()
            .filter(|s| s.date() >= week_ago)
            .map(SaleRecord::total)
            .sum(),
    }
}

/// Counts products per stock status.
pub fn stock_overview(products: &[Product]) -> StockOverview {
    products
        .iter()
        .fold(StockOverview::default(), |mut acc, p| {
            match p.stock_status() {
                StockStatus::InStock => acc.in_stock += 1,
                StockStatus::LowStock => acc.low_stock += 1,
                StockStatus::OutOfStock => acc.out_of_stock += 1,
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use chrono::{TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale_on(date: NaiveDate, lines: &[(&str, &str, i64, i64)]) -> SaleRecord {
        let at = Utc
            .with_ymd_and_hms(date.year(), date.month(), date.day(), 10, 0, 0)
            .unwrap();
        let lines = lines
            .iter()
            .map(|(id, name, qty, price)| CartLine {
                product_id: id.to_string(),
                name: name.to_string(),
                quantity: Quantity::from_units(*qty),
                unit_price: Money::from_major(*price),
                unit: "kg".to_string(),
                added_at: at,
            })
            .collect();
        SaleRecord::new("1", lines, at)
    }

    // Sunday 2026-10-18
    fn today() -> NaiveDate {
        day(2026, 10, 18)
    }

    fn history() -> Vec<SaleRecord> {
        vec![
            sale_on(today(), &[("1", "Aozi Dog Adult", 3, 165), ("8", "Nutrichunks Adult", 2, 105)]),
            sale_on(today(), &[("16", "Cat Litter (Feline)", 4, 220)]),
            sale_on(day(2026, 10, 17), &[("22", "Hog Starter (B-Meg)", 2, 65), ("19", "Crack Corn (Bistay)", 5, 35)]),
            sale_on(day(2026, 10, 11), &[("14", "Whiskas Adult", 3, 170)]),
        ]
    }

    #[test]
    fn test_daily_buckets() {
        let buckets = sales_by_period(&history(), ReportPeriod::Daily, today());

        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].label, "Oct 12");
        assert_eq!(buckets[6].label, "Oct 18");
        assert_eq!(buckets[6].transaction_count, 2);
        assert_eq!(buckets[6].sales_total, Money::from_major(1585));
        assert_eq!(buckets[5].sales_total, Money::from_major(305));
        // Oct 11 is outside the window
        let counted: usize = buckets.iter().map(|b| b.transaction_count).sum();
        assert_eq!(counted, 3);
    }

    #[test]
    fn test_weekly_buckets_start_on_sunday() {
        let buckets = sales_by_period(&history(), ReportPeriod::Weekly, today());

        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[3].label, "Week 4");
        assert_eq!(buckets[3].start, day(2026, 10, 18));
        assert_eq!(buckets[3].end, day(2026, 10, 24));
        assert_eq!(buckets[3].transaction_count, 2);
        // Oct 11..=17 holds the Oct 11 and Oct 17 sales
        assert_eq!(buckets[2].start, day(2026, 10, 11));
        assert_eq!(buckets[2].transaction_count, 2);
        assert_eq!(buckets[2].sales_total, Money::from_major(815));
    }

    #[test]
    fn test_monthly_buckets_cross_year() {
        let buckets = sales_by_period(&[], ReportPeriod::Monthly, day(2026, 2, 10));

        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]);
        assert_eq!(buckets[0].start, day(2025, 9, 1));
        assert_eq!(buckets[0].end, day(2025, 9, 30));
        assert_eq!(buckets[5].end, day(2026, 2, 28));
    }

    #[test]
    fn test_revenue_and_average() {
        let sales = history();
        assert_eq!(total_revenue(&sales), Money::from_major(2400));
        assert_eq!(average_sale(&sales), Money::from_major(600));
        assert_eq!(average_sale(&[]), Money::zero());
    }

    #[test]
    fn test_top_products() {
        let top = top_products(&history(), DEFAULT_TOP_PRODUCTS);

        assert_eq!(top.len(), 5);
        assert_eq!(top[0].name, "Cat Litter (Feline)");
        assert_eq!(top[0].revenue, Money::from_major(880));
        assert_eq!(top[1].name, "Whiskas Adult");
        assert_eq!(top[2].name, "Aozi Dog Adult");
        assert_eq!(top[2].quantity, Quantity::from_units(3));
    }

    #[test]
    fn test_dashboard_and_stock_overview() {
        let product = |id: &str, stock: i64, threshold: i64| Product {
            id: id.to_string(),
            name: id.to_string(),
            category: "Medicine".to_string(),
            price: Money::from_major(4),
            stock: Quantity::from_units(stock),
            unit: "tablet".to_string(),
            low_stock_threshold: Quantity::from_units(threshold),
            supplier_id: "5".to_string(),
        };
        let products = vec![product("a", 200, 50), product("b", 10, 20), product("c", 0, 5)];

        let summary = dashboard_summary(&products, &history(), today());
        assert_eq!(summary.total_products, 3);
        assert_eq!(summary.low_stock_count, 2);
        assert_eq!(summary.today_sales, Money::from_major(1585));
        assert_eq!(summary.week_sales, Money::from_major(2400));

        let overview = stock_overview(&products);
        assert_eq!(
            overview,
            StockOverview {
                in_stock: 1,
                low_stock: 1,
                out_of_stock: 1
            }
        );
    }

    #[test]
    fn test_parse_period() {
        assert_eq!("Weekly".parse::<ReportPeriod>(), Ok(ReportPeriod::Weekly));
        assert!("hourly".parse::<ReportPeriod>().is_err());
    }
}
