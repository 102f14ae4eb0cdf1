//! # Receipt Rendering
//!
//! Turns a [`SaleRecord`] into the printed slip. Purely presentational: all
//! amounts come from the record, rounding happens here and nowhere else.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │          Ranil's Poultry Supply          │
//! │       Inventory Management System        │
//! │------------------------------------------│
//! │             October 18, 2026             │
//! │                 03:45 PM                 │
//! │Item                 Qty    Price    Total│
//! │Aozi Dog Adult      0.25   165.00    41.25│
//! │==========================================│
//! │Total Amount                      ₱356.25 │
//! └──────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::quantity::Quantity;
use crate::sale::SaleRecord;

const QTY_WIDTH: usize = 7;
const PRICE_WIDTH: usize = 9;
const TOTAL_WIDTH: usize = 10;
const MIN_ITEM_WIDTH: usize = 8;

/// Store details and paper layout for receipts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptConfig {
    /// Printed at the top of every receipt.
    pub store_name: String,

    /// Second header line.
    pub tagline: String,

    pub currency_symbol: String,

    /// Characters per line (thermal printers are typically 32, 42 or 48).
    pub paper_width: usize,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        ReceiptConfig {
            store_name: crate::DEFAULT_STORE_NAME.to_string(),
            tagline: "Inventory Management System".to_string(),
            currency_symbol: "₱".to_string(),
            paper_width: 42,
        }
    }
}

/// Receipt view model, for a UI that draws its own slip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub receipt_number: Option<String>,
    pub store_name: String,
    pub tagline: String,
    /// e.g. "October 18, 2026"
    pub date: String,
    /// e.g. "03:45 PM"
    pub time: String,
    pub items: Vec<ReceiptItem>,
    pub total: Money,
}

/// One printed line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub name: String,
    pub quantity: Quantity,
    pub unit: String,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Formats sale records as receipts.
#[derive(Debug, Clone, Default)]
pub struct ReceiptRenderer {
    config: ReceiptConfig,
}

impl ReceiptRenderer {
    pub fn new(config: ReceiptConfig) -> Self {
        ReceiptRenderer { config }
    }

    pub fn config(&self) -> &ReceiptConfig {
        &self.config
    }

    /// Builds the view model for a sale.
    pub fn build(&self, sale: &SaleRecord) -> Receipt {
        let items = sale
            .lines()
            .iter()
            .map(|line| ReceiptItem {
                name: line.name.clone(),
                quantity: line.quantity,
                unit: line.unit.clone(),
                unit_price: line.unit_price,
                line_total: line.line_total(),
            })
            .collect();

        Receipt {
            receipt_number: sale.receipt_number().map(str::to_string),
            store_name: self.config.store_name.clone(),
            tagline: self.config.tagline.clone(),
            date: sale.created_at().format("%B %-d, %Y").to_string(),
            time: sale.created_at().format("%I:%M %p").to_string(),
            items,
            total: sale.total(),
        }
    }

    /// Renders the plain-text slip.
    pub fn render(&self, sale: &SaleRecord) -> String {
        let receipt = self.build(sale);
        let cells: Vec<[String; 3]> = receipt
            .items
            .iter()
            .map(|item| {
                [
                    item.quantity.to_string(),
                    item.unit_price.format_grouped(),
                    item.line_total.format_grouped(),
                ]
            })
            .collect();

        // Numeric columns widen for large amounts and always keep one
        // space before their content; the item column absorbs the difference.
        let qty_width = column_width(QTY_WIDTH, cells.iter().map(|c| &c[0]));
        let price_width = column_width(PRICE_WIDTH, cells.iter().map(|c| &c[1]));
        let total_width = column_width(TOTAL_WIDTH, cells.iter().map(|c| &c[2]));
        let numeric = qty_width + price_width + total_width;
        let item_width = self
            .config
            .paper_width
            .saturating_sub(numeric)
            .max(MIN_ITEM_WIDTH);
        let width = item_width + numeric;

        let mut out = Vec::new();
        out.push(center(&receipt.store_name, width));
        out.push(center(&receipt.tagline, width));
        out.push("-".repeat(width));
        if let Some(number) = &receipt.receipt_number {
            out.push(center(&format!("Receipt #{}", number), width));
        }
        out.push(center(&receipt.date, width));
        out.push(center(&receipt.time, width));
        out.push(String::new());

        out.push(format!(
            "{:<iw$}{:>qw$}{:>pw$}{:>tw$}",
            "Item",
            "Qty",
            "Price",
            "Total",
            iw = item_width,
            qw = qty_width,
            pw = price_width,
            tw = total_width,
        ));
        out.push("-".repeat(width));

        for (item, [qty, price, total]) in receipt.items.iter().zip(&cells) {
            out.push(format!(
                "{:<iw$}{:>qw$}{:>pw$}{:>tw$}",
                truncate(&item.name, item_width - 1),
                qty,
                price,
                total,
                iw = item_width,
                qw = qty_width,
                pw = price_width,
                tw = total_width,
            ));
        }

        out.push("=".repeat(width));
        let amount = format!(
            "{}{}",
            self.config.currency_symbol,
            receipt.total.format_grouped()
        );
        let label = "Total Amount";
        let gap = width.saturating_sub(label.chars().count() + amount.chars().count()).max(1);
        out.push(format!("{}{}{}", label, " ".repeat(gap), amount));
        out.push("-".repeat(width));
        out.push(center("Thank you for your business!", width));
        out.push(center("Please come again", width));

        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}

fn column_width<'a>(min: usize, cells: impl Iterator<Item = &'a String>) -> usize {
    cells
        .map(|cell| cell.chars().count() + 1)
        .fold(min, usize::max)
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use chrono::{TimeZone, Utc};

    fn sale() -> SaleRecord {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 15, 45, 0).unwrap();
        let lines = vec![
            CartLine {
                product_id: "1".to_string(),
                name: "Aozi Dog Adult".to_string(),
                quantity: Quantity::parse("0.25").unwrap(),
                unit_price: Money::from_major(165),
                unit: "kg".to_string(),
                added_at: at,
            },
            CartLine {
                product_id: "8".to_string(),
                name: "Nutrichunks Adult".to_string(),
                quantity: Quantity::from_units(3),
                unit_price: Money::from_major(105),
                unit: "kg".to_string(),
                added_at: at,
            },
        ];
        SaleRecord::new("2", lines, at).with_receipt_number("20261018-01-0001")
    }

    #[test]
    fn test_build_view_model() {
        let receipt = ReceiptRenderer::default().build(&sale());

        assert_eq!(receipt.date, "October 18, 2026");
        assert_eq!(receipt.time, "03:45 PM");
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.items[0].line_total, Money::parse("41.25").unwrap());
        assert_eq!(receipt.total, Money::parse("356.25").unwrap());
        assert_eq!(receipt.receipt_number.as_deref(), Some("20261018-01-0001"));
    }

    #[test]
    fn test_render_text() {
        let text = ReceiptRenderer::default().render(&sale());

        assert!(text.contains("Ranil's Poultry Supply"));
        assert!(text.contains("Receipt #20261018-01-0001"));
        assert!(text.contains("October 18, 2026"));
        assert!(text.contains("Aozi Dog Adult"));
        assert!(text.contains("41.25"));
        assert!(text.contains("315.00"));
        assert!(text.contains("₱356.25"));
        assert!(text.contains("Please come again"));
    }

    #[test]
    fn test_lines_fit_paper_width() {
        let renderer = ReceiptRenderer::new(ReceiptConfig {
            paper_width: 42,
            ..ReceiptConfig::default()
        });
        for line in renderer.render(&sale()).lines() {
            assert!(line.chars().count() <= 42, "too wide: {:?}", line);
        }
    }

    #[test]
    fn test_large_amounts_keep_columns_apart() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 15, 45, 0).unwrap();
        let lines = vec![CartLine {
            product_id: "40".to_string(),
            name: "Incubator (Industrial)".to_string(),
            quantity: Quantity::from_units(3),
            unit_price: Money::from_major(1_000_000),
            unit: "unit".to_string(),
            added_at: at,
        }];
        let sale = SaleRecord::new("1", lines, at);

        let text = ReceiptRenderer::default().render(&sale);
        for line in text.lines() {
            assert!(line.chars().count() <= 42, "too wide: {:?}", line);
        }

        let row = text
            .lines()
            .find(|line| line.starts_with("Incub"))
            .unwrap();
        let cells: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(cells[cells.len() - 3..], ["3", "1,000,000.00", "3,000,000.00"]);
    }

    #[test]
    fn test_long_names_are_truncated() {
        assert_eq!(truncate("Floating Pellet (Adult)", 10), "Floating P");
        assert_eq!(truncate("Lannate", 10), "Lannate");
        assert_eq!(center("abc", 7), "  abc");
    }
}
