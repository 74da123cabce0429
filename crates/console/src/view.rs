//! Text rendering of the product table and the summary cards.

use std::fmt::Write as _;

use stockledger_inventory::Product;
use stockledger_metrics::{
    InventorySummary, MarginTone, ProductMetrics, format_currency, format_percentage,
};

const HEADERS: [&str; 9] = [
    "#",
    "Product",
    "Normal Price",
    "Retail Price",
    "Qty",
    "Total Cost",
    "Total Retail",
    "Gross Profit",
    "Margin",
];

/// Columns after the product name are right-aligned.
const LEFT_ALIGNED: usize = 2;

pub const EMPTY_INVENTORY: &str = "No products yet. Add your first product with `add`.";

fn tone_marker(tone: MarginTone) -> &'static str {
    match tone {
        MarginTone::Favorable => "+",
        MarginTone::Unfavorable => "-",
    }
}

fn row_cells(row: usize, product: &Product) -> [String; 9] {
    let metrics = ProductMetrics::for_product(product);
    [
        row.to_string(),
        product.name().to_string(),
        format_currency(product.normal_price()),
        format_currency(product.retail_price()),
        product.quantity().to_string(),
        format_currency(metrics.normal_total),
        format_currency(metrics.retail_total),
        format_currency(metrics.gross_profit),
        format!("{} {}", format_percentage(metrics.margin), tone_marker(metrics.tone)),
    ]
}

/// The product table followed by the summary cards.
pub fn render_inventory(products: &[Product]) -> String {
    if products.is_empty() {
        return EMPTY_INVENTORY.to_string();
    }

    let rows: Vec<[String; 9]> = products
        .iter()
        .enumerate()
        .map(|(i, p)| row_cells(i + 1, p))
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out.push('\n');
    out.push_str(&render_summary(&InventorySummary::from_products(products)));
    out
}

fn push_line(out: &mut String, cells: &[String; 9], widths: &[usize; 9]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i < LEFT_ALIGNED {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

pub fn render_summary(summary: &InventorySummary) -> String {
    format!(
        "Total Products:     {}\n\
         Total Normal Cost:  {}\n\
         Total Retail Value: {}\n\
         Total Gross Profit: {}\n",
        summary.product_count,
        format_currency(summary.total_normal_cost),
        format_currency(summary.total_retail_value),
        format_currency(summary.total_gross_profit),
    )
}

/// One-line description of a record, used in confirmations and replies.
pub fn describe(product: &Product) -> String {
    format!(
        "{} (qty {}, {} / {})",
        product.name(),
        product.quantity(),
        format_currency(product.normal_price()),
        format_currency(product.retail_price()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockledger_inventory::{InventoryStore, ProductForm};

    #[test]
    fn empty_inventory_has_placeholder() {
        assert_eq!(render_inventory(&[]), EMPTY_INVENTORY);
    }

    #[test]
    fn table_shows_formatted_metrics() {
        let store = InventoryStore::new();
        store.create(&ProductForm::new("Widget", "5", "8", "10")).unwrap();
        store.create(&ProductForm::new("Loss Leader", "10", "8", "4")).unwrap();

        let text = render_inventory(&store.list());
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("#  Product"));
        assert!(lines[2].starts_with("1  Widget"));
        assert!(lines[2].contains("$50.00"));
        assert!(lines[2].contains("$80.00"));
        assert!(lines[2].ends_with("60.0% +"));
        assert!(lines[3].starts_with("2  Loss Leader"));
        assert!(lines[3].contains("$-8.00"));
        assert!(lines[3].ends_with("-20.0% -"));
        assert!(text.contains("Total Products:     2"));
        assert!(text.contains("Total Gross Profit: $22.00"));
    }

    #[test]
    fn columns_line_up() {
        let store = InventoryStore::new();
        store.create(&ProductForm::new("A", "1", "2", "3")).unwrap();
        store.create(&ProductForm::new("A much longer name", "100", "250", "12")).unwrap();

        let text = render_inventory(&store.list());
        let lines: Vec<&str> = text.lines().take(4).collect();
        let width = lines[0].len();
        assert!(lines.iter().all(|l| l.len() == width), "{text}");
    }

    #[test]
    fn summary_lists_every_card() {
        let summary = InventorySummary::from_products(&[]);
        let text = render_summary(&summary);
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("Total Retail Value: $0.00"));
    }

    #[test]
    fn describe_is_compact() {
        let store = InventoryStore::new();
        let p = store.create(&ProductForm::new("Widget", "5", "8", "10")).unwrap();
        assert_eq!(describe(&p), "Widget (qty 10, $5.00 / $8.00)");
    }
}
