//! Aggregates across every current record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_inventory::Product;

use crate::profit::{gross_profit, saturating_add, total_cost};

/// Which unit price feeds a cost total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceBasis {
    /// Acquisition cost (`normal_price`).
    Normal,
    /// Sale price (`retail_price`).
    Retail,
}

impl PriceBasis {
    fn unit_price(self, product: &Product) -> Decimal {
        match self {
            PriceBasis::Normal => product.normal_price(),
            PriceBasis::Retail => product.retail_price(),
        }
    }
}

/// Sum of gross profit over `products`. Zero for an empty slice.
///
/// Like the per-record figures, the running sum saturates instead of overflowing.
pub fn aggregate_gross_profit(products: &[Product]) -> Decimal {
    products
        .iter()
        .map(|p| gross_profit(p.retail_price(), p.normal_price(), p.quantity()))
        .fold(Decimal::ZERO, saturating_add)
}

/// Sum of `total_cost` over `products`, priced on `basis`.
pub fn aggregate_total_cost(products: &[Product], basis: PriceBasis) -> Decimal {
    products
        .iter()
        .map(|p| total_cost(basis.unit_price(p), p.quantity()))
        .fold(Decimal::ZERO, saturating_add)
}

/// Dashboard totals for the whole inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub product_count: usize,
    pub total_normal_cost: Decimal,
    pub total_retail_value: Decimal,
    pub total_gross_profit: Decimal,
}

impl InventorySummary {
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            product_count: products.len(),
            total_normal_cost: aggregate_total_cost(products, PriceBasis::Normal),
            total_retail_value: aggregate_total_cost(products, PriceBasis::Retail),
            total_gross_profit: aggregate_gross_profit(products),
        }
    }
}
