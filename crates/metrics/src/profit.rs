//! Per-unit and per-record profitability figures.
//!
//! Every function here is total: inputs are already validated numbers, so
//! nothing parses and nothing fails. Results that would leave `Decimal` range
//! saturate at `Decimal::MAX` or `Decimal::MIN`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_inventory::Product;

/// `unit_price * quantity`.
///
/// Used for both the cost total (normal price) and the retail value (retail price).
pub fn total_cost(unit_price: Decimal, quantity: u64) -> Decimal {
    saturating_mul(unit_price, Decimal::from(quantity))
}

/// `(retail_price - normal_price) * quantity`. Negative when selling below cost.
pub fn gross_profit(retail_price: Decimal, normal_price: Decimal, quantity: u64) -> Decimal {
    saturating_mul(
        saturating_sub(retail_price, normal_price),
        Decimal::from(quantity),
    )
}

/// Per-unit profit as a percentage of unit cost.
///
/// A zero unit cost yields exactly zero rather than an infinite margin.
pub fn gross_profit_margin(retail_price: Decimal, normal_price: Decimal) -> Decimal {
    if normal_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let markup = saturating_sub(retail_price, normal_price);
    let ratio = markup
        .checked_div(normal_price)
        .unwrap_or_else(|| saturated(markup.is_sign_negative()));
    saturating_mul(ratio, Decimal::ONE_HUNDRED)
}

/// The bound an overflowing result is pinned to.
fn saturated(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b)
        .unwrap_or_else(|| saturated(a.is_sign_negative() != b.is_sign_negative()))
}

fn saturating_sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or_else(|| saturated(a < b))
}

pub(crate) fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| saturated(a.is_sign_negative()))
}

/// Rendering hint for a margin figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginTone {
    /// Margin strictly above zero.
    Favorable,
    /// Zero or negative margin.
    Unfavorable,
}

impl MarginTone {
    pub fn of(margin: Decimal) -> Self {
        if margin > Decimal::ZERO {
            Self::Favorable
        } else {
            Self::Unfavorable
        }
    }
}

/// Derived figures for one product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetrics {
    pub normal_total: Decimal,
    pub retail_total: Decimal,
    pub gross_profit: Decimal,
    pub margin: Decimal,
    pub tone: MarginTone,
}

impl ProductMetrics {
    pub fn for_product(product: &Product) -> Self {
        let margin = gross_profit_margin(product.retail_price(), product.normal_price());
        Self {
            normal_total: total_cost(product.normal_price(), product.quantity()),
            retail_total: total_cost(product.retail_price(), product.quantity()),
            gross_profit: gross_profit(
                product.retail_price(),
                product.normal_price(),
                product.quantity(),
            ),
            margin,
            tone: MarginTone::of(margin),
        }
    }
}
