//! Product records and the field rules every create and edit goes through.
//!
//! Prices and quantities are bounded so that every derived figure (totals,
//! profit, margin) stays well inside `Decimal` range.

use core::fmt::Display;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult, Entity, ProductId};

/// Largest accepted unit price (one trillion).
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Most decimal places a unit price may carry, ignoring trailing zeros.
pub const MAX_PRICE_SCALE: u32 = 6;

/// Largest quantity a record can hold (one trillion units).
pub const MAX_QUANTITY: u64 = 1_000_000_000_000;

/// A product record tracked by the store.
///
/// Fields are only reachable through accessors; the store is the sole mutator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    normal_price: Decimal,
    retail_price: Decimal,
    quantity: u64,
    created_at: DateTime<Utc>,
}

impl Product {
    pub(crate) fn new(fields: ProductFields) -> Self {
        Self {
            id: ProductId::new(),
            name: fields.name,
            normal_price: fields.normal_price,
            retail_price: fields.retail_price,
            quantity: fields.quantity,
            created_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit acquisition cost.
    pub fn normal_price(&self) -> Decimal {
        self.normal_price
    }

    /// Unit sale price. May be below `normal_price`.
    pub fn retail_price(&self) -> Decimal {
        self.retail_price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Full replace of every editable field; identity and creation time are kept.
    pub(crate) fn replace_fields(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.normal_price = fields.normal_price;
        self.retail_price = fields.retail_price;
        self.quantity = fields.quantity;
    }

    pub(crate) fn set_quantity(&mut self, quantity: u64) {
        self.quantity = quantity;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Typed, validated field set for creating or editing a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub normal_price: Decimal,
    pub retail_price: Decimal,
    pub quantity: u64,
}

impl ProductFields {
    pub fn new(
        name: impl Into<String>,
        normal_price: Decimal,
        retail_price: Decimal,
        quantity: u64,
    ) -> Self {
        Self {
            name: name.into(),
            normal_price,
            retail_price,
            quantity,
        }
    }

    /// Check field rules and normalize the name (trimmed) and zero prices.
    ///
    /// Quantity only needs an upper bound: `u64` cannot hold a negative count.
    pub fn validate(mut self) -> DomainResult<Self> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if trimmed.len() != self.name.len() {
            self.name = trimmed.to_string();
        }
        self.normal_price = check_price("normal price", self.normal_price)?;
        self.retail_price = check_price("retail price", self.retail_price)?;
        if self.quantity > MAX_QUANTITY {
            return Err(DomainError::validation(format!(
                "quantity cannot exceed {MAX_QUANTITY}"
            )));
        }
        Ok(self)
    }
}

/// Raw text fields as collected by an input form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub normal_price: String,
    pub retail_price: String,
    pub quantity: String,
}

impl ProductForm {
    pub fn new(
        name: impl Into<String>,
        normal_price: impl Display,
        retail_price: impl Display,
        quantity: impl Display,
    ) -> Self {
        Self {
            name: name.into(),
            normal_price: normal_price.to_string(),
            retail_price: retail_price.to_string(),
            quantity: quantity.to_string(),
        }
    }

    /// Names of the fields left blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("normal price", &self.normal_price),
            ("retail price", &self.retail_price),
            ("quantity", &self.quantity),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect()
    }

    /// Parse every field and apply the same rules as [`ProductFields::validate`].
    pub fn parse(&self) -> DomainResult<ProductFields> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(DomainError::validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let fields = ProductFields {
            name: self.name.clone(),
            normal_price: parse_price("normal price", &self.normal_price)?,
            retail_price: parse_price("retail price", &self.retail_price)?,
            quantity: parse_quantity(&self.quantity)?,
        };
        fields.validate()
    }
}

fn parse_price(label: &str, raw: &str) -> DomainResult<Decimal> {
    let value = Decimal::from_str(raw.trim())
        .map_err(|_| DomainError::validation(format!("{label} must be a number, got {raw:?}")))?;
    check_price(label, value)
}

/// Bounds check for a unit price. `-0` comes back as plain zero.
fn check_price(label: &str, value: Decimal) -> DomainResult<Decimal> {
    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if value.is_sign_negative() {
        return Err(DomainError::validation(format!("{label} cannot be negative")));
    }
    if value > MAX_PRICE {
        return Err(DomainError::validation(format!("{label} cannot exceed {MAX_PRICE}")));
    }
    if value.normalize().scale() > MAX_PRICE_SCALE {
        return Err(DomainError::validation(format!(
            "{label} cannot have more than {MAX_PRICE_SCALE} decimal places"
        )));
    }
    Ok(value)
}

fn parse_quantity(raw: &str) -> DomainResult<u64> {
    let raw = raw.trim();
    if raw.starts_with('-') {
        return Err(DomainError::validation("quantity cannot be negative"));
    }
    raw.parse::<u64>().map_err(|_| {
        DomainError::validation(format!("quantity must be a whole number, got {raw:?}"))
    })
}
