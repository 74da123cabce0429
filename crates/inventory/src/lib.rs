//! Inventory domain module.
//!
//! This crate owns the product records and every rule about mutating them,
//! implemented as in-memory domain logic (no IO, no persistence).

pub mod product;
pub mod store;

pub use product::{MAX_PRICE, MAX_PRICE_SCALE, MAX_QUANTITY, Product, ProductFields, ProductForm};
pub use store::InventoryStore;
