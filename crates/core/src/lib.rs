//! `stockledger-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the inventory store
//! and the metrics engine (no IO, no logging setup).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
