//! Metrics engine: pure financial figures derived from product fields.
//!
//! Nothing here holds state or mutates records. The view layer calls these to
//! render per-row figures, dashboard totals, and their formatted text.

pub mod format;
pub mod profit;
pub mod summary;

pub use format::{format_currency, format_percentage};
pub use profit::{MarginTone, ProductMetrics, gross_profit, gross_profit_margin, total_cost};
pub use summary::{InventorySummary, PriceBasis, aggregate_gross_profit, aggregate_total_cost};
