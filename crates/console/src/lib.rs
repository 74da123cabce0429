//! `stockledger-console`
//!
//! Line-oriented view layer over the inventory store and the metrics engine.
//! It holds only presentation state (the pending delete confirmation) and does
//! the presence checks and formatting the core leaves to its caller.

pub mod command;
pub mod config;
pub mod session;
pub mod view;

pub use command::{Command, CommandError, ProductRef};
pub use config::ConsoleConfig;
pub use session::{ConsoleError, Reply, Session};
