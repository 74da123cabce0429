//! `stockledger` interactive console.

use std::io;

use stockledger_console::{ConsoleConfig, Session};

fn main() -> anyhow::Result<()> {
    let config = ConsoleConfig::from_env();
    stockledger_observability::init_with(&config.logging);

    let mut session = Session::new(config);
    session.run(io::stdin().lock(), io::stdout().lock())
}
