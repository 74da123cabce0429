//! Interactive session: owns presentation state and turns commands into
//! store calls.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use stockledger_core::{DomainError, Entity, ProductId};
use stockledger_inventory::{InventoryStore, ProductForm};

use crate::command::{Command, HELP, ProductRef};
use crate::config::ConsoleConfig;
use crate::view::{describe, render_inventory};

/// Result of handling one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print the text (if any) and keep reading.
    Continue(String),
    /// Stop the session.
    Quit,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self::Continue(text.into())
    }
}

#[derive(Debug)]
pub struct Session {
    store: InventoryStore,
    config: ConsoleConfig,
    /// Product awaiting a delete confirmation.
    pending_delete: Option<ProductId>,
}

impl Session {
    pub fn new(config: ConsoleConfig) -> Self {
        Self::with_store(InventoryStore::new(), config)
    }

    pub fn with_store(store: InventoryStore, config: ConsoleConfig) -> Self {
        Self {
            store,
            config,
            pending_delete: None,
        }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn awaiting_confirmation(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Handle one line of input.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        if let Some(id) = self.pending_delete.take() {
            return self.confirm_delete(id, line);
        }

        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Reply::text(""),
            Err(err) => Reply::text(err.to_string()),
        }
    }

    fn execute(&mut self, command: Command) -> Reply {
        debug!(?command, "executing console command");
        let result = match command {
            Command::Add(form) => self.add(&form),
            Command::List => Ok(render_inventory(&self.store.list())),
            Command::SetQuantity(target, quantity) => self.set_quantity(target, quantity),
            Command::Adjust(target, delta) => self.adjust(target, delta),
            Command::Edit(target, form) => self.edit(target, &form),
            Command::Delete(target) => self.request_delete(target),
            Command::Json => self.json(),
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => return Reply::Quit,
        };
        Reply::text(result.unwrap_or_else(|err| err.to_string()))
    }

    fn resolve(&self, target: ProductRef) -> Result<ProductId, ConsoleError> {
        match target {
            ProductRef::Id(id) => Ok(id),
            ProductRef::Row(row) => row
                .checked_sub(1)
                .and_then(|index| self.store.list().get(index).map(|p| *p.id()))
                .ok_or(ConsoleError::NoSuchRow(row)),
        }
    }

    fn add(&self, form: &ProductForm) -> Result<String, ConsoleError> {
        require_all_fields(form)?;
        let product = self.store.create(form)?;
        Ok(format!("added #{}: {}", self.store.len(), describe(&product)))
    }

    fn set_quantity(&self, target: ProductRef, quantity: i64) -> Result<String, ConsoleError> {
        let id = self.resolve(target)?;
        let product = self.store.set_quantity(id, quantity)?;
        if quantity < 0 {
            return Ok(format!("quantity unchanged: {}", describe(&product)));
        }
        Ok(describe(&product))
    }

    fn adjust(&self, target: ProductRef, delta: i64) -> Result<String, ConsoleError> {
        let id = self.resolve(target)?;
        let product = self.store.adjust_quantity(id, delta)?;
        Ok(describe(&product))
    }

    fn edit(&self, target: ProductRef, form: &ProductForm) -> Result<String, ConsoleError> {
        let id = self.resolve(target)?;
        require_all_fields(form)?;
        let product = self.store.edit(id, form)?;
        Ok(format!("saved: {}", describe(&product)))
    }

    fn request_delete(&mut self, target: ProductRef) -> Result<String, ConsoleError> {
        let id = self.resolve(target)?;
        let product = self.store.get(id)?;

        if !self.config.confirm_deletes {
            self.store.delete(id)?;
            return Ok(format!("deleted {}", product.name()));
        }

        self.pending_delete = Some(*product.id());
        Ok(format!(
            "Delete {}? This action cannot be undone. [y/N]",
            product.name()
        ))
    }

    fn confirm_delete(&mut self, id: ProductId, answer: &str) -> Reply {
        let confirmed = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
        if !confirmed {
            debug!(product_id = %id, "delete cancelled");
            return Reply::text("delete cancelled");
        }

        // The record may have gone away between prompt and answer.
        match self.store.get(id).and_then(|p| self.store.delete(id).map(|()| p)) {
            Ok(product) => Reply::text(format!("deleted {}", product.name())),
            Err(err) => Reply::text(err.to_string()),
        }
    }

    fn json(&self) -> Result<String, ConsoleError> {
        Ok(serde_json::to_string_pretty(&self.store.list())?)
    }

    /// Read commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        info!("console session started");
        write!(output, "{}", self.config.prompt)?;
        output.flush()?;

        for line in input.lines() {
            match self.handle_line(&line?) {
                Reply::Quit => break,
                Reply::Continue(text) => {
                    if !text.is_empty() {
                        writeln!(output, "{text}")?;
                    }
                }
            }
            write!(output, "{}", self.config.prompt)?;
            output.flush()?;
        }

        writeln!(output)?;
        info!(products = self.store.len(), "console session ended");
        Ok(())
    }
}

/// Presence check done by the view before handing a form to the store.
fn require_all_fields(form: &ProductForm) -> Result<(), ConsoleError> {
    let missing = form.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConsoleError::MissingFields(missing.join(", ")))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("please fill in: {0}")]
    MissingFields(String),

    #[error("no product at row {0} (see `list`)")]
    NoSuchRow(usize),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to encode products: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(ConsoleConfig::default())
    }

    fn say(session: &mut Session, line: &str) -> String {
        match session.handle_line(line) {
            Reply::Continue(text) => text,
            Reply::Quit => panic!("unexpected quit on {line:?}"),
        }
    }

    #[test]
    fn add_then_list() {
        let mut s = session();
        let reply = say(&mut s, "add Widget | 5.00 | 8.00 | 10");
        assert_eq!(reply, "added #1: Widget (qty 10, $5.00 / $8.00)");

        let table = say(&mut s, "list");
        assert!(table.contains("Widget"));
        assert!(table.contains("Total Gross Profit: $30.00"));
    }

    #[test]
    fn add_with_blank_field_never_reaches_the_store() {
        let mut s = session();
        let reply = say(&mut s, "add Widget |  | 8 | 1");
        assert_eq!(reply, "please fill in: normal price");
        assert!(s.store().is_empty());
    }

    #[test]
    fn add_with_bad_number_reports_validation() {
        let mut s = session();
        let reply = say(&mut s, "add Widget | five | 8 | 1");
        assert!(reply.starts_with("validation failed:"), "{reply}");
        assert!(s.store().is_empty());
    }

    #[test]
    fn set_negative_is_ignored() {
        let mut s = session();
        say(&mut s, "add Widget | 5 | 8 | 10");
        let reply = say(&mut s, "set 1 -3");
        assert_eq!(reply, "quantity unchanged: Widget (qty 10, $5.00 / $8.00)");
        assert_eq!(s.store().list()[0].quantity(), 10);
    }

    #[test]
    fn set_with_huge_number_keeps_stock_at_the_cap() {
        let mut s = session();
        say(&mut s, "add Widget | 5 | 8 | 10");

        say(&mut s, "set 1 99999999999999999999");

        assert_eq!(s.store().list()[0].quantity(), stockledger_inventory::MAX_QUANTITY);
        let table = say(&mut s, "list");
        assert!(table.contains("Total Gross Profit: $3000000000000.00"), "{table}");
    }

    #[test]
    fn add_with_out_of_range_numbers_is_rejected() {
        let mut s = session();
        let reply = say(&mut s, "add Bulk | 10000000000000000000 | 1 | 10000000000");
        assert!(reply.starts_with("validation failed:"), "{reply}");
        assert!(s.store().is_empty());
        assert_eq!(say(&mut s, "list"), crate::view::EMPTY_INVENTORY);
    }

    #[test]
    fn inc_and_dec_adjust_quantity() {
        let mut s = session();
        say(&mut s, "add Widget | 5 | 8 | 1");
        say(&mut s, "inc 1");
        assert_eq!(s.store().list()[0].quantity(), 2);
        say(&mut s, "dec 1 5");
        assert_eq!(s.store().list()[0].quantity(), 0);
    }

    #[test]
    fn edit_by_id() {
        let mut s = session();
        say(&mut s, "add Widget | 5 | 8 | 10");
        let id = *s.store().list()[0].id();

        let reply = say(&mut s, &format!("edit {id} X | 1 | 2 | 3"));

        assert_eq!(reply, "saved: X (qty 3, $1.00 / $2.00)");
        assert_eq!(*s.store().list()[0].id(), id);
    }

    #[test]
    fn unknown_row_is_reported() {
        let mut s = session();
        assert_eq!(say(&mut s, "inc 1"), "no product at row 1 (see `list`)");
        assert_eq!(say(&mut s, "delete 0"), "no product at row 0 (see `list`)");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut s = session();
        let id = ProductId::new();
        assert_eq!(say(&mut s, &format!("inc {id}")), format!("product not found: {id}"));
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut s = session();
        say(&mut s, "add Widget | 5 | 8 | 10");

        let prompt = say(&mut s, "delete 1");
        assert!(prompt.starts_with("Delete Widget?"));
        assert!(s.awaiting_confirmation());

        assert_eq!(say(&mut s, "n"), "delete cancelled");
        assert_eq!(s.store().len(), 1);

        say(&mut s, "delete 1");
        assert_eq!(say(&mut s, "YES"), "deleted Widget");
        assert!(s.store().is_empty());
        assert!(!s.awaiting_confirmation());
    }

    #[test]
    fn delete_without_confirmation_when_disabled() {
        let mut s = Session::new(ConsoleConfig::default().with_confirm_deletes(false));
        say(&mut s, "add Widget | 5 | 8 | 10");
        assert_eq!(say(&mut s, "delete 1"), "deleted Widget");
        assert!(s.store().is_empty());
    }

    #[test]
    fn json_lists_products() {
        let mut s = session();
        say(&mut s, "add Widget | 5.00 | 8.00 | 10");
        let json: serde_json::Value = serde_json::from_str(&say(&mut s, "json")).unwrap();
        assert_eq!(json[0]["name"], "Widget");
        assert_eq!(json[0]["retail_price"], "8.00");
    }

    #[test]
    fn run_processes_until_quit() {
        let mut s = Session::new(ConsoleConfig::default().with_prompt(""));
        let input = "add Widget | 5 | 8 | 10\ninc 1\nquit\nadd Ignored | 1 | 1 | 1\n";
        let mut output = Vec::new();

        s.run(input.as_bytes(), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("added #1"));
        assert!(output.contains("Widget (qty 11, $5.00 / $8.00)"));
        assert_eq!(s.store().len(), 1);
    }

    #[test]
    fn run_stops_at_end_of_input() {
        let mut s = session();
        let mut output = Vec::new();
        s.run("help\n".as_bytes(), &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("commands:"));
    }
}
