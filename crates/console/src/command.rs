//! Parsing of console input lines into commands.

use core::str::FromStr;

use thiserror::Error;

use stockledger_core::ProductId;
use stockledger_inventory::ProductForm;

/// How the user points at a product: a full id, or a 1-based row from `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductRef {
    Id(ProductId),
    Row(usize),
}

impl FromStr for ProductRef {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(row) = s.parse::<usize>() {
            return Ok(Self::Row(row));
        }
        s.parse::<ProductId>()
            .map(Self::Id)
            .map_err(|_| CommandError::BadReference(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(ProductForm),
    List,
    SetQuantity(ProductRef, i64),
    Adjust(ProductRef, i64),
    Edit(ProductRef, ProductForm),
    Delete(ProductRef),
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a row number or product id: {0:?}")]
    BadReference(String),
}

pub const USAGE_ADD: &str = "add <name> | <normal price> | <retail price> | <quantity>";
pub const USAGE_SET: &str = "set <row|id> <quantity>";
pub const USAGE_INC: &str = "inc <row|id> [amount]";
pub const USAGE_DEC: &str = "dec <row|id> [amount]";
pub const USAGE_EDIT: &str = "edit <row|id> <name> | <normal price> | <retail price> | <quantity>";
pub const USAGE_DELETE: &str = "delete <row|id>";

pub const HELP: &str = "\
commands:
  add <name> | <normal price> | <retail price> | <quantity>
  list
  set <row|id> <quantity>
  inc <row|id> [amount]
  dec <row|id> [amount]
  edit <row|id> <name> | <normal price> | <retail price> | <quantity>
  delete <row|id>
  json
  help
  quit";

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "add" => Command::Add(parse_form(rest).ok_or(CommandError::Usage(USAGE_ADD))?),
            "list" | "ls" => Command::List,
            "set" => {
                let (target, qty) = split_target(rest).ok_or(CommandError::Usage(USAGE_SET))?;
                if qty.is_empty() {
                    return Err(CommandError::Usage(USAGE_SET));
                }
                Command::SetQuantity(target.parse()?, lenient_int(qty))
            }
            "inc" | "dec" => {
                let usage = if verb.eq_ignore_ascii_case("inc") { USAGE_INC } else { USAGE_DEC };
                let (target, amount) = match split_target(rest) {
                    Some(parts) => parts,
                    None if !rest.is_empty() => (rest, ""),
                    None => return Err(CommandError::Usage(usage)),
                };
                let amount = if amount.is_empty() {
                    1
                } else {
                    amount.parse::<i64>().map_err(|_| CommandError::Usage(usage))?
                };
                let delta = if usage == USAGE_INC { amount } else { amount.saturating_neg() };
                Command::Adjust(target.parse()?, delta)
            }
            "edit" => {
                let (target, fields) =
                    split_target(rest).ok_or(CommandError::Usage(USAGE_EDIT))?;
                let form = parse_form(fields).ok_or(CommandError::Usage(USAGE_EDIT))?;
                Command::Edit(target.parse()?, form)
            }
            "delete" | "rm" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage(USAGE_DELETE));
                }
                Command::Delete(rest.parse()?)
            }
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Split `<target> <remainder>` on the first whitespace.
fn split_target(rest: &str) -> Option<(&str, &str)> {
    rest.split_once(char::is_whitespace)
        .map(|(target, remainder)| (target, remainder.trim()))
}

/// `a | b | c | d` into a form. Fields may be blank; presence is checked later.
fn parse_form(raw: &str) -> Option<ProductForm> {
    let parts: Vec<&str> = raw.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [name, normal, retail, quantity] => {
            Some(ProductForm::new(*name, normal, retail, quantity))
        }
        _ => None,
    }
}

/// Leading integer of `raw`, or 0 when there is none (`"7 units"` -> 7, `"abc"` -> 0).
///
/// Values beyond `i64` saturate at `i64::MAX` / `i64::MIN`.
pub fn lenient_int(raw: &str) -> i64 {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].bytes().fold(0i64, |acc, digit| {
        let digit = i64::from(digit - b'0');
        let acc = acc.saturating_mul(10);
        if negative {
            acc.saturating_sub(digit)
        } else {
            acc.saturating_add(digit)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn add_splits_fields_on_pipes() {
        assert_eq!(
            parse("add Blue Widget | 5.00 | 8.00 | 10"),
            Command::Add(ProductForm::new("Blue Widget", "5.00", "8.00", "10"))
        );
    }

    #[test]
    fn add_keeps_blank_fields_for_presence_check() {
        assert_eq!(
            parse("add Widget | | 8 | 1"),
            Command::Add(ProductForm::new("Widget", "", "8", "1"))
        );
    }

    #[test]
    fn add_with_wrong_field_count_shows_usage() {
        assert_eq!(Command::parse("add Widget | 5"), Err(CommandError::Usage(USAGE_ADD)));
    }

    #[test]
    fn references_are_rows_or_ids() {
        assert_eq!(parse("delete 2"), Command::Delete(ProductRef::Row(2)));

        let id = ProductId::new();
        assert_eq!(parse(&format!("rm {id}")), Command::Delete(ProductRef::Id(id)));

        assert_eq!(
            Command::parse("delete widget"),
            Err(CommandError::BadReference("widget".to_string()))
        );
    }

    #[test]
    fn set_uses_lenient_integer() {
        assert_eq!(parse("set 1 12"), Command::SetQuantity(ProductRef::Row(1), 12));
        assert_eq!(parse("set 1 abc"), Command::SetQuantity(ProductRef::Row(1), 0));
        assert_eq!(parse("set 1 -4"), Command::SetQuantity(ProductRef::Row(1), -4));
        assert_eq!(parse("set 1 3.7"), Command::SetQuantity(ProductRef::Row(1), 3));
        assert_eq!(Command::parse("set 1"), Err(CommandError::Usage(USAGE_SET)));
    }

    #[test]
    fn inc_and_dec_default_to_one() {
        assert_eq!(parse("inc 3"), Command::Adjust(ProductRef::Row(3), 1));
        assert_eq!(parse("dec 3"), Command::Adjust(ProductRef::Row(3), -1));
        assert_eq!(parse("inc 3 5"), Command::Adjust(ProductRef::Row(3), 5));
        assert_eq!(parse("dec 3 5"), Command::Adjust(ProductRef::Row(3), -5));
        assert_eq!(Command::parse("inc"), Err(CommandError::Usage(USAGE_INC)));
        assert_eq!(Command::parse("dec 3 x"), Err(CommandError::Usage(USAGE_DEC)));
    }

    #[test]
    fn edit_takes_a_reference_and_a_form() {
        assert_eq!(
            parse("edit 1 X | 1 | 2 | 3"),
            Command::Edit(ProductRef::Row(1), ProductForm::new("X", "1", "2", "3"))
        );
        assert_eq!(Command::parse("edit 1"), Err(CommandError::Usage(USAGE_EDIT)));
    }

    #[test]
    fn verbs_are_case_insensitive() {
        assert_eq!(parse("LIST"), Command::List);
        assert_eq!(parse("Quit"), Command::Quit);
    }

    #[test]
    fn unknown_verb() {
        assert_eq!(
            Command::parse("frobnicate"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }

    #[test]
    fn lenient_int_examples() {
        assert_eq!(lenient_int("42"), 42);
        assert_eq!(lenient_int("+7"), 7);
        assert_eq!(lenient_int("-3"), -3);
        assert_eq!(lenient_int("7 units"), 7);
        assert_eq!(lenient_int(""), 0);
        assert_eq!(lenient_int("x1"), 0);
        assert_eq!(lenient_int("99999999999999999999"), i64::MAX);
        assert_eq!(lenient_int("-99999999999999999999 units"), i64::MIN);
        assert_eq!(lenient_int("-9223372036854775808"), i64::MIN);
        assert_eq!(lenient_int("9223372036854775807"), i64::MAX);
    }
}
