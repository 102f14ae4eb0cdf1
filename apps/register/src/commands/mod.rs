//! # Commands Module
//!
//! Everything the operator can type at the register prompt.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (parsing, help)
//! ├── session.rs  ◄─── login, logout
//! ├── product.rs  ◄─── Product grid and search
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── sale.rs     ◄─── Checkout and receipt reprint
//! ├── report.rs   ◄─── Reports, dashboard, stock overview
//! └── manage.rs   ◄─── Products, suppliers, users (admin)
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Operator types:  add 1 0.25                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  parse() ──► Command::Add { product_id: "1", quantity: 0.25 }           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Register::execute()                                                    │
//! │         │  hands each command only the state it needs:                 │
//! │         │    cart::add_to_cart(&products, &mut session, ...)           │
//! │         ▼                                                               │
//! │  Outcome::Output(text) printed, or ShellError printed as "Error: ..."  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod manage;
pub mod product;
pub mod report;
pub mod sale;
pub mod session;

use ranil_core::validation::parse_quantity;
use ranil_core::{Quantity, ReportPeriod, Role};

use crate::error::{ShellError, ShellResult};

use manage::{ProductChange, ProductForm, SupplierChange, SupplierForm};

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { username: String },
    Logout,
    /// Product grid, optionally one category.
    Products { category: Option<String> },
    Categories,
    Search { query: String },
    /// Quantity defaults to 1.
    Add { product_id: String, quantity: Quantity },
    /// Zero or negative removes the line.
    Set { product_id: String, quantity: Quantity },
    Remove { product_id: String },
    Cart { json: bool },
    Clear,
    Checkout,
    Receipt { number: String },
    Report { period: ReportPeriod },
    Top,
    Dashboard,
    Stock,
    ProductAdd(ProductForm),
    ProductEdit { id: String, change: ProductChange },
    ProductDelete { id: String },
    /// Negative corrects stock down.
    Restock { product_id: String, quantity: Quantity },
    Suppliers,
    SupplierAdd(SupplierForm),
    SupplierEdit { id: String, change: SupplierChange },
    SupplierDelete { id: String },
    Users,
    /// Role defaults to seller.
    UserAdd { username: String, role: Role },
    UserActive { id: String, active: bool },
    Help,
    Quit,
}

/// What the shell should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Output(String),
    Quit,
}

/// Parses one input line.
///
/// Blank lines and `#` comments parse to `None`.
///
/// ## Example
/// ```rust
/// use ranil_register::commands::{parse, Command};
///
/// let command = parse("products Dog Food").unwrap();
/// assert_eq!(command, Some(Command::Products { category: Some("Dog Food".into()) }));
/// ```
pub fn parse(line: &str) -> ShellResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (name, rest) = split_word(line);
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match name.to_ascii_lowercase().as_str() {
        "login" => Command::Login {
            username: single(&args, "login <username>")?.to_string(),
        },
        "logout" => Command::Logout,
        "products" | "ls" => Command::Products {
            category: (!rest.is_empty()).then(|| rest.to_string()),
        },
        "categories" => Command::Categories,
        "search" | "find" => Command::Search {
            query: rest.to_string(),
        },
        "add" => match args.as_slice() {
            [id] => Command::Add {
                product_id: id.to_string(),
                quantity: Quantity::from_units(1),
            },
            [id, qty] => Command::Add {
                product_id: id.to_string(),
                quantity: parse_quantity(qty)?,
            },
            _ => return Err(ShellError::usage("Usage: add <product-id> [quantity]")),
        },
        "set" => match args.as_slice() {
            [id, qty] => Command::Set {
                product_id: id.to_string(),
                quantity: Quantity::parse(qty)?,
            },
            _ => return Err(ShellError::usage("Usage: set <product-id> <quantity>")),
        },
        "remove" | "rm" => Command::Remove {
            product_id: single(&args, "remove <product-id>")?.to_string(),
        },
        "cart" => match args.as_slice() {
            [] => Command::Cart { json: false },
            ["--json"] => Command::Cart { json: true },
            _ => return Err(ShellError::usage("Usage: cart [--json]")),
        },
        "clear" => Command::Clear,
        "checkout" | "pay" => Command::Checkout,
        "receipt" => Command::Receipt {
            number: single(&args, "receipt <receipt-number>")?.to_string(),
        },
        "report" => {
            let raw = match args.as_slice() {
                [] => "daily",
                [period] => *period,
                _ => return Err(ShellError::usage("Usage: report [daily|weekly|monthly]")),
            };
            Command::Report {
                period: raw.parse::<ReportPeriod>().map_err(ShellError::usage)?,
            }
        }
        "top" => Command::Top,
        "dashboard" => Command::Dashboard,
        "stock" => Command::Stock,
        "product" => parse_product(rest)?,
        "restock" => match args.as_slice() {
            [id, qty] => Command::Restock {
                product_id: id.to_string(),
                quantity: Quantity::parse(qty)?,
            },
            _ => return Err(ShellError::usage("Usage: restock <product-id> <quantity>")),
        },
        "suppliers" => Command::Suppliers,
        "supplier" => parse_supplier(rest)?,
        "users" => Command::Users,
        "user" => parse_user(&args)?,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(ShellError::usage(format!(
                "Unknown command '{}'. Type 'help' for a list.",
                other
            )))
        }
    };

    Ok(Some(command))
}

fn parse_product(rest: &str) -> ShellResult<Command> {
    let (action, tail) = split_word(rest);
    let command = match action.to_ascii_lowercase().as_str() {
        "add" => Command::ProductAdd(manage::parse_product_form(tail)?),
        "edit" => {
            let (id, field, value) = edit_args(tail, "product edit <id> <field> <value>")?;
            Command::ProductEdit {
                id: id.to_string(),
                change: manage::parse_product_change(field, value)?,
            }
        }
        "delete" => Command::ProductDelete {
            id: single(&words(tail), "product delete <id>")?.to_string(),
        },
        _ => return Err(ShellError::usage("Usage: product add|edit|delete ...")),
    };
    Ok(command)
}

fn parse_supplier(rest: &str) -> ShellResult<Command> {
    let (action, tail) = split_word(rest);
    let command = match action.to_ascii_lowercase().as_str() {
        "add" => Command::SupplierAdd(manage::parse_supplier_form(tail)?),
        "edit" => {
            let (id, field, value) = edit_args(tail, "supplier edit <id> <field> <value>")?;
            Command::SupplierEdit {
                id: id.to_string(),
                change: manage::parse_supplier_change(field, value)?,
            }
        }
        "delete" => Command::SupplierDelete {
            id: single(&words(tail), "supplier delete <id>")?.to_string(),
        },
        _ => return Err(ShellError::usage("Usage: supplier add|edit|delete ...")),
    };
    Ok(command)
}

fn parse_user(args: &[&str]) -> ShellResult<Command> {
    let command = match args {
        ["add", username] => Command::UserAdd {
            username: username.to_string(),
            role: Role::Seller,
        },
        ["add", username, role] => Command::UserAdd {
            username: username.to_string(),
            role: role.parse::<Role>().map_err(ShellError::usage)?,
        },
        ["activate", id] => Command::UserActive {
            id: id.to_string(),
            active: true,
        },
        ["deactivate", id] => Command::UserActive {
            id: id.to_string(),
            active: false,
        },
        _ => {
            return Err(ShellError::usage(
                "Usage: user add <username> [admin|seller] | user activate|deactivate <id>",
            ))
        }
    };
    Ok(command)
}

/// `<id> <field> <value...>`
fn edit_args<'a>(tail: &'a str, usage: &str) -> ShellResult<(&'a str, &'a str, &'a str)> {
    let (id, tail) = split_word(tail);
    let (field, value) = split_word(tail);
    if id.is_empty() || field.is_empty() || value.is_empty() {
        return Err(ShellError::usage(format!("Usage: {}", usage)));
    }
    Ok((id, field, value))
}

/// First word and the trimmed remainder.
fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn words(input: &str) -> Vec<&str> {
    input.split_whitespace().collect()
}

fn single<'a>(args: &[&'a str], usage: &str) -> ShellResult<&'a str> {
    match args {
        [one] => Ok(*one),
        _ => Err(ShellError::usage(format!("Usage: {}", usage))),
    }
}

pub const HELP: &str = "\
Commands:
  login <username>            Sign in
  logout                      Sign out (discards the cart)
  products [category]         Product grid; category \"All\" shows everything
  categories                  List categories
  search <text>               Search by name or category
  add <id> [qty]              Reserve stock (qty defaults to 1, decimals allowed)
  set <id> <qty>              Replace the quantity; 0 removes the line
  remove <id>                 Drop a line from the cart
  cart [--json]               Show the cart
  clear                       Empty the cart
  checkout                    Complete the sale and print the receipt
  receipt <number>            Reprint a receipt
  report [daily|weekly|monthly]  Sales report (admin)
  top                         Best sellers (admin)
  dashboard                   Dashboard summary (admin)
  stock                       Stock overview and low stock

Administration:
  product add <name> | <category> | <price> | <stock> | <unit> | <threshold> | <supplier-id>
  product edit <id> <field> <value>   Fields: name, category, price, stock, unit, threshold, supplier
  product delete <id>
  restock <id> <qty>          Add to stock (negative corrects it down)
  suppliers                   List suppliers
  supplier add <name> | <contact> | <email>
  supplier edit <id> <field> <value>  Fields: name, contact, email
  supplier delete <id>        Only when no product uses it
  users                       List accounts
  user add <username> [admin|seller]
  user activate|deactivate <id>

  help                        This list
  quit                        Leave the register
";

#[cfg(test)]
mod tests {
    use crate::error::ErrorCode;

    use super::*;

    #[test]
    fn test_parse_cart_commands() {
        assert_eq!(
            parse("add 1 0.25").unwrap(),
            Some(Command::Add {
                product_id: "1".into(),
                quantity: Quantity::parse("0.25").unwrap(),
            })
        );
        assert_eq!(
            parse("ADD 30").unwrap(),
            Some(Command::Add {
                product_id: "30".into(),
                quantity: Quantity::from_units(1),
            })
        );
        assert_eq!(
            parse("set 30 0").unwrap(),
            Some(Command::Set {
                product_id: "30".into(),
                quantity: Quantity::zero(),
            })
        );
        assert_eq!(parse("cart --json").unwrap(), Some(Command::Cart { json: true }));
    }

    #[test]
    fn test_add_rejects_bad_quantity() {
        assert_eq!(parse("add 1 -2").unwrap_err().code, ErrorCode::InvalidQuantity);
        assert_eq!(parse("add 1 lots").unwrap_err().code, ErrorCode::InvalidQuantity);
        assert_eq!(parse("add").unwrap_err().code, ErrorCode::Usage);
    }

    #[test]
    fn test_parse_multiword_arguments() {
        assert_eq!(
            parse("search  cat   litter").unwrap(),
            Some(Command::Search {
                query: "cat   litter".into()
            })
        );
        assert_eq!(parse("products").unwrap(), Some(Command::Products { category: None }));
    }

    #[test]
    fn test_parse_reports() {
        assert_eq!(
            parse("report").unwrap(),
            Some(Command::Report {
                period: ReportPeriod::Daily
            })
        );
        assert_eq!(
            parse("report month").unwrap(),
            Some(Command::Report {
                period: ReportPeriod::Monthly
            })
        );
        assert_eq!(parse("report yearly").unwrap_err().code, ErrorCode::Usage);
    }

    #[test]
    fn test_parse_management() {
        assert_eq!(
            parse("product edit 30 name Round Up 1L").unwrap(),
            Some(Command::ProductEdit {
                id: "30".into(),
                change: ProductChange::Name("Round Up 1L".into()),
            })
        );
        assert_eq!(
            parse("product delete 30").unwrap(),
            Some(Command::ProductDelete { id: "30".into() })
        );
        assert!(matches!(
            parse("product add Vitality | Dog Food | 180 | 40 | kg | 10 | 1").unwrap(),
            Some(Command::ProductAdd(form)) if form.name == "Vitality"
        ));
        assert_eq!(
            parse("restock 30 -2").unwrap(),
            Some(Command::Restock {
                product_id: "30".into(),
                quantity: Quantity::from_units(-2),
            })
        );
        assert_eq!(
            parse("supplier edit 2 email sales@lankafeed.lk").unwrap(),
            Some(Command::SupplierEdit {
                id: "2".into(),
                change: SupplierChange::Email("sales@lankafeed.lk".into()),
            })
        );
        assert_eq!(
            parse("user add new_clerk").unwrap(),
            Some(Command::UserAdd {
                username: "new_clerk".into(),
                role: Role::Seller,
            })
        );
        assert_eq!(
            parse("user deactivate 3").unwrap(),
            Some(Command::UserActive {
                id: "3".into(),
                active: false,
            })
        );
    }

    #[test]
    fn test_management_usage_errors() {
        assert_eq!(parse("product edit 30 price").unwrap_err().code, ErrorCode::Usage);
        assert_eq!(parse("product rename 30").unwrap_err().code, ErrorCode::Usage);
        assert_eq!(parse("user add clerk owner").unwrap_err().code, ErrorCode::Usage);
        assert_eq!(parse("restock 30").unwrap_err().code, ErrorCode::Usage);
        assert_eq!(parse("supplier delete").unwrap_err().code, ErrorCode::Usage);
    }

    #[test]
    fn test_blank_comment_and_unknown() {
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("# morning shift").unwrap(), None);
        assert_eq!(parse("refund 3").unwrap_err().code, ErrorCode::Usage);
        assert_eq!(parse("login").unwrap_err().code, ErrorCode::Usage);
    }
}
