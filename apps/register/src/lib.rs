//! # Ranil Register Library
//!
//! The terminal register: a line-oriented shell over `ranil-core` and
//! `ranil-store`.
//!
//! ## Module Organization
//! ```text
//! ranil_register/
//! ├── lib.rs          ◄─── You are here (Register, read-eval-print loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Signed-in user and cart
//! │   └── config.rs   ◄─── Configuration from the environment
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing and help
//! │   ├── session.rs  ◄─── login / logout
//! │   ├── product.rs  ◄─── Product grid and search
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── sale.rs     ◄─── Checkout, receipt reprint
//! │   ├── report.rs   ◄─── Reports and dashboard
//! │   └── manage.rs   ◄─── Products, suppliers, users
//! └── error.rs        ◄─── Shell error type
//! ```
//!
//! ## Output Streams
//! Command output goes to stdout. Logs go to stderr so a scripted session
//! can be piped without log noise in the results.

pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, BufRead, Write};

use chrono::Utc;
use tracing::{info, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use ranil_store::Store;

use commands::{cart, manage, product, report, sale, session, Command, Outcome, HELP};
use error::{ShellError, ShellResult};
use state::{RegisterConfig, SessionState};

/// One register: the store it sells from, the operator's session and its
/// configuration.
#[derive(Debug)]
pub struct Register {
    store: Store,
    session: SessionState,
    config: RegisterConfig,
}

impl Register {
    /// Creates the store described by `config` and a signed-out session.
    pub fn new(config: RegisterConfig) -> ShellResult<Self> {
        let store = Store::new(config.store_config())?;
        Ok(Register::with_store(store, config))
    }

    /// Uses an existing store, e.g. one shared with another register.
    pub fn with_store(store: Store, config: RegisterConfig) -> Self {
        Register {
            store,
            session: SessionState::new(),
            config,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    /// Prompt showing who is signed in.
    pub fn prompt(&self) -> String {
        match self.session.user() {
            Some(user) => format!("{}> ", user.username),
            None => "ranil> ".to_string(),
        }
    }

    /// Runs one command against this register.
    pub fn execute(&mut self, command: Command) -> ShellResult<Outcome> {
        let text = match command {
            Command::Login { username } => {
                let user = session::login(&self.store.users(), &mut self.session, &username)?;
                format!("Welcome, {} ({}).\n", user.username, user.role.as_str())
            }
            Command::Logout => {
                let user = session::logout(&mut self.session)?;
                format!("Goodbye, {}.\n", user.username)
            }
            Command::Products { category } => {
                let rows = product::list_products(
                    &self.store.products(),
                    self.session.cart(),
                    category.as_deref(),
                );
                product::render_products(&rows, &self.config)
            }
            Command::Categories => {
                let mut text = product::list_categories(&self.store.products()).join("\n");
                text.push('\n');
                text
            }
            Command::Search { query } => {
                let rows =
                    product::search_products(&self.store.products(), self.session.cart(), &query)?;
                product::render_products(&rows, &self.config)
            }
            Command::Add {
                product_id,
                quantity,
            } => {
                let cart = cart::add_to_cart(
                    &self.store.products(),
                    &mut self.session,
                    &product_id,
                    quantity,
                )?;
                cart::render_cart(&cart, &self.config)
            }
            Command::Set {
                product_id,
                quantity,
            } => {
                let cart = cart::set_quantity(
                    &self.store.products(),
                    &mut self.session,
                    &product_id,
                    quantity,
                )?;
                cart::render_cart(&cart, &self.config)
            }
            Command::Remove { product_id } => {
                let cart = cart::remove_from_cart(&mut self.session, &product_id)?;
                cart::render_cart(&cart, &self.config)
            }
            Command::Cart { json } => {
                let cart = cart::get_cart(&self.session)?;
                if json {
                    let mut text = serde_json::to_string_pretty(&cart)
                        .map_err(|e| ShellError::internal(e.to_string()))?;
                    text.push('\n');
                    text
                } else {
                    cart::render_cart(&cart, &self.config)
                }
            }
            Command::Clear => {
                let cart = cart::clear_cart(&mut self.session)?;
                cart::render_cart(&cart, &self.config)
            }
            Command::Checkout => {
                let done = sale::checkout(
                    &self.store.products(),
                    &mut self.store.sales(),
                    &mut self.session,
                    &self.config,
                )?;
                done.receipt
            }
            Command::Receipt { number } => {
                sale::reprint_receipt(&self.store.sales(), &self.session, &self.config, &number)?
            }
            Command::Report { period } => {
                let today = Utc::now().date_naive();
                let report = report::sales_report(&self.store.sales(), &self.session, period, today)?;
                report::render_sales_report(&report, &self.config)
            }
            Command::Top => {
                let rows = report::top_products(&self.store.sales(), &self.session)?;
                report::render_top_products(&rows, &self.config)
            }
            Command::Dashboard => {
                let today = Utc::now().date_naive();
                let summary = report::dashboard(
                    &self.store.products(),
                    &self.store.sales(),
                    &self.session,
                    today,
                )?;
                report::render_dashboard(&summary, &self.config)
            }
            Command::Stock => {
                let report = report::stock_report(&self.store.products(), &self.session)?;
                report::render_stock_report(&report)
            }
            Command::ProductAdd(form) => {
                let p = manage::add_product(
                    &self.store.products(),
                    &self.store.suppliers(),
                    &self.session,
                    form,
                )?;
                format!("Added product {}: {}.\n", p.id, p.name)
            }
            Command::ProductEdit { id, change } => {
                let p = manage::edit_product(
                    &self.store.products(),
                    &self.store.suppliers(),
                    &self.session,
                    &id,
                    change,
                )?;
                format!("Updated product {}: {}.\n", p.id, p.name)
            }
            Command::ProductDelete { id } => {
                let p = manage::delete_product(&self.store.products(), &self.session, &id)?;
                format!("Deleted product {}: {}.\n", p.id, p.name)
            }
            Command::Restock {
                product_id,
                quantity,
            } => {
                let p =
                    manage::restock(&self.store.products(), &self.session, &product_id, quantity)?;
                format!("{} stock is now {} {}.\n", p.name, p.stock, p.unit)
            }
            Command::Suppliers => {
                let rows = manage::list_suppliers(&self.store.suppliers(), &self.session)?;
                manage::render_suppliers(&rows)
            }
            Command::SupplierAdd(form) => {
                let s = manage::add_supplier(&self.store.suppliers(), &self.session, form)?;
                format!("Added supplier {}: {}.\n", s.id, s.name)
            }
            Command::SupplierEdit { id, change } => {
                let s = manage::edit_supplier(&self.store.suppliers(), &self.session, &id, change)?;
                format!("Updated supplier {}: {}.\n", s.id, s.name)
            }
            Command::SupplierDelete { id } => {
                let s = manage::delete_supplier(
                    &self.store.products(),
                    &self.store.suppliers(),
                    &self.session,
                    &id,
                )?;
                format!("Deleted supplier {}: {}.\n", s.id, s.name)
            }
            Command::Users => {
                let rows = manage::list_users(&self.store.users(), &self.session)?;
                manage::render_users(&rows)
            }
            Command::UserAdd { username, role } => {
                let u = manage::add_user(&self.store.users(), &self.session, &username, role)?;
                format!("Added {} {} (id {}).\n", u.role.as_str(), u.username, u.id)
            }
            Command::UserActive { id, active } => {
                let u = manage::set_user_active(&self.store.users(), &self.session, &id, active)?;
                let state = if u.active { "active" } else { "inactive" };
                format!("{} is now {}.\n", u.username, state)
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Output(text))
    }
}

/// Runs the register on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Register Startup                                  │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • RANIL_* environment variables over defaults                       │
/// │                                                                         │
/// │  3. Create Store ─────────────────────────────────────────────────────► │
/// │     • Seeded with the demo catalog unless RANIL_SEED=0                  │
/// │                                                                         │
/// │  4. Read-Eval-Print Loop ─────────────────────────────────────────────► │
/// │     • Until `quit` or end of input                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = RegisterConfig::from_env();
    info!(
        store_name = %config.store_name,
        register_id = config.register_id,
        deduct_stock = config.deduct_stock,
        "Starting Ranil register"
    );

    let mut register = Register::new(config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "{} - type 'help' for commands",
        register.config().store_name
    )?;
    run_loop(&mut register, stdin.lock(), &mut out)?;

    info!("Register closed");
    Ok(())
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Command failures are printed as `Error: ...` and the loop continues.
pub fn run_loop<R, W>(register: &mut Register, input: R, output: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(output, "{}", register.prompt())?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        let outcome = commands::parse(&line).and_then(|command| match command {
            Some(command) => register.execute(command),
            None => Ok(Outcome::Output(String::new())),
        });

        match outcome {
            Ok(Outcome::Output(text)) => write!(output, "{}", text)?,
            Ok(Outcome::Quit) => break,
            Err(err) => writeln!(output, "Error: {}", err)?,
        }
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ranil=trace` - Show trace for ranil crates only
/// - Default: INFO, DEBUG for ranil crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

const DEFAULT_LOG_FILTER: &str = "info,ranil=debug";

/// Formatting subscriber writing to stderr. `filter` alone decides what
/// gets through.
fn log_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish()
}

#[cfg(test)]
mod tests {
    use ranil_core::Quantity;
    use tracing::Level;

    use super::*;

    fn register() -> Register {
        Register::new(RegisterConfig::default()).unwrap()
    }

    fn drive(register: &mut Register, script: &str) -> String {
        let mut out = Vec::new();
        run_loop(register, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_scripted_sale() {
        let mut register = register();
        let before = register.store().sales().count();

        let out = drive(
            &mut register,
            "login seller\nadd 1 0.25\nadd 30 12\nadd 30 4\ncheckout\nquit\n",
        );

        assert!(out.contains("Welcome, seller (seller)."));
        assert!(out.contains("Error: Cannot add 12 bottle. Only 10 bottle available."));
        assert!(out.contains("Total Amount"));
        assert!(out.contains("₱1,981.25"));
        assert_eq!(register.store().sales().count(), before + 1);
        assert!(register.session().cart().unwrap().is_empty());
    }

    #[test]
    fn test_errors_do_not_end_the_session() {
        let mut register = register();

        let out = drive(&mut register, "add 1\nbogus\nlogin admin\ndashboard\n");

        assert!(out.contains("Error: Please log in first"));
        assert!(out.contains("Error: Unknown command 'bogus'"));
        assert!(out.contains("Products: 31"));
        // End of input leaves the session as it was.
        assert_eq!(register.session().user().unwrap().username, "admin");
    }

    #[test]
    fn test_seller_cannot_open_reports() {
        let mut register = register();
        let out = drive(&mut register, "login seller\nreport weekly\nstock\n");

        assert!(out.contains("Error: Only administrators can view reports"));
        assert!(out.contains("In stock: "));
    }

    #[test]
    fn test_execute_cart_json() {
        let mut register = register();
        register
            .execute(Command::Login {
                username: "seller".into(),
            })
            .unwrap();
        register
            .execute(Command::Add {
                product_id: "25".into(),
                quantity: Quantity::from_units(3),
            })
            .unwrap();

        let Outcome::Output(text) = register.execute(Command::Cart { json: true }).unwrap() else {
            panic!("expected output");
        };
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["totals"]["itemCount"], 1);
    }

    #[test]
    fn test_default_log_filter() {
        let subscriber = log_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "parking_lot", Level::INFO));
            assert!(!tracing::enabled!(target: "parking_lot", Level::DEBUG));
            assert!(!tracing::enabled!(target: "parking_lot", Level::TRACE));
            assert!(tracing::enabled!(target: "ranil_store::repository", Level::DEBUG));
            assert!(!tracing::enabled!(target: "ranil_store::repository", Level::TRACE));
        });
    }

    #[test]
    fn test_admin_manages_catalog_and_accounts() {
        let mut register = register();

        let out = drive(
            &mut register,
            "login admin\n\
             product add Vitality Adult | Dog Food | 180 | 40 | kg | 10 | 1\n\
             restock 30 5\n\
             supplier add Pet Depot | 0774567890 | orders@petdepot.lk\n\
             user add new_clerk\n\
             user deactivate 1\n\
             users\n",
        );

        assert!(out.contains("Added product 32: Vitality Adult."));
        assert!(out.contains("Round Up stock is now 15 bottle."));
        assert!(out.contains("Added supplier 4: Pet Depot."));
        assert!(out.contains("Added seller new_clerk (id 6)."));
        assert!(out.contains("Error: You cannot deactivate your own account"));
        assert!(out.contains("Active users (5)"));

        let out = drive(&mut register, "logout\nlogin new_clerk\nproduct delete 32\n");
        assert!(out.contains("Welcome, new_clerk (seller)."));
        assert!(out.contains("Error: Only administrators can manage products"));
        assert!(register.store().products().get_by_id("32").is_some());
    }

    #[test]
    fn test_prompt_follows_session() {
        let mut register = register();
        assert_eq!(register.prompt(), "ranil> ");
        drive(&mut register, "login john_seller\n");
        assert_eq!(register.prompt(), "john_seller> ");
    }
}
