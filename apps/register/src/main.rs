//! # Ranil Register Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ranil Register                                   │
//! │                                                                         │
//! │  stdin ──► commands::parse ──► Register::execute ──► stdout            │
//! │                                      │                                  │
//! │                          ┌───────────┴───────────┐                      │
//! │                          ▼                       ▼                      │
//! │                    ranil-core              ranil-store                  │
//! │                  (cart, receipts,        (catalog, sales,               │
//! │                   reports)                accounts)                     │
//! │                                                                         │
//! │  logs (tracing) ──► stderr                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The setup lives in lib.rs so the loop can be driven from tests.

use std::process::ExitCode;

fn main() -> ExitCode {
    match ranil_register::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ranil-register: {}", err);
            ExitCode::FAILURE
        }
    }
}
