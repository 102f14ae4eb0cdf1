//! # State Module
//!
//! Application state for the register.
//!
//! Instead of a single `AppState` struct, state is split by concern and each
//! command takes only the pieces it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Register                                   │   │
//! │  │  owns store, session, config                                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │    Store     │  │ SessionState │  │  RegisterConfig  │              │
//! │  │ (ranil-store)│  │              │  │                  │              │
//! │  │  catalog     │  │  User        │  │  store_name      │              │
//! │  │  sales       │  │  Cart        │  │  currency        │              │
//! │  │  accounts    │  │              │  │  deduct_stock    │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::RegisterConfig;
pub use session::SessionState;
