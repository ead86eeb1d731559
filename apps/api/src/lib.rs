//! # Kasir API
//!
//! REST server for the point-of-sale backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            API Layers                                   │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  routes/       │  │  services/     │  │  kasir-db                  ││
//! │  │                │  │                │  │                            ││
//! │  │ • extract      │─►│ • validate     │─►│ • CategoryStore            ││
//! │  │ • status codes │  │ • plan checkout│  │ • ProductStore             ││
//! │  │ • JSON bodies  │  │ • map errors   │  │ • TransactionStore         ││
//! │  │                │  │                │  │ • ReportStore              ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (a `.env` file is read first when present):
//! - `PORT` - HTTP port (default: 8080)
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `DB_CONN` - SQLite database path (default: kasir.db)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `LOG_LEVEL` - Log filter when `RUST_LOG` is unset (default: info)

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports
pub use config::{AppConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::build_app;
pub use state::AppState;
