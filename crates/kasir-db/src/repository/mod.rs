//! # Repository Module
//!
//! SQLite implementations of the [`crate::store`] traits.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Service                                                               │
//! │       │                                                                 │
//! │       │  products.list(Some("kopi"))                                   │
//! │       ▼                                                                 │
//! │  ProductRepository (impl ProductStore)                                 │
//! │  ├── list(&self, name_filter)                                          │
//! │  ├── get(&self, id)                                                    │
//! │  ├── create(&self, input)                                              │
//! │  └── update(&self, id, input)                                          │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`] - Category CRUD
//! - [`ProductRepository`] - Product CRUD and name search
//! - [`TransactionRepository`] - Atomic checkout writes and reads
//! - [`ReportRepository`] - Sales aggregation

pub mod category;
pub mod product;
pub mod report;
pub mod transaction;

pub use category::CategoryRepository;
pub use product::ProductRepository;
pub use report::ReportRepository;
pub use transaction::TransactionRepository;
