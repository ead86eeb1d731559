//! # Service Layer
//!
//! Business rules between the HTTP handlers and the stores.
//!
//! ```text
//! ┌────────────────────┐  ┌────────────────────┐  ┌────────────────────┐  ┌────────────────────┐
//! │ CategoryService    │  │ ProductService     │  │ CheckoutService    │  │ ReportService      │
//! │ • list / get       │  │ • list(name?)      │  │ • checkout         │  │ • today            │
//! │ • create / update  │  │ • create / update  │  │   (plan + record)  │  │ • range            │
//! │ • delete           │  │ • delete           │  │                    │  │                    │
//! └─────────┬──────────┘  └─────────┬──────────┘  └─────────┬──────────┘  └─────────┬──────────┘
//!           ▼                       ▼                       ▼                       ▼
//!     CategoryStore       ProductStore + Category  ProductStore + Transaction   ReportStore
//! ```
//!
//! Every service holds `Arc<dyn ...Store>`, so cloning one is cheap and
//! tests can run them against in-process stubs.

pub mod category;
pub mod checkout;
pub mod product;
pub mod report;

pub use category::CategoryService;
pub use checkout::CheckoutService;
pub use product::ProductService;
pub use report::ReportService;
