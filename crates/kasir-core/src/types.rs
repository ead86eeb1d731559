//! # Domain Types
//!
//! Core domain types used throughout the Kasir backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Category     │◄──│    Product      │◄──│  TransactionItem    │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  id             │   │  product_id (FK)    │   │
//! │  │  name           │   │  name, price    │   │  unit_price (frozen)│   │
//! │  │  description    │   │  stock          │   │  quantity           │   │
//! │  └─────────────────┘   │  category_id    │   │  line_total         │   │
//! │                        └─────────────────┘   └──────────┬──────────┘   │
//! │                                                         │ owned by     │
//! │                                              ┌──────────▼──────────┐   │
//! │                                              │    Transaction      │   │
//! │                                              │  total_amount       │   │
//! │                                              │  created_at         │   │
//! │                                              └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are integers assigned by the store on insert.
//!
//! Input types (`CategoryInput`, `ProductInput`) reject unknown JSON fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Category identifier.
pub type CategoryId = i64;

/// Product identifier.
pub type ProductId = i64;

/// Transaction identifier.
pub type TransactionId = i64;

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

/// Body of a category create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price in minor currency units.
    pub price: Money,

    /// Units on hand. Never negative in the store.
    pub stock: i64,

    /// Category this product was filed under.
    pub category_id: CategoryId,

    /// Name of the category, `None` when the category no longer exists.
    pub category_name: Option<String>,
}

impl Product {
    /// Checks whether `quantity` units can be taken from the current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity <= self.stock
    }
}

/// Body of a product create or update request.
///
/// `price` and `stock` default to zero when omitted; `name` and
/// `category_id` are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub price: Money,
    #[serde(default)]
    pub stock: i64,
    pub category_id: CategoryId,
}

// =============================================================================
// Checkout
// =============================================================================

/// One requested line of a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Body of `POST /api/checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

// =============================================================================
// Transaction
// =============================================================================

/// A completed checkout. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub created_at: DateTime<Utc>,
    pub total_amount: Money,
    pub items: Vec<TransactionItem>,
}

impl Transaction {
    /// Sum of the line totals. Equal to `total_amount` for every stored transaction.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(|item| item.line_total).sum()
    }
}

/// A line item in a transaction.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionItem {
    pub id: i64,
    pub transaction_id: TransactionId,
    pub product_id: ProductId,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub unit_price: Money,
    /// `unit_price × quantity`.
    pub line_total: Money,
}

// =============================================================================
// Reports
// =============================================================================

/// Best-selling product within a report window.
///
/// The zero value (`name: ""`, `qty_sold: 0`) means nothing was sold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BestSellingProduct {
    pub name: String,
    pub qty_sold: i64,
}

/// Sales summary over a report window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    pub total_revenue: Money,
    pub total_transactions: i64,
    pub best_product: BestSellingProduct,
}

// =============================================================================
// Unit Tests
// =============================================================================
