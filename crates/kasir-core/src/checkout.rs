//! # Checkout Pricing
//!
//! Turns a requested cart into a [`CheckoutPlan`]: every line priced from a
//! snapshot of the products, stock checked, totals computed. Persisting the
//! plan is the database layer's job.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [{product_id: 1, quantity: 3}]        products snapshot {1: stock 10} │
//! │       │                                         │                       │
//! │       └──────────────┬──────────────────────────┘                       │
//! │                      ▼                                                  │
//! │  plan_checkout()                                                        │
//! │   1. shape check      → ValidationError (empty, quantity <= 0)          │
//! │   2. resolve products → ProductNotFound                                 │
//! │   3. summed demand    → InsufficientStock                               │
//! │   4. price lines      → AmountOverflow                                  │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  CheckoutPlan { lines: [{unit_price 3500, line_total 10500}],           │
//! │                 total_amount: 10500 }                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stock check here runs against a snapshot. The store repeats it as a
//! conditional update inside the write transaction, which is what actually
//! prevents overselling.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CheckoutItem, Product, ProductId};
use crate::validation::validate_checkout_items;

/// One priced line of a checkout plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// A validated, priced checkout ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPlan {
    lines: Vec<PricedLine>,
    total_amount: Money,
}

impl CheckoutPlan {
    /// Lines in request order.
    pub fn lines(&self) -> &[PricedLine] {
        &self.lines
    }

    /// Sum of all line totals.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Quantity to take from each product, summed across lines.
    ///
    /// Products appear in order of first mention in the request.
    pub fn stock_demand(&self) -> Vec<(ProductId, i64)> {
        let mut demand: Vec<(ProductId, i64)> = Vec::new();
        for line in &self.lines {
            match demand.iter_mut().find(|(id, _)| *id == line.product_id) {
                Some((_, qty)) => *qty += line.quantity,
                None => demand.push((line.product_id, line.quantity)),
            }
        }
        demand
    }

    /// Name recorded for a product on this plan, used in error messages.
    pub fn product_name(&self, product_id: ProductId) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map(|line| line.product_name.as_str())
    }
}

/// Prices a checkout against a snapshot of the referenced products.
///
/// ## Errors
/// - `Validation` when `items` is empty or a quantity is not positive
/// - `ProductNotFound` for the first item whose product is missing from `products`
/// - `InsufficientStock` when the summed quantity for a product exceeds its stock
/// - `AmountOverflow` when a line total or the grand total overflows
///
/// ## Example
/// ```rust
/// use std::collections::HashMap;
/// use kasir_core::{checkout::plan_checkout, CheckoutItem, Money, Product};
///
/// let product = Product {
///     id: 1,
///     name: "Kopi Susu".to_string(),
///     price: Money::from_minor(3500),
///     stock: 10,
///     category_id: 1,
///     category_name: None,
/// };
/// let products = HashMap::from([(1, product)]);
///
/// let plan = plan_checkout(&[CheckoutItem { product_id: 1, quantity: 3 }], &products).unwrap();
/// assert_eq!(plan.total_amount(), Money::from_minor(10500));
/// ```
pub fn plan_checkout(
    items: &[CheckoutItem],
    products: &HashMap<ProductId, Product>,
) -> CoreResult<CheckoutPlan> {
    validate_checkout_items(items)?;

    // Step 1: every product must resolve before anything else is judged.
    let mut resolved: Vec<(&CheckoutItem, &Product)> = Vec::with_capacity(items.len());
    for item in items {
        let product = products
            .get(&item.product_id)
            .ok_or(CoreError::ProductNotFound(item.product_id))?;
        resolved.push((item, product));
    }

    // Step 2: stock, judged on the summed demand per product.
    let mut demand: HashMap<ProductId, i64> = HashMap::with_capacity(resolved.len());
    for (item, product) in &resolved {
        let requested = demand.entry(product.id).or_insert(0);
        *requested = requested
            .checked_add(item.quantity)
            .ok_or(CoreError::AmountOverflow { what: "quantity" })?;

        if !product.can_sell(*requested) {
            return Err(CoreError::InsufficientStock {
                product_id: product.id,
                name: product.name.clone(),
                available: Some(product.stock),
                requested: *requested,
            });
        }
    }

    // Step 3: price every line, freezing the current unit price.
    let mut lines = Vec::with_capacity(resolved.len());
    let mut total_amount = Money::zero();
    for (item, product) in resolved {
        let line_total = product
            .price
            .checked_mul_quantity(item.quantity)
            .ok_or(CoreError::AmountOverflow { what: "line total" })?;
        total_amount = total_amount
            .checked_add(line_total)
            .ok_or(CoreError::AmountOverflow { what: "total amount" })?;

        lines.push(PricedLine {
            product_id: product.id,
            product_name: product.name.clone(),
            quantity: item.quantity,
            unit_price: product.price,
            line_total,
        });
    }

    Ok(CheckoutPlan {
        lines,
        total_amount,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
