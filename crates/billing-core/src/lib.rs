//! # billing-core: Pure Business Logic for Billing Desk
//!
//! This crate is the **heart** of Billing Desk. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Billing Desk Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend Shell                               │   │
//! │  │    Compose form ──► Review screen ──► Spinner ──► Result page   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ IPC                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  billing-engine                                 │   │
//! │  │    InvoiceWorkflow, CatalogSnapshot, InvoiceGateway             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ billing-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │ discount  │  │  ledger   │   │   │
//! │  │   │ Customer  │  │   Money   │  │  resolve  │  │TitleLedger│   │   │
//! │  │   │  Product  │  │  (cents)  │  │bulk tiers │  │ resize    │   │   │
//! │  │   │  Coupon   │  │           │  │           │  │           │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, Coupon)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`discount`] - The discount resolver and bulk-tier selection
//! - [`ledger`] - The title ledger, length-synchronized with quantity
//! - [`error`] - Domain error types
//! - [`validation`] - Review-guard validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system access is FORBIDDEN here
//! 3. **Integer Money**: Base totals are integer cents (i64); only the
//!    resolver leaves integer space, and only until display rounding
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use billing_core::{discount, Money};
//!
//! // $20.00 per unit, 5 units
//! let base = Money::from_cents(2000).multiply_quantity(5);
//!
//! // No coupons in the catalog → zero discount, resolver never fails
//! let result = discount::resolve(base, 5, None, &HashMap::new());
//! assert_eq!(result.total_discount_cents, 0.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use billing_core::Money` instead of
// `use billing_core::money::Money`

pub use discount::{bulk_tier_for_quantity, resolve, DiscountResult};
pub use error::{ValidationError, ValidationResult};
pub use ledger::TitleLedger;
pub use money::Money;
pub use types::{coupon_ids, Coupon, Customer, Product};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of units on a single invoice draft.
///
/// ## Business Reason
/// Prevents accidental over-entry (e.g., typing 1000 instead of 10).
/// Can be made configurable in future versions.
pub const MAX_QUANTITY: i64 = 999;
