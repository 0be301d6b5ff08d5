//! # Domain Types
//!
//! Core domain types used throughout Billing Desk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │    Product      │   │    Coupon       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  name           │   │  name           │       │
//! │  │  email          │   │  price_id       │   │  percent_off?   │       │
//! │  │  independent    │   │  unit_price_¢   │   │  amount_off?    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  All three are read-only views fetched from the billing provider's     │
//! │  catalog at workflow start. The core never mutates them.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every id is an opaque string minted by the billing provider. Coupons are
//! additionally looked up by a handful of well-known ids (the `coupon_ids`
//! constants) that carry the discount rules.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Well-Known Coupon IDs
// =============================================================================

/// Coupon ids the discount resolver selects by rule rather than user choice.
///
/// These are pre-configured on the billing provider; the ids are part of the
/// business contract, not invented locally.
pub mod coupon_ids {
    /// Bulk discount, 5-10 units.
    pub const BULK_TIER_1: &str = "bulk_tier_1";
    /// Bulk discount, 11-15 units.
    pub const BULK_TIER_2: &str = "bulk_tier_2";
    /// Bulk discount, 16+ units.
    pub const BULK_TIER_3: &str = "bulk_tier_3";
    /// Applied when the customer carries the `independent` attribute.
    pub const INDEPENDENT_ARTIST: &str = "independent_artist";
}

// =============================================================================
// Customer
// =============================================================================

/// A customer the invoice is drafted for.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    /// Opaque provider identifier.
    pub id: String,

    /// Display name shown in the customer picker.
    pub name: String,

    /// Contact email (the provider sends the invoice here).
    pub email: String,

    /// Immutable business attribute set at customer creation.
    /// Gates exactly one discount rule (the independent-artist coupon).
    pub independent: bool,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for invoicing.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Opaque provider identifier.
    pub id: String,

    /// Display name shown to the operator.
    pub name: String,

    /// Identifier of the product's active price on the billing provider.
    /// Submission is keyed on this, not on the product id.
    pub price_id: String,

    /// Authoritative per-unit price in cents (smallest currency unit).
    /// All money math derives from this to avoid floating-point drift.
    pub unit_price_cents: i64,
}

impl Product {
    /// Returns the per-unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Base total for `quantity` units, before any discounts.
    #[inline]
    pub fn base_total(&self, quantity: i64) -> Money {
        self.unit_price().multiply_quantity(quantity)
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A discount coupon fetched from the billing provider's catalog.
///
/// Exactly one of `percent_off`/`amount_off` is meaningful per coupon.
/// Mutual exclusivity is assumed from the provider, not enforced here; if
/// both are somehow set, percent-off wins (matching the resolver's order of
/// checks).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Coupon {
    /// Opaque provider identifier (also the well-known lookup key).
    pub id: String,

    /// Display name. May be empty; callers fall back to the id.
    pub name: String,

    /// Percentage discount, 0-100. The provider allows fractional percents.
    pub percent_off: Option<f64>,

    /// Fixed discount in cents.
    pub amount_off: Option<i64>,

    /// ISO currency code for `amount_off` coupons.
    pub currency: Option<String>,

    /// Provider-side validity flag. The resolver currently does NOT filter
    /// on this; expired-but-cached coupons still apply. See DESIGN.md.
    pub valid: bool,
}

impl Coupon {
    /// The name shown in "Discounts Applied (...)", falling back to the id
    /// when the provider left the name empty.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
