//! # Discount Resolver
//!
//! Pure resolution of the final price from a base total, a quantity, a
//! customer attribute, and the coupon catalog.
//!
//! ## Resolution Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Discount Resolution                                  │
//! │                                                                         │
//! │  (base_total, quantity, customer, coupons)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Pick ONE bulk tier by quantity band (first match wins)              │
//! │       5..=10 → bulk_tier_1    11..=15 → bulk_tier_2    16+ → tier_3     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. customer.independent? → add independent_artist (if present)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Accumulate:  percent-off coupons multiply, in selection order       │
//! │                  amount-off coupons sum into a fixed deduction          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  final = multiplicative - fixed                                         │
//! │  discount = base - final          (NOT clamped at zero)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This function never fails. Coupon ids absent from the catalog are
//! silently skipped, and an empty selection yields a zero discount.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{coupon_ids, Coupon, Customer};

// =============================================================================
// Discount Result
// =============================================================================

/// Outcome of one discount resolution.
///
/// Recomputed from scratch whenever quantity, product, customer, or the
/// coupon set changes; never stored in the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiscountResult {
    /// Total discount in cents. Fractional cents are possible until display
    /// rounding (percent-off coupons multiply), and the value goes negative
    /// when fixed deductions overshoot the discounted total.
    pub total_discount_cents: f64,

    /// Display names of the applied coupons, in selection order
    /// (bulk tier first, independent-artist second).
    pub applied_coupon_names: Vec<String>,
}

impl DiscountResult {
    /// A resolution with nothing applied.
    pub fn none() -> Self {
        DiscountResult {
            total_discount_cents: 0.0,
            applied_coupon_names: Vec::new(),
        }
    }

    /// Final total in (possibly fractional) cents for the given base.
    pub fn final_total_cents(&self, base_total: Money) -> f64 {
        base_total.cents() as f64 - self.total_discount_cents
    }

    /// Comma-joined coupon names for the "Discounts Applied (...)" label.
    pub fn coupon_label(&self) -> String {
        self.applied_coupon_names.join(", ")
    }

    /// True when no coupon applied.
    pub fn is_empty(&self) -> bool {
        self.applied_coupon_names.is_empty()
    }
}

// =============================================================================
// Tier Selection
// =============================================================================

/// Selects the bulk-tier coupon id for a quantity, if any.
///
/// Bands are evaluated in fixed priority, first match wins; boundaries are
/// inclusive on the lower tier (10 → tier 1, 11 → tier 2, 16 → tier 3).
pub fn bulk_tier_for_quantity(quantity: i64) -> Option<&'static str> {
    match quantity {
        5..=10 => Some(coupon_ids::BULK_TIER_1),
        11..=15 => Some(coupon_ids::BULK_TIER_2),
        q if q > 15 => Some(coupon_ids::BULK_TIER_3),
        _ => None,
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves the discount for one draft state.
///
/// ## Arguments
/// * `base_total` - unit price × quantity, in integer cents
/// * `quantity` - units being invoiced
/// * `customer` - the selected customer, if any (gates independent_artist)
/// * `coupons` - the catalog, keyed by coupon id
///
/// ## Semantics
/// - At most one bulk-tier coupon and at most one independent-artist coupon
///   are selected; selection order is fixed (bulk first).
/// - Percent-off coupons apply multiplicatively in selection order;
///   amount-off coupons sum separately and deduct after.
/// - The `valid` flag is deliberately NOT consulted, matching the behavior
///   the desk has always had (see the open questions in DESIGN.md).
/// - The result is never clamped: stacked discounts can exceed the base.
pub fn resolve(
    base_total: Money,
    quantity: i64,
    customer: Option<&Customer>,
    coupons: &HashMap<String, Coupon>,
) -> DiscountResult {
    let mut selected: Vec<&Coupon> = Vec::new();

    if let Some(tier_id) = bulk_tier_for_quantity(quantity) {
        if let Some(coupon) = coupons.get(tier_id) {
            selected.push(coupon);
        }
    }

    if customer.map(|c| c.independent).unwrap_or(false) {
        if let Some(coupon) = coupons.get(coupon_ids::INDEPENDENT_ARTIST) {
            selected.push(coupon);
        }
    }

    if selected.is_empty() {
        return DiscountResult::none();
    }

    let base_cents = base_total.cents() as f64;
    let mut multiplicative = base_cents;
    let mut fixed_cents = 0.0;

    for coupon in &selected {
        if let Some(percent) = coupon.percent_off {
            multiplicative *= (100.0 - percent) / 100.0;
        } else if let Some(amount) = coupon.amount_off {
            fixed_cents += amount as f64;
        }
    }

    let final_total = multiplicative - fixed_cents;

    DiscountResult {
        total_discount_cents: base_cents - final_total,
        applied_coupon_names: selected
            .iter()
            .map(|c| c.display_name().to_string())
            .collect(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
