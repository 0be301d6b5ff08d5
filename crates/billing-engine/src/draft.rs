//! # Invoice Draft
//!
//! The in-progress, not-yet-submitted invoice data. One explicit value
//! owned by the workflow state machine and handed to presentation layers
//! by reference, never duplicated.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  created when the workflow starts (Compose)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mutated throughout Compose (customer, product, quantity, titles)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  frozen (read-only) once Review is entered                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cleared to defaults on Result(success); preserved on Result(error)     │
//! │  destroyed when the workflow exits                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! INVARIANT: `titles.len() == quantity` after every quantity change —
//! `set_quantity` resizes the ledger before returning, so any discount
//! recomputation that follows sees the settled ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use billing_core::{Money, Product, TitleLedger};

/// Default quantity for a fresh draft.
pub const DEFAULT_QUANTITY: i64 = 1;

/// The invoice being assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    /// Selected customer id; empty string means unset.
    pub customer_id: String,

    /// Selected product snapshot, frozen at selection time so the draft
    /// displays consistent data even if the catalog refreshes underneath.
    pub product: Option<Product>,

    /// Units being invoiced (>= 1).
    pub quantity: i64,

    /// Per-unit titles, length-synchronized with `quantity`.
    pub titles: TitleLedger,

    /// When this draft was started (or last cleared).
    pub created_at: DateTime<Utc>,
}

impl InvoiceDraft {
    /// Creates a fresh draft with empty defaults.
    pub fn new() -> Self {
        InvoiceDraft {
            customer_id: String::new(),
            product: None,
            quantity: DEFAULT_QUANTITY,
            titles: TitleLedger::with_quantity(DEFAULT_QUANTITY),
            created_at: Utc::now(),
        }
    }

    /// Sets the quantity and resizes the ledger in the same step.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.titles.resize(quantity);
    }

    /// Base total before discounts: unit price × quantity.
    /// Zero while no product is selected.
    pub fn base_total(&self) -> Money {
        self.product
            .as_ref()
            .map(|p| p.base_total(self.quantity))
            .unwrap_or_else(Money::zero)
    }

    /// True once a customer has been picked.
    pub fn has_customer(&self) -> bool {
        !self.customer_id.trim().is_empty()
    }

    /// Resets every field to the fresh-draft defaults so the next invoice
    /// starts clean. Used after a successful submission.
    pub fn clear(&mut self) {
        *self = InvoiceDraft::new();
    }
}

impl Default for InvoiceDraft {
    fn default() -> Self {
        InvoiceDraft::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
