//! # Title Ledger
//!
//! Keeps exactly `quantity` line-item title strings in sync as the quantity
//! changes, preserving previously entered values.
//!
//! ## Resize Behavior
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity 3 → 5:   ["a", "b", "c"]  →  ["a", "b", "c", "", ""]          │
//! │  quantity 5 → 2:   ["a", "b", "c", "", ""]  →  ["a", "b"]               │
//! │  quantity 2 → 2:   ["a", "b"]  →  ["a", "b"]   (identity)               │
//! │                                                                         │
//! │  INVARIANT: len(titles) == quantity at every observable point after     │
//! │  a quantity change settles. The workflow calls resize() before any      │
//! │  discount recomputation.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure state transformation; no side effects.

use serde::{Deserialize, Serialize};

/// The ordered list of per-unit title strings. Serializes transparently as
/// the string array itself, which is how the shell renders the fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TitleLedger {
    titles: Vec<String>,
}

impl TitleLedger {
    /// Creates a ledger sized for `quantity`, all titles empty.
    pub fn with_quantity(quantity: i64) -> Self {
        let mut ledger = TitleLedger { titles: Vec::new() };
        ledger.resize(quantity);
        ledger
    }

    /// Grows or shrinks the ledger to `new_quantity` entries.
    ///
    /// - Growing appends empty strings at the end.
    /// - Shrinking truncates, discarding the tail.
    /// - Equal length is the identity.
    ///
    /// Surviving entries are preserved verbatim.
    pub fn resize(&mut self, new_quantity: i64) {
        let target = new_quantity.max(0) as usize;
        if target > self.titles.len() {
            self.titles.resize(target, String::new());
        } else {
            self.titles.truncate(target);
        }
    }

    /// Replaces the title at `index`.
    ///
    /// Out-of-range indices are a no-op. Unreachable while the length
    /// invariant holds, since the UI only renders `len()` fields.
    pub fn set_title(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.titles.get_mut(index) {
            *slot = value.into();
        }
    }

    /// Returns the title at `index`, if in range.
    pub fn title(&self, index: usize) -> Option<&str> {
        self.titles.get(index).map(String::as_str)
    }

    /// Number of entries (== quantity once a resize settles).
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// True when the ledger holds no entries.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// All titles in ledger order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// True if any entry is empty or whitespace-only.
    ///
    /// Review is gated on this: a draft with blank titles never reaches
    /// the submission gateway.
    pub fn has_blank_titles(&self) -> bool {
        self.titles.iter().any(|t| t.trim().is_empty())
    }

    /// Renders the submission description: `"{index+1}. {title}"` lines,
    /// 1-based, newline-separated, in ledger order.
    ///
    /// ## Example
    /// ```rust
    /// use billing_core::ledger::TitleLedger;
    ///
    /// let mut ledger = TitleLedger::with_quantity(2);
    /// ledger.set_title(0, "First Pressing");
    /// ledger.set_title(1, "Second Pressing");
    /// assert_eq!(ledger.description(), "1. First Pressing\n2. Second Pressing");
    /// ```
    pub fn description(&self) -> String {
        self.titles
            .iter()
            .enumerate()
            .map(|(i, title)| format!("{}. {}", i + 1, title))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for TitleLedger {
    /// A fresh ledger matches the default quantity of 1.
    fn default() -> Self {
        TitleLedger::with_quantity(1)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
