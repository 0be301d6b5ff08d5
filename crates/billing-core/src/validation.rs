//! # Validation Module
//!
//! Input validation for the invoice draft.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend shell                                                │
//! │  ├── Basic format checks (empty fields, number inputs)                  │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (the review guard)                                │
//! │  ├── Every title filled in                                              │
//! │  ├── Customer and product selected, price id present                    │
//! │  └── Quantity in range                                                  │
//! │                                                                         │
//! │  A draft that fails here never reaches the submission gateway.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::ledger::TitleLedger;
use crate::types::Product;
use crate::MAX_QUANTITY;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (>= 1)
/// - Must not exceed MAX_QUANTITY (999)
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Draft Validators
// =============================================================================

/// Validates that every ledger entry is filled in.
///
/// Whitespace-only titles count as blank. Reports the first offender with
/// its 1-based position, matching how the form numbers the fields.
pub fn validate_titles(ledger: &TitleLedger) -> ValidationResult<()> {
    for (index, title) in ledger.titles().iter().enumerate() {
        if title.trim().is_empty() {
            return Err(ValidationError::BlankTitle {
                position: index + 1,
            });
        }
    }

    Ok(())
}

/// Validates that a customer has been selected.
pub fn validate_customer_selected(customer_id: &str) -> ValidationResult<()> {
    if customer_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer".to_string(),
        });
    }

    Ok(())
}

/// Validates the product selection.
///
/// The product must be chosen and must carry a price id; submission is
/// keyed on the price, so a product without one cannot be invoiced.
pub fn validate_product_selected(product: Option<&Product>) -> ValidationResult<()> {
    let product = product.ok_or_else(|| ValidationError::Required {
        field: "product".to_string(),
    })?;

    if product.price_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
