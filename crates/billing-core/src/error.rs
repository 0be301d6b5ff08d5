//! # Error Types
//!
//! Domain-specific error types for billing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  billing-core errors (this file)                                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  billing-engine errors (separate crate)                                 │
//! │  ├── EngineError       - Workflow transition failures                   │
//! │  └── SubmissionFailure - Gateway outcomes                               │
//! │                                                                         │
//! │  Flow: ValidationError → EngineError → shell → operator                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, index, bounds)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

/// Input validation errors.
///
/// These occur when the draft does not meet the review guard's
/// requirements. They are recoverable locally: the workflow stays in
/// Compose and surfaces the message, and no backend call is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required selection is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A title entry is empty or whitespace-only.
    #[error("title {position} must be filled in")]
    BlankTitle { position: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
