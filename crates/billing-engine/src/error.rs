//! # Engine Error Types
//!
//! Error types for workflow transitions.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Billing Desk                           │
//! │                                                                         │
//! │  ValidationError  - blocks the Review transition; the workflow stays    │
//! │                     in Compose and no backend call is made              │
//! │                                                                         │
//! │  InvalidState     - an operation arrived in the wrong state (e.g. a     │
//! │                     mutator while Reviewing). Structural guard, not     │
//! │                     an operator mistake                                 │
//! │                                                                         │
//! │  SubmissionFailure (gateway.rs) - surfaced as the Result(error) state,  │
//! │                     draft preserved for an explicit retry               │
//! │                                                                         │
//! │  Catalog load failures are NOT errors at this level: the snapshot      │
//! │  degrades to empty collections plus a non-blocking notice.             │
//! │                                                                         │
//! │  No error is fatal to the process; all are scoped to the current       │
//! │  workflow instance and displayed to the operator.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use billing_core::ValidationError;

use crate::gateway::SubmissionFailure;
use crate::workflow::WorkflowState;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by workflow operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The draft failed the review guard. Recoverable locally.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The operation is not legal in the current state.
    #[error("cannot {operation} while in {state:?}")]
    InvalidState {
        operation: &'static str,
        state: WorkflowState,
    },

    /// The submission gateway reported a failure.
    #[error(transparent)]
    Submission(#[from] SubmissionFailure),
}

impl EngineError {
    /// Shorthand for the structural guard error.
    pub(crate) fn invalid_state(operation: &'static str, state: &WorkflowState) -> Self {
        EngineError::InvalidState {
            operation,
            state: state.clone(),
        }
    }
}
