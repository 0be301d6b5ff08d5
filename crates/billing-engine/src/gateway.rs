//! # Invoice Submission Gateway
//!
//! Trait seam for the billing provider adapter. The engine never talks to
//! the network itself: the shell injects an implementation of
//! [`InvoiceGateway`] and the workflow awaits exactly one call per Send.
//!
//! ## Submission Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit_invoice(customer_id, price_id, quantity, description)           │
//! │       │                                                                 │
//! │       ├── Ok(invoice_id)          - opaque id minted by the provider    │
//! │       │                                                                 │
//! │       └── Err(SubmissionFailure)  - generic provider rejection, or a    │
//! │                                     timeout added by the engine         │
//! │                                                                         │
//! │  The provider offers no idempotency contract, so the engine assumes    │
//! │  neither at-most-once nor at-least-once beyond "one call per Send".    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use thiserror::Error;

/// How a submission attempt failed.
///
/// Stored in the `Result(error)` state so the operator can decide to retry
/// or abandon; the draft is preserved either way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionFailure {
    /// The provider rejected or could not complete the submission.
    #[error("invoice submission failed: {0}")]
    Rejected(String),

    /// No response within the engine's bounded send timeout.
    ///
    /// The gateway call itself has no timeout; without this bound a hung
    /// provider would leave the workflow in Sending forever.
    #[error("invoice submission timed out after {after_secs}s")]
    TimedOut { after_secs: u64 },
}

/// The billing provider adapter the shell injects.
///
/// Implementations perform the actual network call (create the invoice,
/// attach the line item, send it) and return the provider's invoice id.
#[async_trait]
pub trait InvoiceGateway: Send + Sync {
    /// Submits one invoice. Called at most once per Send click.
    async fn submit_invoice(
        &self,
        customer_id: &str,
        price_id: &str,
        quantity: i64,
        description: &str,
    ) -> Result<String, SubmissionFailure>;
}
