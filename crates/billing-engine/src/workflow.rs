//! # Invoice Workflow State Machine
//!
//! Orchestrates the multi-step invoice flow and gates every transition.
//!
//! ## States and Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Invoice Workflow                                     │
//! │                                                                         │
//! │              review() ─── validation ok ──►                             │
//! │  ┌──────────┐                              ┌───────────┐                │
//! │  │ Compose  │◄────────── back() ───────────│ Reviewing │                │
//! │  └────┬─────┘                              └─────┬─────┘                │
//! │       │  validation failure: stays in            │ send()              │
//! │       │  Compose, surfaces the error             ▼                     │
//! │       │                                    ┌───────────┐               │
//! │   cancel()                                 │  Sending  │ exclusive:    │
//! │   (exit)                                   └─────┬─────┘ one call,     │
//! │                                                  │       bounded       │
//! │                         ┌────────────────────────┤       timeout       │
//! │                         ▼                        ▼                     │
//! │              ┌──────────────────┐     ┌──────────────────┐             │
//! │              │ Result(success)  │     │ Result(error)    │             │
//! │              │ draft CLEARED    │     │ draft PRESERVED  │             │
//! │              └────────┬─────────┘     └───────┬──────────┘             │
//! │                       │ close() (exit)        │ retry() ──► Reviewing  │
//! │                       ▼                       ▼ close() (exit)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! Single-threaded and event-driven: transitions happen on discrete calls,
//! and `send` holds `&mut self` across its await, so a second submission
//! cannot start while one is in flight. The exclusivity of `Sending` is
//! structural, not a lock.
//!
//! Discount figures are an explicit pure call (`quote`), recomputed on
//! demand from the current draft, never cached in the draft.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use billing_core::{discount, validation, Customer, DiscountResult, ValidationError};

use crate::catalog::CatalogSnapshot;
use crate::draft::InvoiceDraft;
use crate::error::{EngineError, EngineResult};
use crate::gateway::{InvoiceGateway, SubmissionFailure};

/// Bound on the gateway call. A hung provider must not leave the workflow
/// in `Sending` forever.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// States
// =============================================================================

/// Where the workflow currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    /// Draft is being edited.
    Compose,
    /// Draft is frozen for read-only confirmation.
    Reviewing,
    /// The submission gateway call is in flight; all controls are gated.
    Sending,
    /// The submission finished, one way or the other.
    Result(SendOutcome),
}

/// Terminal outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The provider accepted the invoice.
    Success { invoice_id: String },
    /// The provider rejected it, or the bounded timeout elapsed.
    Failure { failure: SubmissionFailure },
}

// =============================================================================
// Quote
// =============================================================================

/// Price figures for the current draft, recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Unit price × quantity, integer cents. Zero without a product.
    pub base_total_cents: i64,

    /// The resolver's output for the current draft.
    pub discount: DiscountResult,

    /// Base minus discount, fractional cents, NOT clamped at zero.
    pub final_total_cents: f64,
}

// =============================================================================
// Workflow
// =============================================================================

/// The invoice workflow instance.
///
/// Owns the draft and the read-only catalog snapshot for its whole
/// lifetime. The shell drives it with one call per user action and renders
/// from `state()`/`draft()`/`quote()`.
pub struct InvoiceWorkflow {
    state: WorkflowState,
    draft: InvoiceDraft,
    snapshot: CatalogSnapshot,
    gateway: Arc<dyn InvoiceGateway>,
    send_timeout: Duration,
}

impl InvoiceWorkflow {
    /// Starts a new workflow in `Compose` with a fresh draft.
    pub fn new(snapshot: CatalogSnapshot, gateway: Arc<dyn InvoiceGateway>) -> Self {
        debug!(
            customers = snapshot.customers.len(),
            products = snapshot.products.len(),
            "starting invoice workflow"
        );
        InvoiceWorkflow {
            state: WorkflowState::Compose,
            draft: InvoiceDraft::new(),
            snapshot,
            gateway,
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    /// Overrides the bounded send timeout.
    pub fn with_send_timeout(mut self, send_timeout: Duration) -> Self {
        self.send_timeout = send_timeout;
        self
    }

    /// Current state.
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// The draft, for read-only rendering.
    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    /// The catalog snapshot the workflow was started with.
    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    /// Adds a customer created after the snapshot was taken, so the picker
    /// shows it without a reload. Catalog bookkeeping, allowed in any state.
    pub fn add_customer(&mut self, customer: Customer) {
        self.snapshot.push_customer(customer);
    }

    // -------------------------------------------------------------------------
    // Compose-only mutators
    // -------------------------------------------------------------------------

    fn ensure_compose(&self, operation: &'static str) -> EngineResult<()> {
        if self.state == WorkflowState::Compose {
            Ok(())
        } else {
            Err(EngineError::invalid_state(operation, &self.state))
        }
    }

    /// Selects the customer the invoice is drafted for.
    pub fn select_customer(&mut self, customer_id: impl Into<String>) -> EngineResult<()> {
        self.ensure_compose("select customer")?;
        let customer_id = customer_id.into();
        debug!(%customer_id, "customer selected");
        self.draft.customer_id = customer_id;
        Ok(())
    }

    /// Selects the product by id, or clears the selection.
    ///
    /// An id the snapshot does not know clears the selection, matching a
    /// picker whose options are exactly the snapshot's products.
    pub fn select_product(&mut self, product_id: Option<&str>) -> EngineResult<()> {
        self.ensure_compose("select product")?;
        self.draft.product = product_id.and_then(|id| self.snapshot.product(id).cloned());
        debug!(product = ?self.draft.product.as_ref().map(|p| &p.id), "product selected");
        Ok(())
    }

    /// Sets the quantity. The ledger resizes in the same step, so a
    /// following `quote()` sees the settled title list.
    pub fn set_quantity(&mut self, quantity: i64) -> EngineResult<()> {
        self.ensure_compose("set quantity")?;
        validation::validate_quantity(quantity)?;
        self.draft.set_quantity(quantity);
        debug!(quantity, titles = self.draft.titles.len(), "quantity updated");
        Ok(())
    }

    /// Edits one line-item title.
    pub fn set_title(&mut self, index: usize, value: impl Into<String>) -> EngineResult<()> {
        self.ensure_compose("edit title")?;
        self.draft.titles.set_title(index, value);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Quote
    // -------------------------------------------------------------------------

    /// Recomputes the price figures for the current draft.
    ///
    /// Pure call performed on demand; nothing is cached. Without a product
    /// there is nothing to price and the discount is empty.
    pub fn quote(&self) -> Quote {
        let base_total = self.draft.base_total();

        let discount = if self.draft.product.is_some() {
            discount::resolve(
                base_total,
                self.draft.quantity,
                self.snapshot.customer(&self.draft.customer_id),
                &self.snapshot.coupons,
            )
        } else {
            DiscountResult::none()
        };

        let final_total_cents = discount.final_total_cents(base_total);

        Quote {
            base_total_cents: base_total.cents(),
            discount,
            final_total_cents,
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Compose → Reviewing, guarded by the review validation.
    ///
    /// On failure the workflow stays in `Compose` and the error carries the
    /// user-visible message; no backend call is made. On success the draft
    /// is frozen: every mutator is rejected until `back()`.
    pub fn review(&mut self) -> EngineResult<()> {
        self.ensure_compose("review")?;

        validation::validate_titles(&self.draft.titles)?;
        validation::validate_customer_selected(&self.draft.customer_id)?;
        validation::validate_product_selected(self.draft.product.as_ref())?;

        info!(
            customer_id = %self.draft.customer_id,
            quantity = self.draft.quantity,
            "draft passed review validation"
        );
        self.state = WorkflowState::Reviewing;
        Ok(())
    }

    /// Reviewing → Compose, unconditional. Re-enables editing of the same
    /// draft with no data loss.
    pub fn back(&mut self) -> EngineResult<()> {
        if self.state != WorkflowState::Reviewing {
            return Err(EngineError::invalid_state("go back", &self.state));
        }
        debug!("returning to compose");
        self.state = WorkflowState::Compose;
        Ok(())
    }

    /// Reviewing → Sending → Result.
    ///
    /// Makes exactly one gateway call, bounded by `send_timeout`, and
    /// produces exactly one outcome:
    /// - success: the draft is cleared so a fresh invoice can start;
    /// - failure: the draft is preserved verbatim for an explicit retry.
    ///
    /// `Err` is returned only for the structural guard (not in
    /// `Reviewing`); submission failures surface as `Result(error)`.
    pub async fn send(&mut self) -> EngineResult<SendOutcome> {
        if self.state != WorkflowState::Reviewing {
            return Err(EngineError::invalid_state("send", &self.state));
        }

        // review() guarantees a product; keep this a typed error anyway
        // rather than unwrapping.
        let product = self
            .draft
            .product
            .clone()
            .ok_or(ValidationError::Required {
                field: "product".to_string(),
            })?;

        let customer_id = self.draft.customer_id.clone();
        let quantity = self.draft.quantity;
        let description = self.draft.titles.description();

        self.state = WorkflowState::Sending;
        debug!(
            %customer_id,
            price_id = %product.price_id,
            quantity,
            "submitting invoice"
        );

        let gateway = Arc::clone(&self.gateway);
        let result = match timeout(
            self.send_timeout,
            gateway.submit_invoice(&customer_id, &product.price_id, quantity, &description),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(SubmissionFailure::TimedOut {
                after_secs: self.send_timeout.as_secs(),
            }),
        };

        let outcome = match result {
            Ok(invoice_id) => {
                info!(%invoice_id, "invoice submitted");
                self.draft.clear();
                SendOutcome::Success { invoice_id }
            }
            Err(failure) => {
                warn!(%failure, "invoice submission failed, draft preserved");
                SendOutcome::Failure { failure }
            }
        };

        self.state = WorkflowState::Result(outcome.clone());
        Ok(outcome)
    }

    /// Result(error) → Reviewing.
    ///
    /// Explicit retry path so a failed submission does not force the
    /// operator to restart the whole workflow. The preserved draft goes
    /// back to the review screen unchanged. Rejected after a success.
    pub fn retry(&mut self) -> EngineResult<()> {
        match &self.state {
            WorkflowState::Result(SendOutcome::Failure { .. }) => {
                info!("retrying failed submission");
                self.state = WorkflowState::Reviewing;
                Ok(())
            }
            other => Err(EngineError::invalid_state("retry", other)),
        }
    }

    // -------------------------------------------------------------------------
    // Exits
    // -------------------------------------------------------------------------

    /// Abandons the workflow from Compose. Consumes the instance, tearing
    /// down the draft; catalog results still in flight are simply ignored
    /// on arrival.
    pub fn cancel(self) {
        info!("invoice workflow cancelled");
    }

    /// Dismisses the workflow from Result. Consumes the instance.
    pub fn close(self) {
        info!("invoice workflow closed");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use billing_core::{coupon_ids, Coupon, Product};

    // -------------------------------------------------------------------------
    // Mock gateway
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone, PartialEq)]
    struct RecordedCall {
        customer_id: String,
        price_id: String,
        quantity: i64,
        description: String,
    }

    /// Gateway double: records every call, replays queued responses, and
    /// can stall to exercise the timeout path.
    struct MockGateway {
        responses: Mutex<VecDeque<Result<String, SubmissionFailure>>>,
        calls: Mutex<Vec<RecordedCall>>,
        stall: Option<Duration>,
    }

    impl MockGateway {
        fn replying(responses: Vec<Result<String, SubmissionFailure>>) -> Arc<Self> {
            Arc::new(MockGateway {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
                stall: None,
            })
        }

        fn stalled(stall: Duration) -> Arc<Self> {
            Arc::new(MockGateway {
                responses: Mutex::new(VecDeque::new()),
                calls: Mutex::new(Vec::new()),
                stall: Some(stall),
            })
        }

        fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InvoiceGateway for MockGateway {
        async fn submit_invoice(
            &self,
            customer_id: &str,
            price_id: &str,
            quantity: i64,
            description: &str,
        ) -> Result<String, SubmissionFailure> {
            self.calls.lock().unwrap().push(RecordedCall {
                customer_id: customer_id.to_string(),
                price_id: price_id.to_string(),
                quantity,
                description: description.to_string(),
            });

            if let Some(stall) = self.stall {
                tokio::time::sleep(stall).await;
            }

            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("in_default".to_string()))
        }
    }

    // -------------------------------------------------------------------------
    // Fixtures
    // -------------------------------------------------------------------------

    fn snapshot() -> CatalogSnapshot {
        let mut coupons = HashMap::new();
        coupons.insert(
            coupon_ids::BULK_TIER_1.to_string(),
            Coupon {
                id: coupon_ids::BULK_TIER_1.to_string(),
                name: "Bulk 5-10".to_string(),
                percent_off: Some(10.0),
                amount_off: None,
                currency: None,
                valid: true,
            },
        );
        coupons.insert(
            coupon_ids::INDEPENDENT_ARTIST.to_string(),
            Coupon {
                id: coupon_ids::INDEPENDENT_ARTIST.to_string(),
                name: "Independent Artist".to_string(),
                percent_off: None,
                amount_off: Some(500),
                currency: Some("usd".to_string()),
                valid: true,
            },
        );

        CatalogSnapshot {
            customers: vec![
                Customer {
                    id: "cus_label".to_string(),
                    name: "Big Label".to_string(),
                    email: "label@example.com".to_string(),
                    independent: false,
                },
                Customer {
                    id: "cus_indie".to_string(),
                    name: "Indie Artist".to_string(),
                    email: "indie@example.com".to_string(),
                    independent: true,
                },
            ],
            products: vec![Product {
                id: "prod_album".to_string(),
                name: "Album Master".to_string(),
                price_id: "price_album".to_string(),
                unit_price_cents: 2000,
            }],
            coupons,
            load_errors: Vec::new(),
        }
    }

    fn workflow(gateway: Arc<MockGateway>) -> InvoiceWorkflow {
        InvoiceWorkflow::new(snapshot(), gateway)
    }

    /// Fills a valid two-unit draft ready for review.
    fn compose_valid(wf: &mut InvoiceWorkflow) {
        wf.select_customer("cus_label").unwrap();
        wf.select_product(Some("prod_album")).unwrap();
        wf.set_quantity(2).unwrap();
        wf.set_title(0, "First Pressing").unwrap();
        wf.set_title(1, "Second Pressing").unwrap();
    }

    // -------------------------------------------------------------------------
    // Compose and quote
    // -------------------------------------------------------------------------

    #[test]
    fn test_starts_in_compose_with_fresh_draft() {
        let wf = workflow(MockGateway::replying(vec![]));
        assert_eq!(*wf.state(), WorkflowState::Compose);
        assert_eq!(wf.draft().quantity, 1);
        assert_eq!(wf.draft().titles.len(), 1);
    }

    #[test]
    fn test_quantity_change_resizes_ledger_before_quote() {
        let mut wf = workflow(MockGateway::replying(vec![]));
        wf.select_product(Some("prod_album")).unwrap();
        wf.set_title(0, "keep").unwrap();

        wf.set_quantity(5).unwrap();

        assert_eq!(wf.draft().titles.len(), 5);
        assert_eq!(wf.draft().titles.title(0), Some("keep"));

        // 5 units × $20.00 at 10% bulk discount.
        let quote = wf.quote();
        assert_eq!(quote.base_total_cents, 10000);
        assert_eq!(quote.discount.total_discount_cents, 1000.0);
        assert_eq!(quote.final_total_cents, 9000.0);
    }

    #[test]
    fn test_quote_without_product_is_empty() {
        let mut wf = workflow(MockGateway::replying(vec![]));
        wf.set_quantity(7).unwrap();

        let quote = wf.quote();
        assert_eq!(quote.base_total_cents, 0);
        assert!(quote.discount.is_empty());
    }

    #[test]
    fn test_quote_stacks_independent_discount() {
        let mut wf = workflow(MockGateway::replying(vec![]));
        wf.select_customer("cus_indie").unwrap();
        wf.select_product(Some("prod_album")).unwrap();
        wf.set_quantity(5).unwrap();

        // 10000 * 0.9 = 9000, minus 500 fixed = 8500.
        let quote = wf.quote();
        assert_eq!(quote.discount.total_discount_cents, 1500.0);
        assert_eq!(
            quote.discount.applied_coupon_names,
            vec!["Bulk 5-10".to_string(), "Independent Artist".to_string()]
        );
    }

    #[test]
    fn test_unknown_product_id_clears_selection() {
        let mut wf = workflow(MockGateway::replying(vec![]));
        wf.select_product(Some("prod_album")).unwrap();
        assert!(wf.draft().product.is_some());

        wf.select_product(Some("prod_missing")).unwrap();
        assert!(wf.draft().product.is_none());
    }

    #[test]
    fn test_rejects_invalid_quantity() {
        let mut wf = workflow(MockGateway::replying(vec![]));
        assert!(wf.set_quantity(0).is_err());
        assert!(wf.set_quantity(-3).is_err());
        assert!(wf.set_quantity(1000).is_err());
        assert_eq!(wf.draft().quantity, 1);
    }

    // -------------------------------------------------------------------------
    // Review
    // -------------------------------------------------------------------------

    #[test]
    fn test_review_rejects_blank_titles() {
        let mut wf = workflow(MockGateway::replying(vec![]));
        compose_valid(&mut wf);

        for blank in ["", "   "] {
            wf.set_title(1, blank).unwrap();
            let err = wf.review().unwrap_err();
            assert!(matches!(err, EngineError::Validation(_)));
            assert_eq!(*wf.state(), WorkflowState::Compose);
        }
    }

    #[test]
    fn test_review_requires_customer_and_product() {
        let mut wf = workflow(MockGateway::replying(vec![]));
        wf.set_title(0, "Only Title").unwrap();

        // No customer selected.
        assert!(wf.review().is_err());
        assert_eq!(*wf.state(), WorkflowState::Compose);

        // Customer but no product.
        wf.select_customer("cus_label").unwrap();
        assert!(wf.review().is_err());
        assert_eq!(*wf.state(), WorkflowState::Compose);

        wf.select_product(Some("prod_album")).unwrap();
        assert!(wf.review().is_ok());
        assert_eq!(*wf.state(), WorkflowState::Reviewing);
    }

    #[test]
    fn test_review_freezes_draft() {
        let mut wf = workflow(MockGateway::replying(vec![]));
        compose_valid(&mut wf);
        wf.review().unwrap();

        assert!(matches!(
            wf.set_quantity(3),
            Err(EngineError::InvalidState { .. })
        ));
        assert!(wf.set_title(0, "changed").is_err());
        assert!(wf.select_customer("cus_indie").is_err());
        assert!(wf.select_product(None).is_err());
        assert_eq!(wf.draft().quantity, 2);
    }

    #[test]
    fn test_back_reenables_editing_without_data_loss() {
        let mut wf = workflow(MockGateway::replying(vec![]));
        compose_valid(&mut wf);
        wf.review().unwrap();

        wf.back().unwrap();
        assert_eq!(*wf.state(), WorkflowState::Compose);
        assert_eq!(wf.draft().titles.title(0), Some("First Pressing"));
        wf.set_title(0, "Revised Pressing").unwrap();
    }

    // -------------------------------------------------------------------------
    // Send
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_send_success_clears_draft() {
        let gateway = MockGateway::replying(vec![Ok("in_123".to_string())]);
        let mut wf = workflow(Arc::clone(&gateway));
        compose_valid(&mut wf);
        wf.review().unwrap();

        let outcome = wf.send().await.unwrap();
        assert_eq!(
            outcome,
            SendOutcome::Success {
                invoice_id: "in_123".to_string()
            }
        );
        assert_eq!(*wf.state(), WorkflowState::Result(outcome));

        // Fresh defaults: customer unset, no product, quantity 1,
        // a one-entry empty ledger.
        assert_eq!(wf.draft().customer_id, "");
        assert!(wf.draft().product.is_none());
        assert_eq!(wf.draft().quantity, 1);
        assert_eq!(wf.draft().titles.len(), 1);
        assert_eq!(wf.draft().titles.title(0), Some(""));
    }

    #[tokio::test]
    async fn test_send_passes_ledger_description() {
        let gateway = MockGateway::replying(vec![Ok("in_123".to_string())]);
        let mut wf = workflow(Arc::clone(&gateway));
        compose_valid(&mut wf);
        wf.review().unwrap();
        wf.send().await.unwrap();

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].customer_id, "cus_label");
        assert_eq!(calls[0].price_id, "price_album");
        assert_eq!(calls[0].quantity, 2);
        assert_eq!(calls[0].description, "1. First Pressing\n2. Second Pressing");
    }

    #[tokio::test]
    async fn test_send_failure_preserves_draft() {
        let gateway =
            MockGateway::replying(vec![Err(SubmissionFailure::Rejected("declined".to_string()))]);
        let mut wf = workflow(Arc::clone(&gateway));
        compose_valid(&mut wf);
        wf.review().unwrap();

        let outcome = wf.send().await.unwrap();
        assert!(matches!(outcome, SendOutcome::Failure { .. }));
        assert_eq!(*wf.state(), WorkflowState::Result(outcome));

        // Pre-send values intact for a retry.
        assert_eq!(wf.draft().customer_id, "cus_label");
        assert!(wf.draft().product.is_some());
        assert_eq!(wf.draft().quantity, 2);
        assert_eq!(wf.draft().titles.title(0), Some("First Pressing"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_times_out() {
        let gateway = MockGateway::stalled(Duration::from_secs(300));
        let mut wf =
            workflow(Arc::clone(&gateway)).with_send_timeout(Duration::from_secs(5));
        compose_valid(&mut wf);
        wf.review().unwrap();

        let outcome = wf.send().await.unwrap();
        assert_eq!(
            outcome,
            SendOutcome::Failure {
                failure: SubmissionFailure::TimedOut { after_secs: 5 }
            }
        );
        // Draft preserved, same as any other failure.
        assert_eq!(wf.draft().customer_id, "cus_label");
    }

    #[tokio::test]
    async fn test_send_requires_reviewing() {
        let mut wf = workflow(MockGateway::replying(vec![]));
        compose_valid(&mut wf);

        let err = wf.send().await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidState { .. }));
        assert_eq!(*wf.state(), WorkflowState::Compose);
    }

    #[tokio::test]
    async fn test_one_gateway_call_per_send() {
        let gateway = MockGateway::replying(vec![
            Err(SubmissionFailure::Rejected("declined".to_string())),
            Ok("in_456".to_string()),
        ]);
        let mut wf = workflow(Arc::clone(&gateway));
        compose_valid(&mut wf);
        wf.review().unwrap();

        wf.send().await.unwrap();
        assert_eq!(gateway.calls().len(), 1);

        wf.retry().unwrap();
        wf.send().await.unwrap();
        assert_eq!(gateway.calls().len(), 2);
    }

    // -------------------------------------------------------------------------
    // Retry and exits
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_retry_after_failure_reenters_reviewing() {
        let gateway = MockGateway::replying(vec![
            Err(SubmissionFailure::Rejected("declined".to_string())),
            Ok("in_789".to_string()),
        ]);
        let mut wf = workflow(Arc::clone(&gateway));
        compose_valid(&mut wf);
        wf.review().unwrap();
        wf.send().await.unwrap();

        wf.retry().unwrap();
        assert_eq!(*wf.state(), WorkflowState::Reviewing);

        let outcome = wf.send().await.unwrap();
        assert!(matches!(outcome, SendOutcome::Success { .. }));
    }

    #[tokio::test]
    async fn test_retry_after_success_is_rejected() {
        let gateway = MockGateway::replying(vec![Ok("in_123".to_string())]);
        let mut wf = workflow(Arc::clone(&gateway));
        compose_valid(&mut wf);
        wf.review().unwrap();
        wf.send().await.unwrap();

        assert!(matches!(
            wf.retry(),
            Err(EngineError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_retry_from_compose_is_rejected() {
        let mut wf = workflow(MockGateway::replying(vec![]));
        assert!(wf.retry().is_err());
    }

    #[test]
    fn test_created_customer_joins_picker() {
        let mut wf = workflow(MockGateway::replying(vec![]));
        wf.add_customer(Customer {
            id: "cus_new".to_string(),
            name: "New Artist".to_string(),
            email: "new@example.com".to_string(),
            independent: true,
        });
        assert!(wf.snapshot().customer("cus_new").is_some());
    }
}
