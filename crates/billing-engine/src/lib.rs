//! # billing-engine: Invoice Drafting Engine for Billing Desk
//!
//! This crate orchestrates the invoice drafting workflow for Billing Desk,
//! driving a draft from composition through review to submission against a
//! billing provider.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Invoice Workflow Engine                       │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                 InvoiceWorkflow (State Machine)               │  │
//! │  │                                                               │  │
//! │  │   Compose ──review()──▶ Reviewing ──send()──▶ Sending         │  │
//! │  │      ▲                      │  ▲                  │           │  │
//! │  │      └──────back()──────────┘  └────retry()── Result         │  │
//! │  └──────────┬──────────────────────────────┬────────────────────┘  │
//! │             │                              │                        │
//! │             ▼                              ▼                        │
//! │  ┌────────────────────┐        ┌──────────────────────────┐        │
//! │  │  CatalogSnapshot   │        │  InvoiceGateway (trait)  │        │
//! │  │                    │        │                          │        │
//! │  │ Customers/Products │        │ One bounded submit call  │        │
//! │  │ Coupons, degraded  │        │ per send; timeout maps   │        │
//! │  │ loads keep going   │        │ to a TimedOut failure    │        │
//! │  └────────────────────┘        └──────────────────────────┘        │
//! │                                                                     │
//! │  ┌────────────────────┐        ┌──────────────────────────┐        │
//! │  │   InvoiceDraft     │        │     SettingsStore        │        │
//! │  │                    │        │                          │        │
//! │  │ Customer, product, │        │ API key in settings.json │        │
//! │  │ quantity, titles   │        │ under the OS config dir  │        │
//! │  └────────────────────┘        └──────────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`workflow`] - The `InvoiceWorkflow` state machine and quoting
//! - [`draft`] - The mutable invoice draft (customer, product, quantity, titles)
//! - [`catalog`] - Catalog trait and degraded-load snapshot
//! - [`gateway`] - Invoice submission trait and failure taxonomy
//! - [`settings`] - Persisted settings (API key)
//! - [`telemetry`] - Tracing subscriber setup for embedding shells
//! - [`error`] - Engine error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use billing_engine::{CatalogSnapshot, InvoiceWorkflow};
//!
//! let snapshot = CatalogSnapshot::load(catalog.as_ref()).await;
//! let mut workflow = InvoiceWorkflow::new(snapshot, gateway);
//!
//! workflow.select_customer("cus_123")?;
//! workflow.select_product(Some("prod_456"))?;
//! workflow.set_quantity(6)?;
//! workflow.set_title(0, "Midnight Sessions Vol. 1")?;
//!
//! workflow.review()?;
//! let outcome = workflow.send().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod draft;
pub mod error;
pub mod gateway;
pub mod settings;
pub mod telemetry;
pub mod workflow;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use catalog::{Catalog, CatalogError, CatalogSnapshot};
pub use draft::{InvoiceDraft, DEFAULT_QUANTITY};
pub use error::{EngineError, EngineResult};
pub use gateway::{InvoiceGateway, SubmissionFailure};
pub use settings::{Settings, SettingsError, SettingsStore};
pub use workflow::{InvoiceWorkflow, Quote, SendOutcome, WorkflowState, DEFAULT_SEND_TIMEOUT};
