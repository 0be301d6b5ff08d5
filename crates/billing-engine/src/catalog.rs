//! # Catalog Lookup
//!
//! Resolves the read-only customer/product/coupon data the workflow
//! consumes. The actual fetching belongs to a collaborator behind the
//! [`Catalog`] trait; this module owns the concurrent load and the
//! degrade-on-failure merge.
//!
//! ## Load Behavior
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     CatalogSnapshot::load                               │
//! │                                                                         │
//! │   fetch_customers ──┐                                                   │
//! │   fetch_products  ──┤── run concurrently (tokio::join!)                 │
//! │   fetch_coupons   ──┘                                                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   Each failure degrades to the empty collection and appends a           │
//! │   non-blocking notice; the workflow remains usable with whatever        │
//! │   partial data loaded (LoadError semantics).                            │
//! │                                                                         │
//! │   Results are merged once ALL three complete; there is no               │
//! │   partial-result display beyond the shell's loading indicator.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use billing_core::{Coupon, Customer, Product};

// =============================================================================
// Errors
// =============================================================================

/// Failures from the catalog collaborator.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// A list fetch failed. Degraded to an empty collection upstream.
    #[error("catalog fetch failed: {0}")]
    Fetch(String),

    /// Customer creation failed on the provider.
    #[error("creating customer failed: {0}")]
    CreateCustomer(String),
}

// =============================================================================
// Catalog Trait
// =============================================================================

/// The catalog collaborator the shell injects.
///
/// Each fetch may fail independently; the engine treats a failure as
/// "empty set, report load error upstream".
#[async_trait]
pub trait Catalog: Send + Sync {
    /// All customers known to the billing provider.
    async fn fetch_customers(&self) -> Result<Vec<Customer>, CatalogError>;

    /// All active products, each with its active price.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// All coupons, keyed by id.
    async fn fetch_coupons(&self) -> Result<HashMap<String, Coupon>, CatalogError>;

    /// Creates a customer on the provider and returns the full record.
    async fn create_customer(
        &self,
        name: &str,
        email: &str,
        independent: bool,
    ) -> Result<Customer, CatalogError>;
}

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// Read-only catalog data merged from the three fetches.
///
/// Owned by the workflow for its whole lifetime; never mutated by the core
/// logic. `load_errors` carries the non-blocking notices for the shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub coupons: HashMap<String, Coupon>,

    /// Human-readable notices for fetches that failed and were degraded
    /// to empty collections. Empty when everything loaded.
    pub load_errors: Vec<String>,
}

impl CatalogSnapshot {
    /// Loads the three collections concurrently and merges the results.
    ///
    /// Never fails: each failed fetch yields its empty collection plus a
    /// notice in `load_errors`.
    pub async fn load(catalog: &dyn Catalog) -> Self {
        debug!("loading catalog snapshot");

        let (customers, products, coupons) = tokio::join!(
            catalog.fetch_customers(),
            catalog.fetch_products(),
            catalog.fetch_coupons(),
        );

        let mut snapshot = CatalogSnapshot::default();

        match customers {
            Ok(customers) => snapshot.customers = customers,
            Err(err) => {
                warn!(%err, "customer fetch failed, continuing with empty list");
                snapshot
                    .load_errors
                    .push(format!("failed to load customers: {err}"));
            }
        }

        match products {
            Ok(products) => snapshot.products = products,
            Err(err) => {
                warn!(%err, "product fetch failed, continuing with empty list");
                snapshot
                    .load_errors
                    .push(format!("failed to load products: {err}"));
            }
        }

        match coupons {
            Ok(coupons) => snapshot.coupons = coupons,
            Err(err) => {
                warn!(%err, "coupon fetch failed, continuing with empty set");
                snapshot
                    .load_errors
                    .push(format!("failed to load coupons: {err}"));
            }
        }

        debug!(
            customers = snapshot.customers.len(),
            products = snapshot.products.len(),
            coupons = snapshot.coupons.len(),
            notices = snapshot.load_errors.len(),
            "catalog snapshot loaded"
        );

        snapshot
    }

    /// Looks up a customer by id.
    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Looks up a product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Appends a customer created after the snapshot was taken, so the
    /// picker shows it without a full reload.
    pub fn push_customer(&mut self, customer: Customer) {
        self.customers.push(customer);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Catalog stub with per-collection switches.
    struct StubCatalog {
        fail_customers: bool,
        fail_products: bool,
        fail_coupons: bool,
    }

    impl StubCatalog {
        fn healthy() -> Self {
            StubCatalog {
                fail_customers: false,
                fail_products: false,
                fail_coupons: false,
            }
        }
    }

    #[async_trait]
    impl Catalog for StubCatalog {
        async fn fetch_customers(&self) -> Result<Vec<Customer>, CatalogError> {
            if self.fail_customers {
                return Err(CatalogError::Fetch("customers unavailable".to_string()));
            }
            Ok(vec![Customer {
                id: "cus_1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                independent: true,
            }])
        }

        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            if self.fail_products {
                return Err(CatalogError::Fetch("products unavailable".to_string()));
            }
            Ok(vec![Product {
                id: "prod_1".to_string(),
                name: "Album Master".to_string(),
                price_id: "price_1".to_string(),
                unit_price_cents: 2000,
            }])
        }

        async fn fetch_coupons(&self) -> Result<HashMap<String, Coupon>, CatalogError> {
            if self.fail_coupons {
                return Err(CatalogError::Fetch("coupons unavailable".to_string()));
            }
            Ok(HashMap::new())
        }

        async fn create_customer(
            &self,
            name: &str,
            email: &str,
            independent: bool,
        ) -> Result<Customer, CatalogError> {
            Ok(Customer {
                id: "cus_new".to_string(),
                name: name.to_string(),
                email: email.to_string(),
                independent,
            })
        }
    }

    #[tokio::test]
    async fn test_load_merges_all_collections() {
        let snapshot = CatalogSnapshot::load(&StubCatalog::healthy()).await;

        assert_eq!(snapshot.customers.len(), 1);
        assert_eq!(snapshot.products.len(), 1);
        assert!(snapshot.load_errors.is_empty());
        assert!(snapshot.customer("cus_1").is_some());
        assert!(snapshot.product("prod_1").is_some());
        assert!(snapshot.customer("cus_missing").is_none());
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades_to_empty_with_notice() {
        let catalog = StubCatalog {
            fail_products: true,
            ..StubCatalog::healthy()
        };

        let snapshot = CatalogSnapshot::load(&catalog).await;

        // Products degraded, the other collections still merged.
        assert!(snapshot.products.is_empty());
        assert_eq!(snapshot.customers.len(), 1);
        assert_eq!(snapshot.load_errors.len(), 1);
        assert!(snapshot.load_errors[0].contains("products"));
    }

    #[tokio::test]
    async fn test_all_fetches_failing_still_yields_usable_snapshot() {
        let catalog = StubCatalog {
            fail_customers: true,
            fail_products: true,
            fail_coupons: true,
        };

        let snapshot = CatalogSnapshot::load(&catalog).await;

        assert!(snapshot.customers.is_empty());
        assert!(snapshot.products.is_empty());
        assert!(snapshot.coupons.is_empty());
        assert_eq!(snapshot.load_errors.len(), 3);
    }

    #[tokio::test]
    async fn test_created_customer_joins_snapshot() {
        let catalog = StubCatalog::healthy();
        let mut snapshot = CatalogSnapshot::load(&catalog).await;

        let created = catalog
            .create_customer("Grace", "grace@example.com", false)
            .await
            .unwrap();
        snapshot.push_customer(created);

        assert_eq!(snapshot.customers.len(), 2);
        assert!(snapshot.customer("cus_new").is_some());
    }
}
