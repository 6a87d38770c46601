//! In-memory Catalog
//!
//! For tests and local runs. Serves a fixed set of products and counts
//! how often it was asked.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{CatalogProduct, ProductCatalog};
use crate::error::{CatalogError, Result};

/// In-memory catalog with an optional injected failure
#[derive(Default)]
pub struct MockCatalog {
    products: RwLock<HashMap<String, CatalogProduct>>,
    failure: RwLock<Option<CatalogError>>,
    calls: AtomicUsize,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the storefront's pre-rendered product
    pub fn demo() -> Self {
        Self::new().with_product(
            CatalogProduct::new(
                "prod_MxvdhAPFivvmUd",
                "Camiseta Beyond the Limits",
                "https://files.stripe.com/links/beyond-the-limits.png",
                "price_1MDxeNLvBeyondLimits",
                7990,
            )
            .with_description("Camiseta 100% algodão."),
        )
    }

    #[must_use]
    pub fn with_product(self, product: CatalogProduct) -> Self {
        self.insert(product);
        self
    }

    pub fn insert(&self, product: CatalogProduct) {
        if let Ok(mut products) = self.products.write() {
            products.insert(product.id.clone(), product);
        }
    }

    pub fn remove(&self, id: &str) -> Option<CatalogProduct> {
        self.products.write().ok().and_then(|mut p| p.remove(id))
    }

    /// Make every following fetch fail with `error` (`None` clears it)
    pub fn set_failure(&self, error: Option<CatalogError>) {
        if let Ok(mut failure) = self.failure.write() {
            *failure = error;
        }
    }

    /// Number of fetches served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductCatalog for MockCatalog {
    async fn fetch_product(&self, id: &str) -> Result<CatalogProduct> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.failure.read().ok().and_then(|f| f.clone()) {
            return Err(error);
        }

        self.products
            .read()
            .map_err(|_| CatalogError::Provider("catalog lock poisoned".into()))?
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    fn name(&self) -> &str {
        "MockCatalog"
    }
}
