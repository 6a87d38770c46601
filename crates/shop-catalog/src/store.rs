//! Page Store
//!
//! Incremental static regeneration for product pages: eager pages are built
//! before traffic, other pages on first request, and any page older than the
//! plan's staleness window is recomputed on the next request.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::catalog::ProductCatalog;
use crate::error::{CatalogError, Result};
use crate::page::{PagePlan, ProductRecord, load_product};

/// How the served record came to be
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PageOrigin {
    Prerendered,
    OnDemand,
    Revalidated,
}

/// A served product page
#[derive(Clone, Debug)]
pub struct Page {
    pub record: Arc<ProductRecord>,
    pub origin: PageOrigin,
    pub generated_at: DateTime<Utc>,
    /// Older than the staleness window; recomputing it failed
    pub stale: bool,
}

#[derive(Clone)]
struct Entry {
    record: Arc<ProductRecord>,
    origin: PageOrigin,
    generated_at: DateTime<Utc>,
    built_at: Instant,
    /// Distinct per build; a refresh only replaces the build it read
    generation: u64,
}

impl Entry {

    fn page(&self, stale: bool) -> Page {
        Page {
            record: Arc::clone(&self.record),
            origin: self.origin,
            generated_at: self.generated_at,
            stale,
        }
    }
}

/// Cache of product pages backed by a catalog
pub struct PageStore {
    catalog: Arc<dyn ProductCatalog>,
    plan: PagePlan,
    pages: RwLock<HashMap<String, Entry>>,
    generations: AtomicU64,
}

impl PageStore {
    pub fn new(catalog: Arc<dyn ProductCatalog>, plan: PagePlan) -> Self {
        Self {
            catalog,
            plan,
            pages: RwLock::new(HashMap::new()),
            generations: AtomicU64::new(0),
        }
    }

    pub fn plan(&self) -> &PagePlan {
        &self.plan
    }

    pub fn catalog_name(&self) -> &str {
        self.catalog.name()
    }

    /// Build every eager page. The first failure aborts.
    pub async fn prerender(&self) -> Result<usize> {
        for id in &self.plan.eager {
            let record = load_product(self.catalog.as_ref(), id).await?;
            self.pages
                .write()
                .await
                .insert(id.clone(), self.entry(record, PageOrigin::Prerendered));
            tracing::info!(product_id = %id, "Pre-rendered product page");
        }
        Ok(self.plan.eager.len())
    }

    /// Serve the page for `id`, computing or recomputing it when needed
    pub async fn get(&self, id: &str) -> Result<Page> {
        let cached = self.pages.read().await.get(id).cloned();

        let Some(entry) = cached else {
            return self.build_on_demand(id).await;
        };

        if entry.built_at.elapsed() < self.plan.revalidate {
            return Ok(entry.page(false));
        }

        self.revalidate(id, entry).await
    }

    /// Number of pages currently held
    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pages.read().await.is_empty()
    }

    async fn build_on_demand(&self, id: &str) -> Result<Page> {
        if !self.plan.admits(id) {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        let record = load_product(self.catalog.as_ref(), id).await?;
        let entry = self.entry(record, PageOrigin::OnDemand);
        let page = entry.page(false);
        self.pages.write().await.insert(id.to_string(), entry);

        tracing::debug!(product_id = %id, "Built product page on demand");
        Ok(page)
    }

    fn entry(&self, record: ProductRecord, origin: PageOrigin) -> Entry {
        Entry {
            record: Arc::new(record),
            origin,
            generated_at: Utc::now(),
            built_at: Instant::now(),
            generation: self.generations.fetch_add(1, Ordering::Relaxed),
        }
    }

    async fn revalidate(&self, id: &str, stale: Entry) -> Result<Page> {
        match load_product(self.catalog.as_ref(), id).await {
            Ok(record) => {
                let entry = self.entry(record, PageOrigin::Revalidated);
                let mut pages = self.pages.write().await;

                if let Some(current) = pages.get(id).filter(|c| c.generation != stale.generation) {
                    tracing::debug!(product_id = %id, "Page rebuilt concurrently, keeping newer build");
                    return Ok(current.page(false));
                }

                let page = entry.page(false);
                pages.insert(id.to_string(), entry);

                tracing::debug!(product_id = %id, "Revalidated product page");
                Ok(page)
            }
            Err(e) if e.is_not_found() => {
                let mut pages = self.pages.write().await;
                if pages.get(id).is_some_and(|c| c.generation == stale.generation) {
                    pages.remove(id);
                    tracing::info!(product_id = %id, "Product vanished from catalog, page evicted");
                }
                Err(e)
            }
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "Revalidation failed, serving stale page");
                Ok(stale.page(true))
            }
        }
    }
}
