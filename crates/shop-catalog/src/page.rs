//! Product Page Data
//!
//! Turns a catalog product into the flat record the product page renders,
//! and declares which pages are built ahead of traffic.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogProduct, ProductCatalog};
use crate::error::{CatalogError, Result};
use crate::money::{self, format_brl};

/// Maximum staleness of a page before the next request recomputes it
pub const REVALIDATE_AFTER: Duration = Duration::from_secs(60 * 60 * 2);

/// Products built eagerly before the server accepts traffic
pub const PRERENDERED_PRODUCTS: &[&str] = &["prod_MxvdhAPFivvmUd"];

/// What happens to identifiers outside the eager set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Computed on first request while the client shows a placeholder
    Placeholder,
    /// Treated as not found without asking the catalog
    Reject,
}

/// Pre-render declaration for the product page
#[derive(Clone, Debug)]
pub struct PagePlan {
    pub eager: Vec<String>,
    pub fallback: FallbackPolicy,
    pub revalidate: Duration,
}

impl Default for PagePlan {
    fn default() -> Self {
        Self {
            eager: PRERENDERED_PRODUCTS.iter().map(|id| (*id).to_string()).collect(),
            fallback: FallbackPolicy::Placeholder,
            revalidate: REVALIDATE_AFTER,
        }
    }
}

impl PagePlan {
    pub fn is_eager(&self, id: &str) -> bool {
        self.eager.iter().any(|eager| eager == id)
    }

    /// Whether `id` may be served at all under this plan
    pub fn admits(&self, id: &str) -> bool {
        self.fallback == FallbackPolicy::Placeholder || self.is_eager(id)
    }
}

/// Flat data record rendered by the product page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub default_price_id: String,
    /// Formatted in pt-BR / BRL
    pub price: String,
}

impl ProductRecord {
    /// Build the record from a catalog product with its default price expanded
    pub fn from_catalog(product: CatalogProduct) -> Result<Self> {
        let price = product
            .default_price
            .ok_or_else(|| CatalogError::MissingPrice(product.id.clone()))?;
        let amount = price
            .unit_amount
            .ok_or_else(|| CatalogError::MissingPrice(product.id.clone()))?;

        if let Some(currency) = price.currency.as_deref() {
            if !currency.eq_ignore_ascii_case(money::CURRENCY) {
                tracing::warn!(
                    product_id = %product.id,
                    currency = %currency,
                    "Default price is not in BRL, formatting as BRL anyway"
                );
            }
        }

        Ok(Self {
            image_url: product.images.into_iter().next().unwrap_or_default(),
            description: product.description.unwrap_or_default(),
            default_price_id: price.id,
            price: format_brl(amount),
            name: product.name,
            id: product.id,
        })
    }
}

/// Load the page data for one product
///
/// Catalog errors are not recovered here.
pub async fn load_product(catalog: &dyn ProductCatalog, id: &str) -> Result<ProductRecord> {
    tracing::debug!(product_id = %id, catalog = catalog.name(), "Fetching product");
    let product = catalog.fetch_product(id).await?;
    ProductRecord::from_catalog(product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogPrice, MockCatalog};

    fn tee() -> CatalogProduct {
        CatalogProduct::new(
            "prod_tee",
            "Camiseta Explorer",
            "https://files.stripe.com/explorer.png",
            "price_tee",
            9990,
        )
        .with_description("Explore o universo.")
    }

    #[test]
    fn test_default_plan() {
        let plan = PagePlan::default();
        assert_eq!(plan.eager, vec!["prod_MxvdhAPFivvmUd".to_string()]);
        assert_eq!(plan.fallback, FallbackPolicy::Placeholder);
        assert_eq!(plan.revalidate, Duration::from_secs(7200));
        assert!(plan.admits("prod_anything"));
    }

    #[test]
    fn test_reject_plan_admits_only_eager() {
        let plan = PagePlan {
            fallback: FallbackPolicy::Reject,
            ..PagePlan::default()
        };
        assert!(plan.admits("prod_MxvdhAPFivvmUd"));
        assert!(!plan.admits("prod_other"));
    }

    #[test]
    fn test_record_from_catalog() {
        let record = ProductRecord::from_catalog(tee()).unwrap();

        assert_eq!(record.id, "prod_tee");
        assert_eq!(record.name, "Camiseta Explorer");
        assert_eq!(record.description, "Explore o universo.");
        assert_eq!(record.image_url, "https://files.stripe.com/explorer.png");
        assert_eq!(record.default_price_id, "price_tee");
        assert_eq!(record.price, "R$\u{a0}99,90");
    }

    #[test]
    fn test_missing_optional_fields() {
        let mut product = tee();
        product.description = None;
        product.images.clear();

        let record = ProductRecord::from_catalog(product).unwrap();
        assert_eq!(record.description, "");
        assert_eq!(record.image_url, "");
    }

    #[test]
    fn test_missing_price() {
        let mut product = tee();
        product.default_price = None;
        assert_eq!(
            ProductRecord::from_catalog(product),
            Err(CatalogError::MissingPrice("prod_tee".into()))
        );

        let mut product = tee();
        product.default_price = Some(CatalogPrice {
            id: "price_tiered".into(),
            unit_amount: None,
            currency: Some("brl".into()),
        });
        assert!(matches!(
            ProductRecord::from_catalog(product),
            Err(CatalogError::MissingPrice(_))
        ));
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = ProductRecord::from_catalog(tee()).unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["imageUrl"], "https://files.stripe.com/explorer.png");
        assert_eq!(json["defaultPriceId"], "price_tee");
    }

    #[tokio::test]
    async fn test_load_product() {
        let catalog = MockCatalog::new().with_product(tee());

        let record = load_product(&catalog, "prod_tee").await.unwrap();
        assert_eq!(record.price, "R$\u{a0}99,90");
    }

    #[tokio::test]
    async fn test_load_unknown_product() {
        let catalog = MockCatalog::demo();
        let result = load_product(&catalog, "prod_missing").await;
        assert!(result.unwrap_err().is_not_found());
    }
}
