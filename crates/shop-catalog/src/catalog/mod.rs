//! Catalog Integration
//!
//! Abstraction over the payment provider's product catalog.

mod mock;

pub use mock::MockCatalog;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Product as the catalog returns it, with the default price expanded
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub default_price: Option<CatalogPrice>,
}

/// Expanded default price of a product
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPrice {
    pub id: String,

    /// Amount in minor units (centavos for BRL)
    #[serde(default)]
    pub unit_amount: Option<i64>,

    /// Lowercase ISO currency code as the provider reports it
    #[serde(default)]
    pub currency: Option<String>,
}

impl CatalogProduct {
    /// Convenience constructor for a product with a single image and price
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        image: impl Into<String>,
        price_id: impl Into<String>,
        unit_amount: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            images: vec![image.into()],
            default_price: Some(CatalogPrice {
                id: price_id.into(),
                unit_amount: Some(unit_amount),
                currency: Some("brl".into()),
            }),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Catalog client trait (Strategy pattern)
///
/// Implemented by the Stripe-backed catalog in `shop-payments` and by
/// [`MockCatalog`] for tests.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Retrieve a product by identifier with its default price expanded.
    ///
    /// Unknown identifiers must yield [`CatalogError::NotFound`], rejected
    /// credentials [`CatalogError::Auth`].
    ///
    /// [`CatalogError::NotFound`]: crate::CatalogError::NotFound
    /// [`CatalogError::Auth`]: crate::CatalogError::Auth
    async fn fetch_product(&self, id: &str) -> Result<CatalogProduct>;

    /// Backend name
    fn name(&self) -> &str;
}
