//! Stripe Product Catalog
//!
//! `ProductCatalog` backed by the Stripe Products API, default price expanded.

use std::sync::Arc;

use async_trait::async_trait;
use stripe::{Expandable, Price, Product, ProductId, StripeError};

use shop_catalog::{CatalogError, CatalogPrice, CatalogProduct, ProductCatalog};

use crate::client::StripeClient;

const EXPAND_DEFAULT_PRICE: &[&str] = &["default_price"];

/// Catalog reading products from Stripe
pub struct StripeCatalog {
    stripe: Arc<StripeClient>,
}

impl StripeCatalog {
    pub fn new(stripe: Arc<StripeClient>) -> Self {
        Self { stripe }
    }
}

#[async_trait]
impl ProductCatalog for StripeCatalog {
    async fn fetch_product(&self, id: &str) -> shop_catalog::Result<CatalogProduct> {
        let product_id: ProductId = id
            .parse()
            .map_err(|_| CatalogError::NotFound(id.to_string()))?;

        let product = Product::retrieve(self.stripe.inner(), &product_id, EXPAND_DEFAULT_PRICE)
            .await
            .map_err(|e| catalog_error(id, e))?;

        Ok(to_catalog_product(product))
    }

    fn name(&self) -> &str {
        "Stripe"
    }
}

fn to_catalog_product(product: Product) -> CatalogProduct {
    let default_price = product
        .default_price
        .as_ref()
        .and_then(Expandable::as_object)
        .map(to_catalog_price);

    CatalogProduct {
        id: product.id.to_string(),
        name: product.name.unwrap_or_default(),
        description: product.description,
        images: product.images.unwrap_or_default(),
        default_price,
    }
}

fn to_catalog_price(price: &Price) -> CatalogPrice {
    CatalogPrice {
        id: price.id.to_string(),
        unit_amount: price.unit_amount,
        currency: price.currency.as_ref().map(ToString::to_string),
    }
}

fn catalog_error(id: &str, err: StripeError) -> CatalogError {
    match err {
        StripeError::Stripe(request) => match request.http_status {
            404 => CatalogError::NotFound(id.to_string()),
            401 | 403 => CatalogError::Auth(request.message.unwrap_or_else(|| "unauthorized".into())),
            status => CatalogError::Provider(format!(
                "HTTP {status}: {}",
                request.message.unwrap_or_default()
            )),
        },
        StripeError::ClientError(msg) => CatalogError::Network(msg),
        StripeError::Timeout => CatalogError::Network("request timed out".into()),
        other => CatalogError::Provider(other.to_string()),
    }
}
