//! Ignite Shop HTTP Server
//!
//! Axum-based server for the product page: page data with incremental
//! static regeneration, the checkout API, and the WASM frontend.

mod app;
mod config;
mod handlers;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shop_catalog::{PagePlan, PageStore};
use shop_payments::{StripeCatalog, StripeClient};

use crate::config::ShopConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ShopConfig::from_env()?;

    // Stripe is mandatory: without it there is no catalog to render
    let stripe = Arc::new(StripeClient::new(&config.stripe_secret_key)?);
    tracing::info!("✓ Stripe configured");

    // Build the eager pages before accepting traffic
    let pages = PageStore::new(
        Arc::new(StripeCatalog::new(Arc::clone(&stripe))),
        PagePlan::default(),
    );
    let built = pages.prerender().await?;
    tracing::info!(
        "✓ Pre-rendered {} product page(s), revalidating every {}s",
        built,
        pages.plan().revalidate.as_secs()
    );

    let addr = config.bind_addr.clone();
    let state = AppState {
        pages: Arc::new(pages),
        checkout: stripe,
        config: Arc::new(config),
    };

    let app = app::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 ignite-shop server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health             - Health check");
    tracing::info!("  GET  /api/paths          - Pre-rendered product ids");
    tracing::info!("  GET  /api/products/{{id}} - Product page data");
    tracing::info!("  POST /api/checkout       - Create Stripe checkout");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
