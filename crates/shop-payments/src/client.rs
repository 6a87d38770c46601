//! Stripe Client
//!
//! One authenticated client shared by the catalog and checkout integrations.
//! The API version is the one pinned by the `async-stripe` release in
//! `Cargo.toml`.

use stripe::Client;

use crate::error::{PaymentError, Result};

/// Name the storefront reports to Stripe as app info
pub const APP_NAME: &str = "Ignite Shop";

/// Stripe client wrapper
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
}

impl StripeClient {
    /// Create a new Stripe client. A blank secret key is rejected here
    /// instead of on the first API call.
    pub fn new(secret_key: &str) -> Result<Self> {
        if secret_key.trim().is_empty() {
            return Err(PaymentError::Config("STRIPE_SECRET_KEY is empty".into()));
        }

        let client = Client::new(secret_key).with_app_info(
            APP_NAME.to_string(),
            Some(env!("CARGO_PKG_VERSION").to_string()),
            None,
        );

        Ok(Self { client })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| PaymentError::Config("STRIPE_SECRET_KEY not set".into()))?;

        Self::new(&secret_key)
    }

    /// Get the underlying Stripe client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}
