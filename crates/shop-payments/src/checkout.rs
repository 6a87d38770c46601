//! Stripe Checkout Integration
//!
//! Hosted checkout for a single catalog price: the storefront redirects the
//! buyer to the session URL and Stripe redirects back to `success_url` or
//! `cancel_url`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionMode, CreateCheckoutSession,
    CreateCheckoutSessionLineItems,
};

use crate::client::StripeClient;
use crate::error::{PaymentError, Result};

/// Request to create a checkout session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Stripe Price ID of the item being bought
    pub price_id: String,

    /// URL to redirect after successful payment
    pub success_url: String,

    /// URL to redirect if checkout is cancelled
    pub cancel_url: String,
}

impl CheckoutRequest {
    /// Checkout for `price_id` returning to the storefront at `public_url`
    pub fn for_price(price_id: impl Into<String>, public_url: &str) -> Self {
        let base = public_url.trim_end_matches('/');
        Self {
            price_id: price_id.into(),
            success_url: format!("{base}/success?session_id={{CHECKOUT_SESSION_ID}}"),
            cancel_url: format!("{base}/"),
        }
    }
}

/// Result of creating a checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Stripe session ID
    pub id: String,

    /// URL to redirect user to
    pub checkout_url: String,
}

/// Creates hosted checkout sessions
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn create_checkout_session(&self, request: &CheckoutRequest) -> Result<CheckoutSession>;
}

#[async_trait]
impl CheckoutGateway for StripeClient {
    async fn create_checkout_session(&self, request: &CheckoutRequest) -> Result<CheckoutSession> {
        if request.price_id.trim().is_empty() {
            return Err(PaymentError::InvalidRequest("price_id is empty".into()));
        }

        let mut params = CreateCheckoutSession::new();
        params.success_url = Some(&request.success_url);
        params.cancel_url = Some(&request.cancel_url);
        params.mode = Some(CheckoutSessionMode::Payment);
        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            price: Some(request.price_id.clone()),
            quantity: Some(1),
            ..Default::default()
        }]);

        let session = StripeCheckoutSession::create(self.inner(), params)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        let checkout_url = session
            .url
            .ok_or_else(|| PaymentError::Stripe("No checkout URL returned".into()))?;

        tracing::info!(session_id = %session.id, price_id = %request.price_id, "Created checkout session");

        Ok(CheckoutSession {
            id: session.id.to_string(),
            checkout_url,
        })
    }
}
