//! # shop-payments
//!
//! Stripe integration for the storefront.
//!
//! ## Checkout flow (Stripe Checkout, hosted)
//!
//! ```text
//! ┌──────────────┐  priceId   ┌───────────────┐  session  ┌─────────────────┐
//! │ Product page │──────────▶│ /api/checkout │─────────▶│  Stripe Hosted  │
//! │  (browser)   │◀──────────│   (server)    │          │  Checkout Page  │
//! └──────────────┘ checkoutUrl└───────────────┘          └─────────────────┘
//! ```
//!
//! The browser performs a full navigation to `checkoutUrl`; Stripe sends the
//! buyer back to `/success?session_id=…` or to the storefront root.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shop_payments::{CheckoutGateway, CheckoutRequest, StripeCatalog, StripeClient};
//!
//! let stripe = Arc::new(StripeClient::from_env()?);
//! let catalog = StripeCatalog::new(Arc::clone(&stripe));
//!
//! let session = stripe
//!     .create_checkout_session(&CheckoutRequest::for_price("price_xxx", "https://shop.example"))
//!     .await?;
//! // Redirect user to: session.checkout_url
//! ```

mod catalog;
mod checkout;
mod client;
mod error;

pub use catalog::StripeCatalog;
pub use checkout::{CheckoutGateway, CheckoutRequest, CheckoutSession};
pub use client::{APP_NAME, StripeClient};
pub use error::{PaymentError, Result};
