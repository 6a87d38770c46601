//! Application State

use std::sync::Arc;

use shop_catalog::PageStore;
use shop_payments::CheckoutGateway;

use crate::config::ShopConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Product pages (pre-rendered, on-demand, revalidated)
    pub pages: Arc<PageStore>,

    /// Hosted checkout provider
    pub checkout: Arc<dyn CheckoutGateway>,

    pub config: Arc<ShopConfig>,
}
