//! HTTP Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shop_catalog::{CatalogError, FallbackPolicy, PageOrigin, ProductRecord};
use shop_payments::{CheckoutRequest as PaymentCheckoutRequest, PaymentError};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub catalog: String,
    pub cached_pages: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageResponse {
    pub product: ProductRecord,
    /// Seconds before the page is recomputed
    pub revalidate: u64,
    pub generated_at: DateTime<Utc>,
    pub origin: PageOrigin,
    pub stale: bool,
}

#[derive(Debug, Serialize)]
pub struct PathParams {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct PathsResponse {
    pub paths: Vec<PathParams>,
    pub fallback: FallbackPolicy,
    pub revalidate: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub price_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub checkout_url: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        catalog: state.pages.catalog_name().to_string(),
        cached_pages: state.pages.len().await,
    })
}

/// Pre-render declaration: eager product ids and the fallback policy
pub async fn list_paths(State(state): State<AppState>) -> Json<PathsResponse> {
    let plan = state.pages.plan();

    Json(PathsResponse {
        paths: plan
            .eager
            .iter()
            .map(|id| PathParams { id: id.clone() })
            .collect(),
        fallback: plan.fallback,
        revalidate: plan.revalidate.as_secs(),
    })
}

/// Product page data
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let page = state
        .pages
        .get(&id)
        .await
        .map_err(|e| catalog_failure(&id, &e))?;

    let revalidate = state.pages.plan().revalidate.as_secs();
    let cache_control = format!("s-maxage={revalidate}, stale-while-revalidate");

    let body = ProductPageResponse {
        product: page.record.as_ref().clone(),
        revalidate,
        generated_at: page.generated_at,
        origin: page.origin,
        stale: page.stale,
    };

    Ok(([(header::CACHE_CONTROL, cache_control)], Json(body)).into_response())
}

fn catalog_failure(id: &str, err: &CatalogError) -> ApiError {
    match err {
        CatalogError::NotFound(_) => {
            tracing::debug!(product_id = %id, "Product not found");
            api_error(StatusCode::NOT_FOUND, "PRODUCT_NOT_FOUND", err.user_message())
        }
        _ if err.is_retryable() => {
            tracing::error!(product_id = %id, error = %err, "Catalog unavailable");
            api_error(StatusCode::BAD_GATEWAY, "CATALOG_UNAVAILABLE", err.user_message())
        }
        _ => {
            tracing::error!(product_id = %id, error = %err, "Failed to load product page");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "CATALOG_ERROR", err.user_message())
        }
    }
}

/// Create Stripe checkout session for one price
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>), ApiError> {
    let price_id = payload
        .price_id
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "PRICE_NOT_FOUND", "Price not found."))?;

    let request = PaymentCheckoutRequest::for_price(price_id, &state.config.public_url);

    let session = state
        .checkout
        .create_checkout_session(&request)
        .await
        .map_err(|e| {
            tracing::error!("Checkout error: {}", e);
            match e {
                PaymentError::InvalidRequest(_) => {
                    api_error(StatusCode::BAD_REQUEST, "PRICE_NOT_FOUND", e.user_message())
                }
                _ => api_error(StatusCode::BAD_GATEWAY, "CHECKOUT_ERROR", e.user_message()),
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            checkout_url: session.checkout_url,
        }),
    ))
}
