//! API Client

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::checkout::CheckoutApi;

/// Product page data as served by `/api/products/{id}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub default_price_id: String,
    pub price: String,
}

#[derive(Deserialize)]
struct ProductPageResponse {
    product: ProductView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutRequest<'a> {
    price_id: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutResponse {
    checkout_url: String,
}

/// Origin the frontend was served from
fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into())
}

fn endpoint(base: &str, segments: &[&str]) -> Result<Url, String> {
    let mut url = Url::parse(base).map_err(|e| e.to_string())?;
    url.path_segments_mut()
        .map_err(|()| format!("{base} cannot be a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Fetch product page data. `Ok(None)` when the product does not exist.
pub async fn fetch_product(id: &str) -> Result<Option<ProductView>, String> {
    let url = endpoint(&origin(), &["api", "products", id])?;

    let response = reqwest::get(url).await.map_err(|e| e.to_string())?;
    let status = response.status().as_u16();
    let body = response.text().await.map_err(|e| e.to_string())?;

    parse_product_response(status, &body)
}

pub fn parse_product_response(status: u16, body: &str) -> Result<Option<ProductView>, String> {
    match status {
        404 => Ok(None),
        200..=299 => serde_json::from_str::<ProductPageResponse>(body)
            .map(|page| Some(page.product))
            .map_err(|e| format!("malformed product response: {e}")),
        _ => Err(format!("product endpoint answered HTTP {status}")),
    }
}

/// Any non-2xx status, unparsable body or empty URL is a failure
pub fn parse_checkout_response(status: u16, body: &str) -> Result<String, String> {
    if !(200..300).contains(&status) {
        return Err(format!("checkout endpoint answered HTTP {status}"));
    }

    let data: CheckoutResponse =
        serde_json::from_str(body).map_err(|e| format!("malformed checkout response: {e}"))?;

    if data.checkout_url.trim().is_empty() {
        return Err("checkout response has an empty URL".into());
    }

    Ok(data.checkout_url)
}

/// `/api/checkout` over HTTP
pub struct HttpCheckoutApi {
    client: reqwest::Client,
    base: String,
}

impl HttpCheckoutApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.into(),
        }
    }

    /// Talk to the server the page was loaded from
    pub fn from_window() -> Self {
        Self::new(origin())
    }
}

#[async_trait(?Send)]
impl CheckoutApi for HttpCheckoutApi {
    async fn create_checkout_session(&self, price_id: &str) -> Result<String, String> {
        let url = endpoint(&self.base, &["api", "checkout"])?;

        let response = self
            .client
            .post(url)
            .json(&CheckoutRequest { price_id })
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.to_string())?;

        parse_checkout_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let url = endpoint("https://shop.example", &["api", "products", "prod_123"]).unwrap();
        assert_eq!(url.as_str(), "https://shop.example/api/products/prod_123");

        let url = endpoint("https://shop.example/", &["api", "checkout"]).unwrap();
        assert_eq!(url.as_str(), "https://shop.example/api/checkout");

        let url = endpoint("https://shop.example", &["api", "products", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "https://shop.example/api/products/a%2Fb");
    }

    #[test]
    fn test_checkout_request_body() {
        let body = serde_json::to_value(CheckoutRequest { price_id: "price_1" }).unwrap();
        assert_eq!(body, serde_json::json!({ "priceId": "price_1" }));
    }

    #[test]
    fn test_checkout_success() {
        let body = r#"{"checkoutUrl":"https://pay.example/session/abc"}"#;
        assert_eq!(
            parse_checkout_response(201, body),
            Ok("https://pay.example/session/abc".to_string())
        );
    }

    #[test]
    fn test_checkout_failures() {
        let ok_body = r#"{"checkoutUrl":"https://pay.example/session/abc"}"#;

        assert!(parse_checkout_response(500, ok_body).is_err());
        assert!(parse_checkout_response(400, r#"{"error":"Price not found."}"#).is_err());
        assert!(parse_checkout_response(200, "<html>").is_err());
        assert!(parse_checkout_response(200, r#"{"url":"https://x"}"#).is_err());
        assert!(parse_checkout_response(200, r#"{"checkoutUrl":""}"#).is_err());
    }

    #[test]
    fn test_product_response() {
        let body = r#"{
            "product": {
                "id": "prod_MxvdhAPFivvmUd",
                "name": "Camiseta Beyond the Limits",
                "description": "",
                "imageUrl": "https://files.stripe.com/beyond.png",
                "defaultPriceId": "price_1",
                "price": "R$ 79,90"
            },
            "revalidate": 7200,
            "stale": false
        }"#;

        let product = parse_product_response(200, body).unwrap().unwrap();
        assert_eq!(product.name, "Camiseta Beyond the Limits");
        assert_eq!(product.default_price_id, "price_1");

        assert_eq!(parse_product_response(404, "{}"), Ok(None));
        assert!(parse_product_response(502, "{}").is_err());
    }
}
