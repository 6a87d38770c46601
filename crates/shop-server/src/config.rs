//! Server Configuration

use std::env;

use anyhow::Context;

/// Process configuration, read once at startup
#[derive(Debug, Clone)]
pub struct ShopConfig {
    pub bind_addr: String,
    /// Base URL Stripe redirects back to
    pub public_url: String,
    /// Compiled WASM frontend
    pub static_dir: String,
    pub stripe_secret_key: String,
}

impl ShopConfig {
    /// Read configuration from the environment. The Stripe key is required.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let stripe_secret_key = lookup("STRIPE_SECRET_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("STRIPE_SECRET_KEY not set")?;

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".into()),
            public_url: lookup("SHOP_PUBLIC_URL").unwrap_or_else(|| "http://localhost:3000".into()),
            static_dir: lookup("SHOP_STATIC_DIR").unwrap_or_else(|| "static".into()),
            stripe_secret_key,
        })
    }
}

#[cfg(test)]
impl ShopConfig {
    pub fn for_tests() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".into(),
            public_url: "http://localhost:3000".into(),
            static_dir: "static".into(),
            stripe_secret_key: "sk_test_mock_key".into(),
        }
    }
}
