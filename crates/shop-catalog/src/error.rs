//! Error Types for the Catalog

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog and page-loading errors
///
/// Variants carry only strings so cached failures can be cloned into test
/// doubles and across the store boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Identifier unknown to the catalog (or not a valid identifier at all)
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Credential rejected by the provider
    #[error("Catalog authentication failed: {0}")]
    Auth(String),

    /// Transport failure or timeout talking to the provider
    #[error("Network error: {0}")]
    Network(String),

    /// Any other provider-side failure
    #[error("Catalog provider error: {0}")]
    Provider(String),

    /// Product exists but has no usable default price
    #[error("Product {0} has no default price amount")]
    MissingPrice(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }

    /// Check if a later attempt could succeed without operator action
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::Network(_) | CatalogError::Provider(_))
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            CatalogError::NotFound(_) => "Product not found.",
            CatalogError::Network(_) | CatalogError::Provider(_) => {
                "The product catalog is unavailable. Please try again."
            }
            _ => "An error occurred loading this product.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinguishable_from_auth() {
        let missing = CatalogError::NotFound("prod_x".into());
        let auth = CatalogError::Auth("invalid api key".into());

        assert!(missing.is_not_found());
        assert!(!auth.is_not_found());
        assert!(!missing.is_retryable());
        assert!(!auth.is_retryable());
        assert!(CatalogError::Network("timeout".into()).is_retryable());
    }
}
