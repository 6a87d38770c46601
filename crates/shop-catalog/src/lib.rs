//! # shop-catalog
//!
//! Product data for the storefront's product page.
//!
//! ## Data flow
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌────────────────┐   ┌───────────────┐
//! │ route id │──▶│ PageStore  │──▶│ ProductCatalog │──▶│ ProductRecord │
//! └──────────┘   │ (ISR cache)│   │ (Stripe, mock) │   │ price "R$ …"  │
//!                └────────────┘   └────────────────┘   └───────────────┘
//! ```
//!
//! The `ProductCatalog` trait keeps the loader independent of the payment
//! provider; `shop-payments` supplies the Stripe implementation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shop_catalog::{MockCatalog, PagePlan, PageStore};
//!
//! let pages = PageStore::new(Arc::new(MockCatalog::demo()), PagePlan::default());
//! pages.prerender().await?;
//!
//! let page = pages.get("prod_MxvdhAPFivvmUd").await?;
//! assert_eq!(page.record.price, "R$\u{a0}79,90");
//! ```

pub mod catalog;
pub mod error;
pub mod money;
pub mod page;
pub mod store;

pub use catalog::{CatalogPrice, CatalogProduct, MockCatalog, ProductCatalog};
pub use error::{CatalogError, Result};
pub use money::format_brl;
pub use page::{FallbackPolicy, PagePlan, ProductRecord, load_product};
pub use store::{Page, PageOrigin, PageStore};
