//! Product Page

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::api::{self, ProductView};
use crate::browser::set_title;
use crate::components::ProductDetails;

pub const STORE_NAME: &str = "Ignite Shop";

pub fn page_title(product_name: &str) -> String {
    format!("{product_name} | {STORE_NAME}")
}

/// What the page shows once the data request settled
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageState {
    Ready(ProductView),
    NotFound,
    Failed(String),
}

impl From<Result<Option<ProductView>, String>> for PageState {
    fn from(result: Result<Option<ProductView>, String>) -> Self {
        match result {
            Ok(Some(product)) => PageState::Ready(product),
            Ok(None) => PageState::NotFound,
            Err(e) => PageState::Failed(e),
        }
    }
}

#[component]
pub fn ProductPage() -> impl IntoView {
    let params = use_params_map();
    let product = LocalResource::new(move || {
        let id = params.read().get("id").unwrap_or_default();
        async move { api::fetch_product(&id).await }
    });

    view! {
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || Suspend::new(async move { render(PageState::from(product.await)) })}
        </Suspense>
    }
}

fn render(state: PageState) -> AnyView {
    match state {
        PageState::Ready(product) => {
            set_title(&page_title(&product.name));
            view! { <ProductDetails product=product /> }.into_any()
        }
        PageState::NotFound => view! { <p class="not-found">"Product not found"</p> }.into_any(),
        PageState::Failed(e) => {
            leptos::logging::error!("Failed to load product: {}", e);
            view! { <p class="error">"Something went wrong loading this product."</p> }.into_any()
        }
    }
}
