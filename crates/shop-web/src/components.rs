//! UI Components

use leptos::prelude::*;

use crate::api::{HttpCheckoutApi, ProductView};
use crate::browser::WindowBrowser;
use crate::checkout::{CheckoutPhase, PhaseSlot, initiate_checkout};

impl PhaseSlot for RwSignal<CheckoutPhase> {
    fn phase(&self) -> CheckoutPhase {
        self.get_untracked()
    }

    fn set_phase(&self, phase: CheckoutPhase) {
        self.set(phase);
    }
}

/// Product image, name, price and description
#[component]
pub fn ProductDetails(product: ProductView) -> impl IntoView {
    let ProductView {
        name,
        description,
        image_url,
        default_price_id,
        price,
        ..
    } = product;

    let image = (!image_url.is_empty())
        .then(|| view! { <img src=image_url width="520" height="480" alt="" /> });

    view! {
        <div class="product">
            <div class="image-container">{image}</div>

            <div class="product-details">
                <h1>{name}</h1>
                <span>{price}</span>

                <p>{description}</p>

                <BuyButton price_id=default_price_id />
            </div>
        </div>
    }
}

/// Starts a hosted checkout for `price_id`; disabled while one is under way
#[component]
pub fn BuyButton(price_id: String) -> impl IntoView {
    let phase = RwSignal::new(CheckoutPhase::Idle);

    let buy = move |_| {
        let price_id = price_id.clone();
        leptos::task::spawn_local(async move {
            let api = HttpCheckoutApi::from_window();
            let outcome = initiate_checkout(&api, &WindowBrowser, &phase, &price_id).await;
            leptos::logging::log!("checkout outcome: {:?}", outcome);
        });
    };

    view! {
        <button disabled=move || phase.get().is_busy() on:click=buy>
            "Comprar agora"
        </button>
    }
}
