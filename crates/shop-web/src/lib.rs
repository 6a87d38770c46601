//! Ignite Shop Web Frontend
//!
//! Leptos-based WASM frontend for the product page.
//!
//! The checkout flow in [`checkout`] is independent of the DOM: the page
//! plugs in HTTP and `window` implementations, tests plug in doubles.

mod api;
mod app;
mod browser;
pub mod checkout;
mod components;
mod pages;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
