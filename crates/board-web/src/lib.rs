//! opsboard Web Frontend
//!
//! Leptos-based WASM frontend: the live collection views, the router
//! shell, and the marketing landing page.

mod api;
mod app;
mod components;
mod live;
mod pages;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
