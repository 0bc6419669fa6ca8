#![recursion_limit = "256"]

pub mod api;
pub mod app;
pub mod citations;
pub mod components;
pub mod config;
pub mod conversation;
pub mod error_template;
pub mod layout;
pub mod types;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    leptos::mount::hydrate_body(App);
}
