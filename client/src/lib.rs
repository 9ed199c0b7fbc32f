//! # client
//!
//! Leptos + WASM single-page dashboard for the agriboard API.
//!
//! This crate contains pages, components, reactive state, and the browser
//! transport. Session handling, route gating, and pagination come from
//! `portal`; this crate adapts them to the Leptos router and signals.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: wire logging and mount the app on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // `tracing` events reach the console through its `log` bridge.
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logging unavailable: {err}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
