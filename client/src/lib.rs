//! # hp-client
//!
//! Leptos + WASM single-page client for HP.
//!
//! The crate wires routing, the persisted session store, auth-cookie
//! handling, and an intercepted HTTP client that keeps the session in step
//! with the backend's cookies and stamps every request with CSRF and
//! correlation headers. Pages are thin views over those pieces.

pub mod app;
pub mod auth;
pub mod components;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod util;

/// WASM entry point: install the panic hook and logger, then mount [`app::App`].
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already initialised: {e}");
    }
    log::info!("hp-client mounting");
    leptos::mount::mount_to_body(app::App);
}
