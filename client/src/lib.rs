//! LegalDesk console: Leptos application for the legal-practice backend.
//!
//! ARCHITECTURE
//! ============
//! - `state`: permission store, session state, feature catalog.
//! - `components`: session/permission guards and the navigation bar.
//! - `pages`: login, registration, profile, and gated feature routes.
//! - `net`: REST calls against the backend API.
//! - `util`: token storage, session transitions, CI validation.

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs logging and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
