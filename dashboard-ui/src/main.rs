//! PC Status Dashboard
//!
//! Live host monitoring dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Live host status over a push WebSocket with automatic reconnects
//! - Searchable host grid with summary cards
//! - Focus view with history charts drawn on canvas
//! - Connection toasts and a dark/light theme
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Protocol handling, the connection state machine, the chart
//! renderer and all view models come from the `pc-status` library; this crate
//! only binds them to the DOM.

use leptos::*;

mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
