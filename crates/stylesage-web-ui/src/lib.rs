//! Pure Rust WebAssembly Frontend for Style Sage
//!
//! Leptos front-end over `stylesage-core`:
//! - Landing screen that hands over to the dashboard on "Start"
//! - Dashboard driven by the core controller, talking to the backend via fetch

use leptos::*;
use stylesage_core::{ClientConfig, View};

mod api;
mod components;
mod pages;
mod state;

pub use api::*;
pub use components::*;
pub use pages::*;
pub use state::*;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_build_env().unwrap_or_else(|e| {
        tracing::error!("Invalid build configuration, using defaults: {}", e);
        ClientConfig::default()
    });
    tracing::info!("Backend at {}", config.backend_base_url);
    provide_context(config);

    let app_state = AppState::new();
    provide_context(app_state);

    // Only re-render when the selected view actually changes
    let current = create_memo(move |_| app_state.view.get().current());

    let on_start = move |_: ()| {
        app_state.view.update(|selector| {
            if selector.start() {
                tracing::debug!("Switching to dashboard");
            }
        });
    };

    view! {
        <main class="app-container">
            {move || match current.get() {
                View::Landing => view! { <LandingPage on_start=on_start/> }.into_view(),
                View::Dashboard => view! { <DashboardRoot/> }.into_view(),
            }}
        </main>
    }
}

/// Application entry point for WASM
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    mount_to_body(App);
}
