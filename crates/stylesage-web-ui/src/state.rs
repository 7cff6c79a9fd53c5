//! Application State Management
//!
//! The dashboard controller from `stylesage-core` is the single source of
//! truth; a Leptos signal mirrors its watch channel so views re-render on
//! every transition.

use leptos::*;
use std::future::Future;
use std::rc::Rc;
use stylesage_core::{ClientConfig, Dashboard, DashboardState, Result, ViewSelector};

use crate::api::GlooBackend;

pub type SharedDashboard = Rc<Dashboard<GlooBackend>>;

/// Top-level view selection
#[derive(Clone, Copy)]
pub struct AppState {
    pub view: RwSignal<ViewSelector>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: create_rw_signal(ViewSelector::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the dashboard controller plus its mirrored state
#[derive(Clone, Copy)]
pub struct DashboardContext {
    dashboard: StoredValue<SharedDashboard>,
    pub state: RwSignal<DashboardState>,
    /// Last failure worth showing; guard rejections are not shown
    pub error: RwSignal<Option<String>>,
}

impl DashboardContext {
    pub fn new(config: &ClientConfig) -> Self {
        let backend = GlooBackend::new(&config.backend_base_url);
        let dashboard = Rc::new(Dashboard::new(backend, config));
        let state = create_rw_signal(dashboard.snapshot());

        let mut rx = dashboard.subscribe();
        spawn_local(async move {
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                state.set(next);
            }
        });

        Self {
            dashboard: store_value(dashboard),
            state,
            error: create_rw_signal(None),
        }
    }

    /// Apply a synchronous change (filter, form inputs)
    pub fn apply(&self, f: impl FnOnce(&Dashboard<GlooBackend>)) {
        self.dashboard.with_value(|d| f(d));
    }

    /// Fire-and-forget a backend operation.
    pub fn run<F, Fut, T>(&self, op: F)
    where
        F: FnOnce(SharedDashboard) -> Fut + 'static,
        Fut: Future<Output = Result<T>> + 'static,
        T: 'static,
    {
        let dashboard = self.dashboard.get_value();
        let error = self.error;
        spawn_local(async move {
            match op(dashboard).await {
                Ok(_) => error.set(None),
                Err(e) if e.is_precondition() => {}
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    }
}
