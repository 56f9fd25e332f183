//! Application Context
//!
//! Reactive state using Leptos signals. Created once by the app root and
//! handed to every component through the context tree.

use chrono::{DateTime, Utc};
use leptos::*;
use pc_status::live::Toast;
use pc_status::protocol::StatusMap;
use pc_status::view::{DashboardState, Screen};

/// Application state provided to all components
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Latest host mapping; `None` before the first Status
    pub status: RwSignal<Option<StatusMap>>,
    /// Push connection is open
    pub connected: RwSignal<bool>,
    /// Last connection error
    pub error: RwSignal<Option<String>>,
    /// Retries exhausted; only a reload recovers
    pub terminal: RwSignal<bool>,
    /// Currently visible toast
    pub toast: RwSignal<Option<Toast>>,
    /// When the last Status arrived
    pub last_update: RwSignal<Option<DateTime<Utc>>>,
    /// App finished mounting
    pub ready: RwSignal<bool>,
    /// Search, focus and theme
    pub dashboard: RwSignal<DashboardState>,
}

impl AppContext {
    fn new() -> Self {
        Self {
            status: create_rw_signal(None),
            connected: create_rw_signal(false),
            error: create_rw_signal(None),
            terminal: create_rw_signal(false),
            toast: create_rw_signal(None),
            last_update: create_rw_signal(None),
            ready: create_rw_signal(false),
            dashboard: create_rw_signal(DashboardState::new()),
        }
    }

    /// Which full-screen state to show
    pub fn screen(&self) -> Screen {
        Screen::select(self.ready.get(), self.connected.get(), self.terminal.get())
    }

    /// Number of hosts currently reported
    pub fn host_count(&self) -> usize {
        self.status
            .with(|s| s.as_ref().map(|m| m.len()).unwrap_or(0))
    }
}

/// Create the context and provide it to the component tree
pub fn provide_app_context() -> AppContext {
    let ctx = AppContext::new();
    provide_context(ctx);
    ctx
}

/// Fetch the context provided by the app root
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext not found")
}
