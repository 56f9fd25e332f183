//! # PC Status
//!
//! Live dashboard for a fleet of monitored machines. Agents report to a push
//! server; this crate is the consumer side of that server.
//!
//! ## Features
//!
//! - **Live connection**: one push connection with attempt-capped reconnects
//! - **Snapshot store**: every `Status` message replaces the host map wholesale
//! - **Toasts**: last-writer-wins notifications with timed dismissal
//! - **Charts**: fixed-range line charts drawn on any [`chart::Surface`]
//! - **View models**: summary cards, focus view and the screen gate
//!
//! ## Modules
//!
//! - [`protocol`]: Wire envelope and host status types
//! - [`live`]: Connection state machine, snapshot store and toast channel
//! - [`chart`]: Chart renderer with canvas-agnostic drawing
//! - [`view`]: Pure view models
//! - [`format`]: Percentages, byte sizes, uptime and OS icons
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pc_status::config::Config;
//! use pc_status::live::{ConnectionManager, LiveClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load_default();
//!     let manager = ConnectionManager::new(
//!         config.connection.endpoint(None),
//!         config.connection.reconnect_policy(),
//!     );
//!
//!     let client = LiveClient::spawn(manager);
//!     let mut updates = client.subscribe();
//!
//!     while updates.changed().await.is_ok() {
//!         let state = updates.borrow().clone();
//!         println!("{} hosts", state.status.map(|s| s.len()).unwrap_or(0));
//!     }
//! }
//! ```

pub mod chart;
pub mod config;
pub mod format;
pub mod live;
pub mod protocol;
pub mod view;

// Re-export top-level types for convenience
pub use protocol::{HostStatus, ProtocolError, ServerMessage, StatusMap, ToastData};

pub use live::{
    Command, ConnectionManager, ConnectionState, Endpoint, LiveError, ReconnectPolicy,
    SnapshotStore, Toast, ToastChannel,
};

#[cfg(feature = "native")]
pub use live::{LiveClient, LiveState};

pub use chart::{draw_chart, ChartSeries, ChartSpec, RenderError, Surface};

pub use view::{FocusView, HostSummary, Screen};

pub use config::{Config, ConfigError};
