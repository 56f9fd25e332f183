//! Live connection
//!
//! Keeps exactly one push connection open, stores the latest host snapshot,
//! routes notifications, and reconnects with an attempt-capped policy.
//!
//! The [`ConnectionManager`] is a plain state machine; the host environment
//! drives it. [`LiveClient`] is the tokio driver, the browser driver lives in
//! the dashboard UI crate.

#[cfg(feature = "native")]
mod client;
mod endpoint;
mod error;
mod machine;
mod reconnect;
mod store;
mod toast;

#[cfg(feature = "native")]
pub use client::{Deadlines, LiveClient, LiveState, CLOSE_TIMEOUT, CONNECT_TIMEOUT};
pub use endpoint::{is_configured, Endpoint};
pub use error::{LiveError, LiveResult};
pub use machine::{Command, ConnectionManager, ConnectionState, RETRIES_EXHAUSTED};
pub use reconnect::{Backoff, ReconnectPolicy};
pub use store::SnapshotStore;
pub use toast::{DismissTicket, Severity, Toast, ToastChannel, DEFAULT_TOAST_DURATION};
