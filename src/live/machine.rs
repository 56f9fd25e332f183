//! Connection state machine
//!
//! The manager does no I/O itself. The host environment (browser callbacks or
//! the tokio driver in [`super::client`]) feeds it transport events and
//! executes the [`Command`]s it returns. This keeps the reconnect rules in one
//! place and testable without a socket.
//!
//! ```text
//! Idle ──connect──▶ Connecting ──open──▶ Open ──Close msg──▶ Closing
//!                       │                  │                    │
//!                       └──────close───────┴───────close────────┘
//!                                          │
//!                     attempts < max ──────┴────── attempts exhausted
//!                           ▼                            ▼
//!                     RetryPending ──timer──▶ Connecting  Terminal
//! ```
//!
//! Any state moves to `Disposed` on [`ConnectionManager::dispose`].

use std::time::Duration;
use url::Url;

use super::endpoint::Endpoint;
use super::reconnect::ReconnectPolicy;
use super::store::SnapshotStore;
use crate::protocol::{ServerMessage, StatusMap, ToastData};

/// Error shown once every reconnect attempt has failed
pub const RETRIES_EXHAUSTED: &str = "Failed to connect after multiple attempts";

/// Lifecycle of the push connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Never connected
    Idle,
    /// Transport created, waiting for the handshake
    Connecting,
    Open,
    /// Local close requested, waiting for the close event
    Closing,
    /// Disconnected, reconnect timer armed
    RetryPending { attempt: u32 },
    /// Retries exhausted or endpoint unusable; needs a reload
    Terminal,
    Disposed,
}

impl ConnectionState {
    /// Whether a transport instance exists in this state
    pub fn has_transport(&self) -> bool {
        matches!(
            self,
            ConnectionState::Connecting | ConnectionState::Open | ConnectionState::Closing
        )
    }
}

/// Side effects the host environment must perform
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a transport to this URL
    Open(Url),
    /// Close the current transport
    Close,
    /// Call [`ConnectionManager::on_reconnect_timer`] after `delay`
    ScheduleReconnect { delay: Duration, attempt: u32 },
    /// Drop the pending reconnect timer
    CancelReconnect,
    /// Surface a notification
    Notify(ToastData),
}

/// Owns the single push connection and the snapshot store
#[derive(Debug)]
pub struct ConnectionManager {
    endpoint: Endpoint,
    policy: ReconnectPolicy,
    state: ConnectionState,
    store: SnapshotStore,
    error: Option<String>,
    attempts: u32,
    url: Option<Url>,
}

impl ConnectionManager {
    pub fn new(endpoint: Endpoint, policy: ReconnectPolicy) -> Self {
        Self {
            endpoint,
            policy,
            state: ConnectionState::Idle,
            store: SnapshotStore::new(),
            error: None,
            attempts: 0,
            url: None,
        }
    }

    /// Start a connection; ignored while a transport exists or after
    /// a terminal state.
    pub fn connect(&mut self) -> Vec<Command> {
        match self.state {
            ConnectionState::Idle | ConnectionState::RetryPending { .. } => {}
            state => {
                tracing::debug!(?state, "connect ignored");
                return Vec::new();
            }
        }

        match self.endpoint.resolve() {
            Ok(url) => {
                tracing::info!(url = %url, attempt = self.attempts, "Connecting to push server");
                self.url = Some(url.clone());
                self.state = ConnectionState::Connecting;
                vec![Command::Open(url)]
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to resolve push endpoint");
                self.error = Some(format!("Failed to create WebSocket connection: {}", e));
                self.state = ConnectionState::Terminal;
                Vec::new()
            }
        }
    }

    /// Transport handshake completed
    pub fn on_open(&mut self) {
        if self.state != ConnectionState::Connecting {
            return;
        }
        tracing::info!(url = ?self.url.as_ref().map(Url::as_str), "Push connection open");
        self.state = ConnectionState::Open;
        self.error = None;
        self.attempts = 0;
    }

    /// A text frame arrived
    pub fn on_message(&mut self, text: &str) -> Vec<Command> {
        if !matches!(self.state, ConnectionState::Open | ConnectionState::Closing) {
            return Vec::new();
        }

        match ServerMessage::from_json(text) {
            Ok(ServerMessage::Status(hosts)) => {
                tracing::debug!(hosts = hosts.len(), "Status updated");
                self.store.replace(hosts);
                Vec::new()
            }
            Ok(ServerMessage::Toast(toast)) => vec![Command::Notify(toast)],
            Ok(ServerMessage::Close) => {
                if self.state != ConnectionState::Open {
                    return Vec::new();
                }
                tracing::info!("Server requested close");
                self.state = ConnectionState::Closing;
                vec![Command::Close]
            }
            Ok(ServerMessage::Hi(greeting)) => {
                tracing::debug!(%greeting, "Server greeting");
                Vec::new()
            }
            Ok(ServerMessage::Sync(detail)) => {
                tracing::debug!(%detail, "Sync message");
                Vec::new()
            }
            Ok(ServerMessage::Unknown(kind)) => {
                tracing::debug!(%kind, "Unknown message type");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dropping undecodable message");
                Vec::new()
            }
        }
    }

    /// Transport reported an error; the close event that follows drives
    /// reconnection.
    pub fn on_error(&mut self, detail: &str) {
        if !self.state.has_transport() {
            return;
        }
        let url = self.url.as_ref().map(Url::as_str).unwrap_or("<unresolved>");
        tracing::warn!(%url, %detail, "Push connection error");
        self.error = Some(if detail.is_empty() {
            format!("WebSocket connection error: {}", url)
        } else {
            format!("WebSocket connection error: {} ({})", url, detail)
        });
    }

    /// Transport closed, for whatever reason
    pub fn on_close(&mut self, code: Option<u16>, reason: &str) -> Vec<Command> {
        if !self.state.has_transport() {
            return Vec::new();
        }
        tracing::info!(?code, %reason, "Push connection closed");

        self.store.clear();
        self.url = None;

        if self.attempts < self.policy.max_attempts {
            self.attempts += 1;
            let attempt = self.attempts;
            let delay = self.policy.delay_for(attempt);
            tracing::info!(
                "Reconnecting in {:?} (attempt {}/{})",
                delay,
                attempt,
                self.policy.max_attempts
            );
            self.state = ConnectionState::RetryPending { attempt };
            vec![Command::ScheduleReconnect { delay, attempt }]
        } else {
            tracing::error!(attempts = self.attempts, "Giving up on push server");
            self.error = Some(RETRIES_EXHAUSTED.to_string());
            self.state = ConnectionState::Terminal;
            Vec::new()
        }
    }

    /// The transport could not even be created
    pub fn on_transport_failed(&mut self, detail: &str) -> Vec<Command> {
        self.on_error(detail);
        self.on_close(None, detail)
    }

    /// Reconnect timer fired
    pub fn on_reconnect_timer(&mut self) -> Vec<Command> {
        match self.state {
            ConnectionState::RetryPending { .. } => self.connect(),
            _ => Vec::new(),
        }
    }

    /// Tear down: cancel the timer and close the transport, exactly once
    pub fn dispose(&mut self) -> Vec<Command> {
        let commands = match self.state {
            ConnectionState::Disposed => return Vec::new(),
            ConnectionState::Connecting | ConnectionState::Open | ConnectionState::Closing => {
                vec![Command::Close]
            }
            ConnectionState::RetryPending { .. } => vec![Command::CancelReconnect],
            ConnectionState::Idle | ConnectionState::Terminal => Vec::new(),
        };
        tracing::info!("Disposing push connection");
        self.state = ConnectionState::Disposed;
        self.url = None;
        commands
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Latest host mapping; `None` before the first Status or disconnect
    pub fn status(&self) -> Option<&StatusMap> {
        self.store.status()
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn connected(&self) -> bool {
        matches!(self.state, ConnectionState::Open | ConnectionState::Closing)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Retries are exhausted (or the endpoint is unusable)
    pub fn is_terminal(&self) -> bool {
        self.state == ConnectionState::Terminal
    }

    /// Reconnect attempts used since the last successful open
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn policy(&self) -> &ReconnectPolicy {
        &self.policy
    }
}
