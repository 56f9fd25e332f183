//! Native driver for the connection manager
//!
//! Runs the [`ConnectionManager`] on a tokio task, executes its commands
//! against a `tokio-tungstenite` socket and publishes a [`LiveState`]
//! snapshot whenever an event changed it.
//!
//! Both handshakes are bounded: a connect that does not complete within
//! [`Deadlines::connect`] counts as a failed attempt, and a local close the
//! peer never answers is treated as closed after [`Deadlines::close`].

use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use std::collections::VecDeque;
use std::future::pending;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use super::machine::{Command, ConnectionManager, ConnectionState};
use super::toast::{Toast, ToastChannel};
use crate::protocol::StatusMap;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bounds on the opening and closing handshakes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadlines {
    pub connect: Duration,
    pub close: Duration,
}

impl Default for Deadlines {
    fn default() -> Self {
        Self {
            connect: CONNECT_TIMEOUT,
            close: CLOSE_TIMEOUT,
        }
    }
}

/// What a subscriber sees of the live connection
#[derive(Debug, Clone, PartialEq)]
pub struct LiveState {
    pub status: Option<StatusMap>,
    pub connected: bool,
    pub error: Option<String>,
    pub state: ConnectionState,
    pub toast: Option<Toast>,
    pub last_update: Option<DateTime<Utc>>,
    pub terminal: bool,
    /// Store revision the `status` was taken from
    pub revision: u64,
}

impl LiveState {
    fn capture(manager: &ConnectionManager, toasts: &ToastChannel) -> Self {
        Self {
            status: manager.status().cloned(),
            connected: manager.connected(),
            error: manager.error().map(str::to_string),
            state: manager.state(),
            toast: toasts.current().cloned(),
            last_update: manager.store().last_update(),
            terminal: manager.is_terminal(),
            revision: manager.store().revision(),
        }
    }

    /// Whether a fresh capture would be equal, without cloning the map
    fn is_current(&self, manager: &ConnectionManager, toasts: &ToastChannel) -> bool {
        self.revision == manager.store().revision()
            && self.connected == manager.connected()
            && self.error.as_deref() == manager.error()
            && self.state == manager.state()
            && self.toast.as_ref() == toasts.current()
            && self.terminal == manager.is_terminal()
    }
}

/// Notify subscribers only when the state moved
fn publish(
    state_tx: &watch::Sender<LiveState>,
    manager: &ConnectionManager,
    toasts: &ToastChannel,
) -> bool {
    state_tx.send_if_modified(|current| {
        if current.is_current(manager, toasts) {
            return false;
        }
        *current = LiveState::capture(manager, toasts);
        true
    })
}

/// Handle to a running connection task
pub struct LiveClient {
    state_rx: watch::Receiver<LiveState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl LiveClient {
    /// Start connecting in the background
    pub fn spawn(manager: ConnectionManager) -> Self {
        Self::spawn_with(manager, Deadlines::default())
    }

    pub fn spawn_with(manager: ConnectionManager, deadlines: Deadlines) -> Self {
        let (state_tx, state_rx) =
            watch::channel(LiveState::capture(&manager, &ToastChannel::new()));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(run(manager, deadlines, state_tx, shutdown_rx));

        Self {
            state_rx,
            shutdown_tx: Some(shutdown_tx),
            task,
        }
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<LiveState> {
        self.state_rx.clone()
    }

    /// Latest published state
    pub fn state(&self) -> LiveState {
        self.state_rx.borrow().clone()
    }

    /// Dispose the manager and wait for the task to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            tracing::warn!("Live connection task failed: {}", e);
        }
    }
}

impl Drop for LiveClient {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Deadlines armed by commands
#[derive(Default)]
struct Timers {
    reconnect_at: Option<Instant>,
    close_at: Option<Instant>,
    dismiss_at: Option<(u64, Instant)>,
}

async fn run(
    mut manager: ConnectionManager,
    deadlines: Deadlines,
    state_tx: watch::Sender<LiveState>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let mut toasts = ToastChannel::new();
    let mut timers = Timers::default();
    let mut socket: Option<Socket> = None;
    let mut queue: VecDeque<Command> = manager.connect().into();

    loop {
        while let Some(command) = queue.pop_front() {
            match command {
                Command::Open(url) => {
                    let connect = tokio::time::timeout(deadlines.connect, connect_async(url.clone()));
                    tokio::select! {
                        result = connect => match result {
                            Ok(Ok((ws, _))) => {
                                socket = Some(ws);
                                manager.on_open();
                            }
                            Ok(Err(e)) => {
                                tracing::warn!(url = %url, "Push connect failed: {}", e);
                                queue.extend(manager.on_transport_failed(&e.to_string()));
                            }
                            Err(_) => {
                                tracing::warn!(url = %url, "Push connect timed out");
                                let detail = format!("connect timed out after {:?}", deadlines.connect);
                                queue.extend(manager.on_transport_failed(&detail));
                            }
                        },
                        _ = &mut shutdown_rx => {
                            manager.dispose();
                            publish(&state_tx, &manager, &toasts);
                            return;
                        }
                    }
                }
                Command::Close => {
                    if let Some(ws) = socket.as_mut() {
                        if let Err(e) = ws.close(None).await {
                            tracing::debug!("Close handshake failed: {}", e);
                        }
                        timers.close_at = Some(Instant::now() + deadlines.close);
                    }
                }
                Command::ScheduleReconnect { delay, .. } => {
                    timers.reconnect_at = Some(Instant::now() + delay);
                }
                Command::CancelReconnect => timers.reconnect_at = None,
                Command::Notify(data) => {
                    let ticket = toasts.show(Toast::from(data));
                    timers.dismiss_at = Some((ticket.generation, Instant::now() + ticket.after));
                }
            }
        }

        publish(&state_tx, &manager, &toasts);

        tokio::select! {
            _ = &mut shutdown_rx => {
                for command in manager.dispose() {
                    if let (Command::Close, Some(ws)) = (command, socket.as_mut()) {
                        let _ = ws.close(None).await;
                    }
                }
                publish(&state_tx, &manager, &toasts);
                return;
            }
            frame = next_frame(&mut socket) => {
                match frame {
                    Some(Ok(Message::Text(text))) => queue.extend(manager.on_message(&text)),
                    Some(Ok(Message::Close(frame))) => {
                        let (code, reason) = frame
                            .map(|f| (Some(u16::from(f.code)), f.reason.into_owned()))
                            .unwrap_or((None, String::new()));
                        socket = None;
                        timers.close_at = None;
                        queue.extend(manager.on_close(code, &reason));
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        manager.on_error(&e.to_string());
                        socket = None;
                        timers.close_at = None;
                        queue.extend(manager.on_close(None, &e.to_string()));
                    }
                    None => {
                        socket = None;
                        timers.close_at = None;
                        queue.extend(manager.on_close(None, ""));
                    }
                }
            }
            _ = wait_until(timers.close_at) => {
                timers.close_at = None;
                tracing::warn!("Peer did not answer the close handshake");
                socket = None;
                queue.extend(manager.on_close(None, "close timeout"));
            }
            _ = wait_until(timers.reconnect_at) => {
                timers.reconnect_at = None;
                queue.extend(manager.on_reconnect_timer());
            }
            _ = wait_until(timers.dismiss_at.map(|(_, at)| at)) => {
                if let Some((generation, _)) = timers.dismiss_at.take() {
                    toasts.dismiss(generation);
                }
            }
        }
    }
}

async fn next_frame(
    socket: &mut Option<Socket>,
) -> Option<Result<Message, tokio_tungstenite::tungstenite::Error>> {
    match socket {
        Some(ws) => ws.next().await,
        None => pending().await,
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => pending().await,
    }
}
