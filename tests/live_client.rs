//! End-to-end tests of the native live client against a local push server

#![cfg(feature = "native")]

use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use pc_status::live::{
    ConnectionManager, Deadlines, Endpoint, LiveClient, LiveState, ReconnectPolicy,
    RETRIES_EXHAUSTED,
};
use pc_status::protocol::{HostStatus, ServerMessage, StatusMap, ToastData};

fn fast_policy(max_attempts: u32) -> ReconnectPolicy {
    ReconnectPolicy {
        delay: Duration::from_millis(20),
        max_attempts,
        ..Default::default()
    }
}

fn manager(port: u16, policy: ReconnectPolicy) -> ConnectionManager {
    let endpoint = Endpoint::new(&format!("http://127.0.0.1:{}", port), "/server");
    ConnectionManager::new(endpoint, policy)
}

fn status_frame(hosts: &[&str]) -> Message {
    let map: StatusMap = hosts
        .iter()
        .map(|h| {
            (
                format!("id-{}", h),
                HostStatus {
                    hostname: h.to_string(),
                    ..Default::default()
                },
            )
        })
        .collect();
    Message::Text(ServerMessage::Status(map).to_json().unwrap())
}

async fn wait_for(
    rx: &mut watch::Receiver<LiveState>,
    pred: impl Fn(&LiveState) -> bool,
) -> LiveState {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let state = rx.borrow_and_update();
                if pred(&state) {
                    return state.clone();
                }
            }
            rx.changed().await.expect("live task ended");
        }
    })
    .await
    .expect("timed out waiting for live state")
}

#[tokio::test]
async fn test_receives_status_and_toast() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(Message::Text(r#"{"type":"Hi","data":"hello"}"#.to_string()))
            .await
            .unwrap();
        ws.send(status_frame(&["desk", "laptop"])).await.unwrap();
        let toast = ServerMessage::Toast(ToastData {
            message: "laptop connected".to_string(),
            color: "green".to_string(),
            toast_time: 60_000,
        });
        ws.send(Message::Text(toast.to_json().unwrap())).await.unwrap();
        // Keep the socket open until the client leaves
        while let Some(Ok(msg)) = ws.next().await {
            if msg.is_close() {
                break;
            }
        }
    });

    let client = LiveClient::spawn(manager(port, fast_policy(3)));
    let mut rx = client.subscribe();

    let state = wait_for(&mut rx, |s| {
        s.connected && s.status.as_ref().map(|m| m.len()) == Some(2) && s.toast.is_some()
    })
    .await;

    assert_eq!(state.status.unwrap()["id-desk"].hostname, "desk");
    assert_eq!(state.toast.unwrap().message, "laptop connected");
    assert!(state.error.is_none());
    assert!(state.last_update.is_some());

    client.shutdown().await;
    server.await.unwrap();
}

#[tokio::test]
async fn test_server_close_triggers_reconnect() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(status_frame(&["old"])).await.unwrap();
        ws.send(Message::Text(r#"{"type":"Close"}"#.to_string()))
            .await
            .unwrap();
        while let Some(Ok(msg)) = ws.next().await {
            if msg.is_close() {
                break;
            }
        }
        drop(ws);

        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(status_frame(&["new"])).await.unwrap();
        while let Some(Ok(msg)) = ws.next().await {
            if msg.is_close() {
                break;
            }
        }
    });

    let client = LiveClient::spawn(manager(port, fast_policy(3)));
    let mut rx = client.subscribe();

    let state = wait_for(&mut rx, |s| {
        s.connected
            && s
                .status
                .as_ref()
                .map(|m| m.contains_key("id-new"))
                .unwrap_or(false)
    })
    .await;
    assert_eq!(state.status.unwrap().len(), 1);

    client.shutdown().await;
    server.await.unwrap();
}

#[tokio::test]
async fn test_gives_up_when_nothing_listens() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = LiveClient::spawn(manager(port, fast_policy(2)));
    let mut rx = client.subscribe();

    let state = wait_for(&mut rx, |s| s.terminal).await;
    assert!(!state.connected);
    assert_eq!(state.error.as_deref(), Some(RETRIES_EXHAUSTED));
    assert_eq!(state.status, Some(StatusMap::new()));

    client.shutdown().await;
}

#[tokio::test]
async fn test_unanswered_close_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(status_frame(&["stuck"])).await.unwrap();
        ws.send(Message::Text(r#"{"type":"Close"}"#.to_string()))
            .await
            .unwrap();
        // Hold the socket open without reading the close reply
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(ws);
    });

    let deadlines = Deadlines {
        close: Duration::from_millis(200),
        ..Default::default()
    };
    let client = LiveClient::spawn_with(manager(port, fast_policy(3)), deadlines);
    let mut rx = client.subscribe();

    // Revision 1 is the Status, revision 2 the clear on close
    let state = wait_for(&mut rx, |s| s.revision >= 2 && !s.connected).await;
    assert_eq!(state.status, Some(StatusMap::new()));
    assert!(!state.terminal);

    client.shutdown().await;
    server.abort();
}

#[tokio::test]
async fn test_stalled_handshake_counts_as_failed_attempt() {
    // Accepts TCP through the backlog but never answers the upgrade
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let deadlines = Deadlines {
        connect: Duration::from_millis(100),
        ..Default::default()
    };
    let client = LiveClient::spawn_with(manager(port, fast_policy(1)), deadlines);
    let mut rx = client.subscribe();

    let state = wait_for(&mut rx, |s| s.terminal).await;
    assert!(!state.connected);
    assert_eq!(state.error.as_deref(), Some(RETRIES_EXHAUSTED));

    client.shutdown().await;
    drop(listener);
}
