//! Push Message Envelope
//!
//! Every frame from the push server is a JSON text `{ "type": ..., "data": ... }`.
//! Decoding happens in two steps so that an unrecognised `type` is reported
//! as [`ServerMessage::Unknown`] instead of a decode failure.

use serde::Deserialize;
use serde_json::{json, Value};

use super::error::{ProtocolError, ProtocolResult};
use super::types::{StatusMap, ToastData};

/// Raw envelope as it appears on the wire
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

/// Messages sent from the push server to dashboards
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    /// Greeting sent right after the handshake
    Hi(String),
    /// Authoritative full snapshot of every connected host
    Status(StatusMap),
    /// Notification to surface to the user
    Toast(ToastData),
    /// Server asks the dashboard to close its connection
    Close,
    /// Informational sync marker
    Sync(String),
    /// A `type` this dashboard does not understand
    Unknown(String),
}

impl ServerMessage {
    /// Decode a text frame
    pub fn from_json(text: &str) -> ProtocolResult<Self> {
        let envelope: Envelope = serde_json::from_str(text)?;

        let message = match envelope.kind.as_str() {
            "Hi" => ServerMessage::Hi(informational(envelope.data)),
            "Status" => ServerMessage::Status(payload(&envelope.kind, envelope.data)?),
            "Toast" => ServerMessage::Toast(payload(&envelope.kind, envelope.data)?),
            "Close" => ServerMessage::Close,
            "Sync" => ServerMessage::Sync(informational(envelope.data)),
            _ => ServerMessage::Unknown(envelope.kind),
        };

        Ok(message)
    }

    /// Encode as a text frame (the inverse of [`ServerMessage::from_json`])
    pub fn to_json(&self) -> ProtocolResult<String> {
        let value = match self {
            ServerMessage::Hi(text) => json!({ "type": "Hi", "data": text }),
            ServerMessage::Status(hosts) => json!({ "type": "Status", "data": hosts }),
            ServerMessage::Toast(toast) => json!({ "type": "Toast", "data": toast }),
            ServerMessage::Close => json!({ "type": "Close" }),
            ServerMessage::Sync(text) => json!({ "type": "Sync", "data": text }),
            ServerMessage::Unknown(kind) => json!({ "type": kind }),
        };

        Ok(serde_json::to_string(&value)?)
    }

    /// Envelope `type` name
    pub fn kind(&self) -> &str {
        match self {
            ServerMessage::Hi(_) => "Hi",
            ServerMessage::Status(_) => "Status",
            ServerMessage::Toast(_) => "Toast",
            ServerMessage::Close => "Close",
            ServerMessage::Sync(_) => "Sync",
            ServerMessage::Unknown(kind) => kind,
        }
    }
}

fn payload<T: serde::de::DeserializeOwned>(kind: &str, data: Value) -> ProtocolResult<T> {
    serde_json::from_value(data).map_err(|e| ProtocolError::Payload {
        kind: kind.to_string(),
        error: e.to_string(),
    })
}

fn informational(data: Value) -> String {
    match data {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
