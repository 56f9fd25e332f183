//! Snapshot Store
//!
//! Latest status of every host. Each `Status` message is authoritative, so
//! the whole map is replaced, never merged.

use chrono::{DateTime, Utc};

use crate::protocol::{HostStatus, StatusMap};

/// Host id → latest snapshot, owned by the connection manager
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    /// `None` until the first Status (or disconnect) is seen
    hosts: Option<StatusMap>,
    last_update: Option<DateTime<Utc>>,
    /// Bumped on every replace or clear
    revision: u64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole mapping with a fresh Status payload
    pub fn replace(&mut self, hosts: StatusMap) {
        self.hosts = Some(hosts);
        self.last_update = Some(Utc::now());
        self.revision += 1;
    }

    /// Reset to an empty mapping (used on disconnect)
    pub fn clear(&mut self) {
        self.hosts = Some(StatusMap::new());
        self.revision += 1;
    }

    /// Current mapping; `None` before anything was received
    pub fn status(&self) -> Option<&StatusMap> {
        self.hosts.as_ref()
    }

    pub fn get(&self, host_id: &str) -> Option<&HostStatus> {
        self.hosts.as_ref()?.get(host_id)
    }

    pub fn len(&self) -> usize {
        self.hosts.as_ref().map(|h| h.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// When the last Status was applied
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    /// Changes whenever the mapping does; cheaper to compare than the map
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
