//! Host Status Types
//!
//! Snapshot shapes reported by the monitoring agents and relayed by the
//! push server. Every optional part of a report is an explicit `Option` or
//! an empty collection so consumers never have to probe for field presence.

use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Full status mapping as delivered by a `Status` message: host id → snapshot
pub type StatusMap = HashMap<String, HostStatus>;

/// Utilisation of a single CPU core
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpuCore {
    /// Usage percentage (0-100)
    pub cpu: f64,
}

/// CPU model and per-core utilisation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub cpus: Vec<CpuCore>,
}

/// Total and free bytes of a memory-like resource (RAM, swap, VRAM)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub free: u64,
    pub total: u64,
}

impl MemoryUsage {
    /// Bytes in use
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }
}

/// A mounted storage volume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    #[serde(default)]
    pub name: Option<String>,
    pub free: u64,
    pub total: u64,
}

impl Storage {
    /// Bytes in use
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }
}

/// A graphics adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gpu {
    pub name: String,
    /// Core usage percentage (0-100)
    #[serde(default)]
    pub usage: f64,
    #[serde(default)]
    pub memory: MemoryUsage,
}

/// Cumulative traffic counters of a network interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub received: u64,
    #[serde(default)]
    pub transmitted: u64,
}

/// One entry of a host's history buffer
///
/// Same shape as [`HostStatus`] minus identity fields and nested history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub cpu: Cpu,
    #[serde(default)]
    pub ram: MemoryUsage,
    #[serde(default)]
    pub swap: Option<MemoryUsage>,
    #[serde(default)]
    pub storages: Vec<Storage>,
    #[serde(default, alias = "gpu", deserialize_with = "gpu_list")]
    pub gpus: Vec<Gpu>,
    #[serde(default)]
    pub uptime: u64,
}

/// Latest full snapshot of one monitored machine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostStatus {
    pub hostname: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "_os", default)]
    pub os: String,
    #[serde(default)]
    pub cpu: Cpu,
    #[serde(default)]
    pub ram: MemoryUsage,
    #[serde(default)]
    pub swap: Option<MemoryUsage>,
    #[serde(default)]
    pub storages: Vec<Storage>,
    #[serde(default, alias = "gpu", deserialize_with = "gpu_list")]
    pub gpus: Vec<Gpu>,
    /// 1, 5 and 15 minute load averages
    #[serde(default)]
    pub loadavg: Option<[f64; 3]>,
    #[serde(default, deserialize_with = "network_map")]
    pub networks: Option<BTreeMap<String, NetworkInterface>>,
    #[serde(default)]
    pub uptime: u64,
    #[serde(default)]
    pub index: u32,
    /// Oldest first; the producer decides the length
    #[serde(default)]
    pub histories: Vec<HistoryEntry>,
}

/// Toast payload pushed by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastData {
    pub message: String,
    #[serde(default)]
    pub color: String,
    /// Display duration in milliseconds (0 = default)
    #[serde(default)]
    pub toast_time: u64,
}

/// Older agents report a single optional `gpu`; newer ones a `gpus` list.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Gpu>),
    One(Gpu),
}

fn gpu_list<'de, D>(deserializer: D) -> Result<Vec<Gpu>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(gpus)) => gpus,
        Some(OneOrMany::One(gpu)) => vec![gpu],
    })
}

/// Accepts either `{ "eth0": {...} }` or `[{ "name": "eth0", ... }]`.
fn network_map<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, NetworkInterface>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct NetworkVisitor;

    impl<'de> Visitor<'de> for NetworkVisitor {
        type Value = Option<BTreeMap<String, NetworkInterface>>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map or list of network interfaces")
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut out = BTreeMap::new();
            while let Some((key, mut iface)) = map.next_entry::<String, NetworkInterface>()? {
                if iface.name.is_empty() {
                    iface.name = key.clone();
                }
                out.insert(key, iface);
            }
            Ok(Some(out))
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut out = BTreeMap::new();
            let mut position = 0usize;
            while let Some(iface) = seq.next_element::<NetworkInterface>()? {
                let key = if iface.name.is_empty() {
                    format!("if{}", position)
                } else {
                    iface.name.clone()
                };
                out.insert(key, iface);
                position += 1;
            }
            Ok(Some(out))
        }
    }

    deserializer.deserialize_option(NetworkVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HOST: &str = r#"{
        "hostname": "desk-01",
        "version": "Rust client 1.2.0",
        "_os": "Ubuntu 22.04",
        "cpu": { "model": "AMD Ryzen 7", "cpus": [{ "cpu": 12.5 }, { "cpu": 40.0 }] },
        "ram": { "free": 4096, "total": 16384 },
        "swap": { "free": 1024, "total": 2048 },
        "storages": [{ "name": "/dev/sda1", "free": 100, "total": 500 }],
        "gpus": [{ "name": "RTX 3060", "usage": 33.0, "memory": { "free": 2, "total": 12 } }],
        "loadavg": [0.5, 0.7, 0.9],
        "networks": { "eth0": { "name": "eth0", "received": 10, "transmitted": 20 } },
        "uptime": 3600,
        "index": 0,
        "histories": [
            { "cpu": { "model": "AMD Ryzen 7", "cpus": [{ "cpu": 10.0 }] },
              "ram": { "free": 4096, "total": 16384 },
              "swap": { "free": 1024, "total": 2048 },
              "storages": [],
              "gpu": null,
              "uptime": 3595 }
        ]
    }"#;

    #[test]
    fn test_full_host_deserialize() {
        let host: HostStatus = serde_json::from_str(FULL_HOST).unwrap();
        assert_eq!(host.hostname, "desk-01");
        assert_eq!(host.os, "Ubuntu 22.04");
        assert_eq!(host.cpu.cpus.len(), 2);
        assert_eq!(host.swap, Some(MemoryUsage { free: 1024, total: 2048 }));
        assert_eq!(host.gpus.len(), 1);
        assert_eq!(host.loadavg, Some([0.5, 0.7, 0.9]));
        assert_eq!(host.networks.as_ref().unwrap()["eth0"].transmitted, 20);
        assert_eq!(host.histories.len(), 1);
        assert!(host.histories[0].gpus.is_empty());
    }

    #[test]
    fn test_minimal_host_has_no_optional_parts() {
        let json = r#"{ "hostname": "pi", "cpu": { "model": "ARM", "cpus": [] },
                        "ram": { "free": 1, "total": 2 } }"#;
        let host: HostStatus = serde_json::from_str(json).unwrap();
        assert!(host.swap.is_none());
        assert!(host.gpus.is_empty());
        assert!(host.loadavg.is_none());
        assert!(host.networks.is_none());
        assert!(host.storages.is_empty());
        assert!(host.histories.is_empty());
    }

    #[test]
    fn test_single_gpu_becomes_list_of_one() {
        let json = r#"{ "hostname": "legacy", "gpu": { "name": "GTX 1080", "usage": 5.0,
                        "memory": { "free": 1, "total": 8 } } }"#;
        let host: HostStatus = serde_json::from_str(json).unwrap();
        assert_eq!(host.gpus.len(), 1);
        assert_eq!(host.gpus[0].name, "GTX 1080");
    }

    #[test]
    fn test_network_list_is_keyed_by_name() {
        let json = r#"{ "hostname": "h", "networks": [
            { "name": "wlan0", "received": 1, "transmitted": 2 },
            { "received": 3, "transmitted": 4 } ] }"#;
        let host: HostStatus = serde_json::from_str(json).unwrap();
        let networks = host.networks.unwrap();
        assert_eq!(networks["wlan0"].received, 1);
        assert_eq!(networks["if1"].transmitted, 4);
    }

    #[test]
    fn test_network_map_fills_missing_name() {
        let json = r#"{ "hostname": "h", "networks": { "eth1": { "received": 7 } } }"#;
        let host: HostStatus = serde_json::from_str(json).unwrap();
        assert_eq!(host.networks.unwrap()["eth1"].name, "eth1");
    }

    #[test]
    fn test_server_only_fields_are_ignored() {
        let json = r#"{ "hostname": "h", "pass": null, "dev": false }"#;
        let host: HostStatus = serde_json::from_str(json).unwrap();
        assert_eq!(host.hostname, "h");
    }

    #[test]
    fn test_memory_used_saturates() {
        let bogus = MemoryUsage { free: 10, total: 5 };
        assert_eq!(bogus.used(), 0);
    }
}
