//! Host summary card

use crate::format::{cpu_percentage, percentage, select_icon};
use crate::protocol::HostStatus;

/// Figures shown on a host's card in the grid
#[derive(Debug, Clone, PartialEq)]
pub struct HostSummary {
    pub id: String,
    pub hostname: String,
    pub version: String,
    pub os: String,
    pub icon: String,
    pub cpu: f64,
    pub ram: f64,
    /// First storage; 0 when the host reports none
    pub storage: f64,
    pub gpus: Vec<String>,
}

impl HostSummary {
    pub fn new(id: &str, host: &HostStatus) -> Self {
        Self {
            id: id.to_string(),
            hostname: host.hostname.clone(),
            version: host.version.clone(),
            os: host.os.clone(),
            icon: select_icon(&host.os),
            cpu: cpu_percentage(&host.cpu.cpus),
            ram: percentage(host.ram.free, host.ram.total),
            storage: host
                .storages
                .first()
                .map(|s| percentage(s.free, s.total))
                .unwrap_or(0.0),
            gpus: host.gpus.iter().map(|g| g.name.clone()).collect(),
        }
    }

    /// `No GPU detected`, `1 GPU`, `2 GPUs`, ...
    pub fn gpu_caption(&self) -> String {
        match self.gpus.len() {
            0 => "No GPU detected".to_string(),
            1 => "1 GPU".to_string(),
            n => format!("{} GPUs", n),
        }
    }
}
