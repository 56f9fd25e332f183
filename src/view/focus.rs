//! Focus view
//!
//! Everything the detailed overlay of one host shows: per-resource rows and
//! the four history charts. Missing parts of a report (no swap, no GPU, short
//! history) produce empty rows or series, never a panic.

use crate::chart::{hsl, ChartSeries, ChartSpec};
use crate::format::{byte_to_data, cpu_percentage, format_uptime, percentage, select_icon};
use crate::protocol::{HistoryEntry, HostStatus};

pub const CHART_HEIGHT: f64 = 250.0;
pub const CHART_MIN: f64 = 0.0;
pub const CHART_MAX: f64 = 100.0;
pub const X_LABEL: &str = "Time";
pub const Y_LABEL: &str = "Usage (%)";

pub const RAM_COLOR: &str = "#10b981";
pub const SWAP_COLOR: &str = "#f59e0b";

/// `used/total | free free`
pub fn usage_line(free: u64, total: u64) -> String {
    format!(
        "{}/{} | {} free",
        byte_to_data(total.saturating_sub(free)),
        byte_to_data(total),
        byte_to_data(free)
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsageRow {
    pub label: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRow {
    pub usage: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageRow {
    pub index: usize,
    pub name: String,
    pub usage: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GpuRow {
    pub name: String,
    pub usage: f64,
    pub vram: String,
    pub vram_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkRow {
    pub name: String,
    pub received: String,
    pub transmitted: String,
}

/// History charts of one host
#[derive(Debug, Clone, PartialEq)]
pub struct FocusCharts {
    pub cpu: ChartSpec,
    pub memory: ChartSpec,
    pub storage: ChartSpec,
    /// Only for hosts with at least one GPU
    pub gpu: Option<ChartSpec>,
}

impl FocusCharts {
    pub fn new(host: &HostStatus) -> Self {
        let history = &host.histories;
        Self {
            cpu: chart("CPU Usage", cpu_series(history)),
            memory: chart("Memory Usage", memory_series(host)),
            storage: chart("Storage Usage", storage_series(history)),
            gpu: (!host.gpus.is_empty()).then(|| chart("GPU Usage", gpu_series(host))),
        }
    }

    /// `(file stem, spec)` pairs in display order
    pub fn named(&self) -> Vec<(&'static str, &ChartSpec)> {
        let mut charts = vec![
            ("cpu", &self.cpu),
            ("memory", &self.memory),
            ("storage", &self.storage),
        ];
        if let Some(gpu) = &self.gpu {
            charts.push(("gpu", gpu));
        }
        charts
    }
}

fn chart(title: &str, series: Vec<ChartSeries>) -> ChartSpec {
    ChartSpec::new(series)
        .range(CHART_MIN, CHART_MAX)
        .height(CHART_HEIGHT)
        .title(title)
        .x_label(X_LABEL)
        .y_label(Y_LABEL)
}

/// One series per core of the oldest history entry
fn cpu_series(history: &[HistoryEntry]) -> Vec<ChartSeries> {
    let cores = history.first().map(|h| h.cpu.cpus.len()).unwrap_or(0);
    (0..cores)
        .map(|i| {
            let values = history
                .iter()
                .map(|h| h.cpu.cpus.get(i).map(|c| c.cpu).unwrap_or(0.0))
                .collect();
            ChartSeries::new(format!("Core{}", i), hsl(60.0 * i as f64, 70, 50), values)
        })
        .collect()
}

fn memory_series(host: &HostStatus) -> Vec<ChartSeries> {
    let history = &host.histories;
    let ram = history
        .iter()
        .map(|h| percentage(h.ram.free, h.ram.total))
        .collect();
    let mut series = vec![ChartSeries::new("RAM", RAM_COLOR, ram)];

    if host.swap.is_some() {
        let swap = history
            .iter()
            .map(|h| h.swap.map(|s| percentage(s.free, s.total)).unwrap_or(0.0))
            .collect();
        series.push(ChartSeries::new("Swap", SWAP_COLOR, swap));
    }
    series
}

/// One series per volume of the oldest history entry
fn storage_series(history: &[HistoryEntry]) -> Vec<ChartSeries> {
    let Some(first) = history.first() else {
        return Vec::new();
    };

    first
        .storages
        .iter()
        .enumerate()
        .map(|(i, storage)| {
            let label = storage
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Storage{}", i));
            let values = history
                .iter()
                .map(|h| {
                    h.storages
                        .get(i)
                        .map(|s| percentage(s.free, s.total))
                        .unwrap_or(0.0)
                })
                .collect();
            ChartSeries::new(label, hsl(120.0 * i as f64, 60, 50), values)
        })
        .collect()
}

/// Usage and memory series for every current GPU
fn gpu_series(host: &HostStatus) -> Vec<ChartSeries> {
    let history = &host.histories;
    host.gpus
        .iter()
        .enumerate()
        .flat_map(|(g, gpu)| {
            let hue = 60.0 * g as f64;
            let usage = history
                .iter()
                .map(|h| h.gpus.get(g).map(|x| x.usage).unwrap_or(0.0))
                .collect();
            let memory = history
                .iter()
                .map(|h| {
                    h.gpus
                        .get(g)
                        .map(|x| percentage(x.memory.free, x.memory.total))
                        .unwrap_or(0.0)
                })
                .collect();
            [
                ChartSeries::new(format!("{} Usage", gpu.name), hsl(hue, 70, 50), usage),
                ChartSeries::new(format!("{} Memory", gpu.name), hsl(hue + 30.0, 70, 60), memory),
            ]
        })
        .collect()
}

/// Detailed overlay of one host
#[derive(Debug, Clone, PartialEq)]
pub struct FocusView {
    pub hostname: String,
    pub os: String,
    pub icon: String,
    pub cpu_model: String,
    pub cpu_total: f64,
    pub cores: Vec<UsageRow>,
    pub ram: MemoryRow,
    pub swap: Option<MemoryRow>,
    pub storages: Vec<StorageRow>,
    pub uptime: String,
    pub uptime_raw: u64,
    pub gpus: Vec<GpuRow>,
    pub loadavg: Option<[f64; 3]>,
    pub networks: Vec<NetworkRow>,
    pub charts: FocusCharts,
}

impl FocusView {
    pub fn new(host: &HostStatus) -> Self {
        let memory_row = |free: u64, total: u64| MemoryRow {
            usage: usage_line(free, total),
            percent: percentage(free, total),
        };

        Self {
            hostname: host.hostname.clone(),
            os: host.os.clone(),
            icon: select_icon(&host.os),
            cpu_model: host.cpu.model.clone(),
            cpu_total: cpu_percentage(&host.cpu.cpus),
            cores: host
                .cpu
                .cpus
                .iter()
                .enumerate()
                .map(|(i, core)| UsageRow {
                    label: format!("Core{}", i),
                    percent: core.cpu,
                })
                .collect(),
            ram: memory_row(host.ram.free, host.ram.total),
            swap: host.swap.map(|s| memory_row(s.free, s.total)),
            storages: host
                .storages
                .iter()
                .enumerate()
                .map(|(index, s)| StorageRow {
                    index,
                    name: s
                        .name
                        .clone()
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| "Unknown Name".to_string()),
                    usage: usage_line(s.free, s.total),
                    percent: percentage(s.free, s.total),
                })
                .collect(),
            uptime: format_uptime(host.uptime),
            uptime_raw: host.uptime,
            gpus: host
                .gpus
                .iter()
                .map(|g| GpuRow {
                    name: g.name.clone(),
                    usage: g.usage,
                    vram: usage_line(g.memory.free, g.memory.total),
                    vram_percent: percentage(g.memory.free, g.memory.total),
                })
                .collect(),
            loadavg: host.loadavg,
            networks: host
                .networks
                .iter()
                .flatten()
                .map(|(key, net)| NetworkRow {
                    name: if net.name.is_empty() {
                        key.clone()
                    } else {
                        net.name.clone()
                    },
                    received: byte_to_data(net.received),
                    transmitted: byte_to_data(net.transmitted),
                })
                .collect(),
            charts: FocusCharts::new(host),
        }
    }
}
