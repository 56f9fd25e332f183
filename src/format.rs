//! Display helpers
//!
//! Pure conversions used by every view: usage percentages, byte sizes,
//! uptime strings and OS icons.

use regex::Regex;
use std::sync::OnceLock;

use crate::protocol::CpuCore;

/// Used share of a resource as a percentage, one decimal
///
/// A zero `total` yields 0 rather than NaN.
pub fn percentage(free: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let used = total.saturating_sub(free) as f64;
    round1(used / total as f64 * 100.0)
}

/// Mean usage across cores, one decimal; no cores yields 0
pub fn cpu_percentage(cores: &[CpuCore]) -> f64 {
    if cores.is_empty() {
        return 0.0;
    }
    let sum: f64 = cores.iter().map(|c| c.cpu).sum();
    round1(sum / cores.len() as f64)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Human readable byte size in binary units
pub fn byte_to_data(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", value, UNITS[unit])
}

/// Uptime as `1d 2h 3m 4s`, omitting zero units
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = secs % 86_400 / 3_600;
    let minutes = secs % 3_600 / 60;
    let seconds = secs % 60;

    let mut parts = Vec::with_capacity(4);
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{}s", seconds));
    }

    parts.join(" ")
}

/// Checked in order, first match wins
const OS_ICONS: [(&str, &str); 8] = [
    ("Windows", "windows"),
    ("Debian", "debian"),
    ("Raspbian", "raspbian"),
    ("Ubuntu", "ubuntu"),
    ("Arch", "arch"),
    ("Fedora", "fedora"),
    ("Darwin", "apple"),
    ("Distroless", "docker"),
];

const DEFAULT_ICON: &str = "linux";

fn icon_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        OS_ICONS
            .iter()
            .filter_map(|(pattern, icon)| Regex::new(pattern).ok().map(|re| (re, *icon)))
            .collect()
    })
}

/// Icon path for an OS description
pub fn select_icon(os: &str) -> String {
    let icon = icon_patterns()
        .iter()
        .find(|(re, _)| re.is_match(os))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON);

    tracing::trace!(os, icon, "Selected OS icon");
    format!("/icon/os/{}.svg", icon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(25, 100), 75.0);
        assert_eq!(percentage(0, 3), 100.0);
        assert_eq!(percentage(1, 3), 66.7);
        assert_eq!(percentage(10, 0), 0.0);
        // free larger than total never goes negative
        assert_eq!(percentage(200, 100), 0.0);
    }

    #[test]
    fn test_cpu_percentage() {
        let cores = [CpuCore { cpu: 10.0 }, CpuCore { cpu: 25.5 }, CpuCore { cpu: 3.0 }];
        assert_eq!(cpu_percentage(&cores), 12.8);
        assert_eq!(cpu_percentage(&[]), 0.0);
    }

    #[test]
    fn test_byte_to_data() {
        assert_eq!(byte_to_data(0), "0 B");
        assert_eq!(byte_to_data(512), "512.00 B");
        assert_eq!(byte_to_data(1024), "1.00 KiB");
        assert_eq!(byte_to_data(1536), "1.50 KiB");
        assert_eq!(byte_to_data(8 * 1024 * 1024 * 1024), "8.00 GiB");
        assert_eq!(byte_to_data(u64::MAX), "16384.00 PiB");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0s");
        assert_eq!(format_uptime(59), "59s");
        assert_eq!(format_uptime(60), "1m");
        assert_eq!(format_uptime(3600), "1h");
        assert_eq!(format_uptime(3661), "1h 1m 1s");
        assert_eq!(format_uptime(86_400), "1d");
        assert_eq!(format_uptime(90_061), "1d 1h 1m 1s");
    }

    #[test]
    fn test_select_icon() {
        assert_eq!(select_icon("Windows 11 Pro"), "/icon/os/windows.svg");
        assert_eq!(select_icon("Ubuntu 22.04.3 LTS"), "/icon/os/ubuntu.svg");
        assert_eq!(select_icon("Raspbian GNU/Linux 11"), "/icon/os/raspbian.svg");
        assert_eq!(select_icon("Debian GNU/Linux 12 (bookworm)"), "/icon/os/debian.svg");
        assert_eq!(select_icon("Darwin 23.1.0"), "/icon/os/apple.svg");
        assert_eq!(select_icon("Distroless"), "/icon/os/docker.svg");
        assert_eq!(select_icon("Gentoo"), "/icon/os/linux.svg");
        assert_eq!(select_icon(""), "/icon/os/linux.svg");
    }

    #[test]
    fn test_select_icon_order() {
        // Both names present: the earlier entry wins
        assert_eq!(select_icon("Debian based Ubuntu"), "/icon/os/debian.svg");
        assert_eq!(select_icon("Windows Subsystem Ubuntu"), "/icon/os/windows.svg");
    }
}
