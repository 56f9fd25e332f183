//! PC Status CLI
//!
//! Terminal client for the push server:
//! - Watch live host status
//! - Export a host's focus charts as SVG
//! - Print the default config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pc_status::chart::{draw_chart, SvgSurface};
use pc_status::config::{generate_default_config, Config, LoggingConfig};
use pc_status::format::format_uptime;
use pc_status::live::{ConnectionManager, LiveClient, LiveState};
use pc_status::protocol::HostStatus;
use pc_status::view::{visible_hosts, FocusView, HostSummary};

#[derive(Parser)]
#[command(name = "pc-status")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live status of your machines, from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Push endpoint, overrides config and PC_STATUS_WS_URL
    #[arg(long, global = true)]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print host summaries on every status update
    Watch,

    /// Write a host's focus charts as SVG files
    Render {
        /// Host id or hostname
        #[arg(long)]
        host: String,
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
        /// Chart width in px (default: config)
        #[arg(short, long)]
        width: Option<f64>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging);

    tracing::info!("PC Status v{}", env!("CARGO_PKG_VERSION"));

    let manager = ConnectionManager::new(
        config.connection.endpoint(cli.url.as_deref()),
        config.connection.reconnect_policy(),
    );
    let client = LiveClient::spawn(manager);

    let result = match cli.command {
        Commands::Watch => watch_status(client.subscribe()).await,
        Commands::Render { host, out, width } => {
            let width = width.unwrap_or(config.chart.width);
            render_host(client.subscribe(), &config, &host, &out, width).await
        }
        Commands::Config { .. } => Ok(()),
    };

    tracing::info!("Shutting down...");
    client.shutdown().await;
    result
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pc_status={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn write_default_config(output: Option<&Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

async fn watch_status(mut updates: watch::Receiver<LiveState>) -> anyhow::Result<()> {
    let mut previous = updates.borrow_and_update().clone();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => return Ok(()),
            changed = updates.changed() => {
                if changed.is_err() {
                    bail!("Live connection task ended");
                }
            }
        }

        let state = updates.borrow_and_update().clone();
        report_transition(&previous, &state);

        if state.terminal {
            bail!(
                "{}",
                state.error.as_deref().unwrap_or("Connection failed permanently")
            );
        }
        previous = state;
    }
}

fn report_transition(previous: &LiveState, state: &LiveState) {
    if state.connected != previous.connected {
        if state.connected {
            tracing::info!("Connected");
        } else {
            tracing::warn!("Disconnected");
        }
    }

    if state.error != previous.error {
        if let Some(error) = &state.error {
            tracing::warn!("{}", error);
        }
    }

    if state.toast != previous.toast {
        if let Some(toast) = &state.toast {
            tracing::info!(severity = ?toast.severity, "{}", toast.message);
        }
    }

    if state.last_update != previous.last_update {
        if let Some(status) = &state.status {
            println!("--- {} host(s) ---", status.len());
            for (id, host) in visible_hosts(status, "") {
                println!("{}", summary_line(&HostSummary::new(id, host), host));
            }
        }
    }
}

fn summary_line(summary: &HostSummary, host: &HostStatus) -> String {
    format!(
        "{:<20} {:<28} cpu {:>5.1}%  ram {:>5.1}%  disk {:>5.1}%  {}  up {}",
        summary.hostname,
        summary.os,
        summary.cpu,
        summary.ram,
        summary.storage,
        summary.gpu_caption(),
        format_uptime(host.uptime)
    )
}

async fn render_host(
    mut updates: watch::Receiver<LiveState>,
    config: &Config,
    wanted: &str,
    out: &Path,
    width: f64,
) -> anyhow::Result<()> {
    tracing::info!("Waiting for status of {}", wanted);

    let host = loop {
        {
            let state = updates.borrow_and_update();
            if let Some(host) = state.status.as_ref().and_then(|s| find_host(s, wanted)) {
                break host.clone();
            }
            if state.terminal {
                bail!(
                    "{}",
                    state.error.as_deref().unwrap_or("Connection failed permanently")
                );
            }
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => bail!("Interrupted"),
            changed = updates.changed() => {
                if changed.is_err() {
                    bail!("Live connection task ended");
                }
            }
        }
    };

    let Some(stem) = file_stem(&host.hostname) else {
        bail!("Hostname {:?} cannot be used as a file name", host.hostname);
    };

    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory {:?}", out))?;

    let view = FocusView::new(&host);
    for (name, spec) in view.charts.named() {
        let spec = spec
            .clone()
            .height(config.chart.height)
            .padding(config.chart.padding);

        let mut svg = SvgSurface::new();
        draw_chart(&mut svg, &spec, width);

        let path = out.join(format!("{}-{}.svg", stem, name));
        svg.write_to(&path)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn find_host<'a>(status: &'a pc_status::StatusMap, wanted: &str) -> Option<&'a HostStatus> {
    status.get(wanted).or_else(|| status.values().find(|h| h.hostname == wanted))
}

/// Hostname reduced to `[A-Za-z0-9._-]` so it stays a single path component
fn file_stem(hostname: &str) -> Option<String> {
    let stem: String = hostname
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    match stem.as_str() {
        "" | "." | ".." => None,
        _ => Some(stem),
    }
}
