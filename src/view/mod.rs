//! View models
//!
//! Pure projections of the snapshot store into what the dashboard shows.
//! Both the browser UI and the native binary build their output from these.

mod dashboard;
mod focus;
mod screen;
mod summary;

pub use dashboard::{visible_hosts, DashboardState, Theme};
pub use focus::{
    usage_line, FocusCharts, FocusView, GpuRow, MemoryRow, NetworkRow, StorageRow, UsageRow,
    CHART_HEIGHT, RAM_COLOR, SWAP_COLOR,
};
pub use screen::Screen;
pub use summary::HostSummary;
