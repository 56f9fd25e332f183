//! UI Components
//!
//! Leptos components for the dashboard.

pub mod chart;
pub mod focus;
pub mod loading;
pub mod nav;
pub mod progress;
pub mod status_card;
pub mod toast;

pub use focus::FocusOverlay;
pub use loading::GateScreen;
pub use nav::Nav;
pub use status_card::StatusCard;
pub use toast::Toast;
