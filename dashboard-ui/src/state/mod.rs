//! State Management
//!
//! Explicitly owned application context and the browser driver of the live
//! connection.

pub mod context;
pub mod live;

pub use context::{provide_app_context, use_app_context, AppContext};
pub use live::LiveLink;
