//! Chart export error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting a rendered chart
#[derive(Error, Debug)]
pub enum RenderError {
    /// Writing the output file failed
    #[error("Failed to write chart {path:?}: {error}")]
    Write {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Nothing to export (zero-sized chart)
    #[error("Chart has no drawable area ({width}x{height})")]
    Empty { width: f64, height: f64 },
}

/// Result type alias for chart export
pub type RenderResult<T> = Result<T, RenderError>;
