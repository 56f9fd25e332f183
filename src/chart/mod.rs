//! Chart Renderer
//!
//! Dependency-free line charts: fixed padding, a five-band grid, clamped
//! values on a fixed range, markers per sample and a legend for
//! multi-series charts. Rendering goes through the [`Surface`] trait so the
//! same code draws on a browser canvas, into an SVG file, or into a
//! [`DisplayList`] for inspection.

mod display;
mod error;
mod layout;
mod render;
mod series;
mod surface;
mod svg;

pub use display::{DisplayList, DrawOp};
pub use error::{RenderError, RenderResult};
pub use layout::{tick_value, PlotArea, GRID_LINES, PADDING};
pub use render::draw_chart;
pub use series::{hsl, ChartSeries, ChartSpec};
pub use surface::{approximate_text_width, Point, Rect, Surface, TextAlign, TextStyle};
pub use svg::SvgSurface;
