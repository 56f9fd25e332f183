//! Plot geometry and palette

/// Inset on every side of the plot area (px)
pub const PADDING: f64 = 60.0;
/// Number of horizontal bands; gridlines sit at 0..=GRID_LINES
pub const GRID_LINES: usize = 5;

pub const GRID_COLOR: &str = "#374151";
pub const AXIS_COLOR: &str = "#6b7280";
pub const TITLE_COLOR: &str = "#f9fafb";
pub const LABEL_COLOR: &str = "#d1d5db";
pub const TICK_COLOR: &str = "#9ca3af";
pub const LEGEND_TEXT_COLOR: &str = "#f9fafb";

pub const TITLE_SIZE: f64 = 16.0;
pub const LABEL_SIZE: f64 = 12.0;
pub const TICK_SIZE: f64 = 10.0;

pub const GRID_WIDTH: f64 = 1.0;
pub const AXIS_WIDTH: f64 = 2.0;
pub const SERIES_WIDTH: f64 = 2.0;
pub const MARKER_RADIUS: f64 = 3.0;

pub const LEGEND_OFFSET: f64 = 30.0;
pub const LEGEND_SWATCH: f64 = 12.0;
pub const LEGEND_LABEL_GAP: f64 = 20.0;
pub const LEGEND_SPACING: f64 = 50.0;

/// The padded region series are drawn into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Plot area of a `width` x `height` surface; never negative
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            x: padding,
            y: padding,
            width: (width - padding * 2.0).max(0.0),
            height: (height - padding * 2.0).max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// y of the i-th gridline from the top
    pub fn gridline_y(&self, i: usize) -> f64 {
        self.y + self.height / GRID_LINES as f64 * i as f64
    }

    /// x of sample `index` in a domain of `len` samples
    pub fn x_at(&self, index: usize, len: usize) -> f64 {
        if len <= 1 {
            return self.x;
        }
        self.x + self.width * index as f64 / (len - 1) as f64
    }

    /// y of `value`, clamped into `[min, max]`
    pub fn y_for(&self, value: f64, min: f64, max: f64) -> f64 {
        let range = max - min;
        if range.is_nan() || range <= 0.0 {
            return self.bottom();
        }
        let clamped = value.max(min).min(max);
        self.bottom() - (clamped - min) / range * self.height
    }
}

/// Value printed beside the i-th gridline
pub fn tick_value(i: usize, min: f64, max: f64) -> f64 {
    max - (max - min) / GRID_LINES as f64 * i as f64
}
