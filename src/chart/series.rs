//! Chart inputs

use super::layout::PADDING;

/// One line on a chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
    /// Any CSS colour
    pub color: String,
}

impl ChartSeries {
    pub fn new(label: impl Into<String>, color: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            color: color.into(),
        }
    }
}

/// Everything needed to draw a chart except the container width
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// The first series sets the x domain; extra samples of later series are
    /// not drawn, shorter ones stop early
    pub series: Vec<ChartSeries>,
    pub value_min: f64,
    pub value_max: f64,
    /// Fixed width; `None` follows the container
    pub width: Option<f64>,
    pub height: f64,
    pub padding: f64,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            value_min: 0.0,
            value_max: 100.0,
            width: None,
            height: 300.0,
            padding: PADDING,
            title: None,
            x_label: None,
            y_label: None,
        }
    }
}

impl ChartSpec {
    pub fn new(series: Vec<ChartSeries>) -> Self {
        Self {
            series,
            ..Default::default()
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.value_min = min;
        self.value_max = max;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    /// Width actually drawn at for a given container width
    pub fn effective_width(&self, container_width: f64) -> f64 {
        self.width.unwrap_or(container_width).max(0.0)
    }
}

/// CSS `hsl()` colour string
pub fn hsl(hue: f64, saturation: u8, lightness: u8) -> String {
    format!("hsl({}, {}%, {}%)", hue, saturation, lightness)
}
