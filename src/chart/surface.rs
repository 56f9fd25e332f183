//! Drawing surface abstraction
//!
//! The renderer only needs a handful of primitives. Each backend (canvas,
//! SVG, recorded display list) implements them in its own terms.

/// A point in surface pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Horizontal anchoring of text relative to its position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Canvas `textAlign` value
    pub fn as_canvas(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }

    /// SVG `text-anchor` value
    pub fn as_svg_anchor(&self) -> &'static str {
        match self {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        }
    }
}

/// How a piece of text is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font size in px (sans-serif)
    pub size: f64,
    pub color: String,
    pub align: TextAlign,
    /// Rotation around the anchor point, radians
    pub rotation: f64,
}

impl TextStyle {
    pub fn new(size: f64, color: &str) -> Self {
        Self {
            size,
            color: color.to_string(),
            align: TextAlign::Left,
            rotation: 0.0,
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn rotate(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }

    /// CSS font shorthand
    pub fn font(&self) -> String {
        format!("{}px sans-serif", self.size)
    }
}

/// Something a chart can be drawn on
pub trait Surface {
    /// Size the surface and clear it to transparent
    fn resize(&mut self, width: f64, height: f64);

    /// Connected line through `points`
    fn stroke_polyline(&mut self, points: &[Point], color: &str, line_width: f64);

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str);

    fn fill_rect(&mut self, rect: Rect, color: &str);

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);

    /// Rendered width of `text`; backends without font metrics approximate
    fn measure_text(&mut self, text: &str, size: f64) -> f64 {
        approximate_text_width(text, size)
    }
}

/// Average glyph width of a sans-serif face
pub fn approximate_text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.6
}
