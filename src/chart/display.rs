//! Recorded drawing operations
//!
//! A [`Surface`] that remembers what was drawn instead of rasterising it.

use super::surface::{Point, Rect, Surface, TextStyle};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { width: f64, height: f64 },
    Polyline { points: Vec<Point>, color: String, line_width: f64 },
    Circle { center: Point, radius: f64, color: String },
    Rect { rect: Rect, color: String },
    Text { text: String, at: Point, style: TextStyle },
}

#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polylines stroked in `color`
    pub fn polylines(&self, color: &str) -> Vec<&[Point]> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Polyline { points, color: c, .. } if c == color => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Centres of the markers filled in `color`
    pub fn markers(&self, color: &str) -> Vec<Point> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle { center, color: c, .. } if c == color => Some(*center),
                _ => None,
            })
            .collect()
    }

    pub fn rects(&self) -> Vec<(Rect, &str)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { rect, color } => Some((*rect, color.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<(&str, Point, &TextStyle)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, at, style } => Some((text.as_str(), *at, style)),
                _ => None,
            })
            .collect()
    }

    pub fn find_text(&self, text: &str) -> Option<(Point, &TextStyle)> {
        self.texts()
            .into_iter()
            .find(|(t, _, _)| *t == text)
            .map(|(_, at, style)| (at, style))
    }
}

impl Surface for DisplayList {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.ops.clear();
        self.ops.push(DrawOp::Clear { width, height });
    }

    fn stroke_polyline(&mut self, points: &[Point], color: &str, line_width: f64) {
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            color: color.to_string(),
            line_width,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ops.push(DrawOp::Rect {
            rect,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
    }
}
