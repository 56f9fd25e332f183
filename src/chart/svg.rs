//! SVG export backend

use std::fmt::Write as _;
use std::path::Path;

use super::error::{RenderError, RenderResult};
use super::surface::{Point, Rect, Surface, TextStyle};

/// Builds a standalone SVG document
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete document
    pub fn finish(&self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">
{body}</svg>
"#,
            w = self.width,
            h = self.height,
            body = self.body
        )
    }

    /// Write the document to `path`
    pub fn write_to(&self, path: &Path) -> RenderResult<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(RenderError::Empty {
                width: self.width,
                height: self.height,
            });
        }
        std::fs::write(path, self.finish()).map_err(|error| RenderError::Write {
            path: path.to_path_buf(),
            error,
        })
    }
}

impl Surface for SvgSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.body.clear();
    }

    fn stroke_polyline(&mut self, points: &[Point], color: &str, line_width: f64) {
        let coords: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
        let _ = writeln!(
            self.body,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            coords.join(" "),
            escape(color),
            line_width
        );
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            center.x,
            center.y,
            radius,
            escape(color)
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            escape(color)
        );
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let transform = if style.rotation != 0.0 {
            format!(
                r#" transform="rotate({} {} {})""#,
                (style.rotation.to_degrees() * 1000.0).round() / 1000.0,
                at.x,
                at.y
            )
        } else {
            String::new()
        };
        let _ = writeln!(
            self.body,
            r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{}"{}>{}</text>"#,
            at.x,
            at.y,
            style.size,
            escape(&style.color),
            style.align.as_svg_anchor(),
            transform,
            escape(text)
        );
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
