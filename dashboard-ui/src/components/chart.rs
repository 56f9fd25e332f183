//! Chart Component
//!
//! Line chart drawn on an HTML5 Canvas by the shared renderer.

use leptos::*;
use pc_status::chart::{draw_chart, ChartSpec, Point, Rect, Surface, TextStyle};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Canvas 2D backend for the chart renderer
struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = match canvas.get_context("2d") {
            Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok()?,
            _ => return None,
        };
        Some(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: f64, height: f64) {
        // Setting the size also clears the bitmap
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn stroke_polyline(&mut self, points: &[Point], color: &str, line_width: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.set_stroke_style(&color.into());
        self.ctx.set_line_width(line_width);
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
        self.ctx.set_fill_style(&color.into());
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::PI * 2.0);
        self.ctx.fill();
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style(&color.into());
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.ctx.set_fill_style(&style.color.as_str().into());
        self.ctx.set_font(&style.font());
        self.ctx.set_text_align(style.align.as_canvas());

        if style.rotation == 0.0 {
            let _ = self.ctx.fill_text(text, at.x, at.y);
            return;
        }

        self.ctx.save();
        let _ = self.ctx.translate(at.x, at.y);
        let _ = self.ctx.rotate(style.rotation);
        let _ = self.ctx.fill_text(text, 0.0, 0.0);
        self.ctx.restore();
    }

    fn measure_text(&mut self, text: &str, size: f64) -> f64 {
        self.ctx.set_font(&format!("{}px sans-serif", size));
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or_else(|_| pc_status::chart::approximate_text_width(text, size))
    }
}

/// Chart that follows the width of its container
#[component]
pub fn Chart(#[prop(into)] spec: Signal<ChartSpec>) -> impl IntoView {
    let container_ref = create_node_ref::<html::Div>();
    let canvas_ref = create_node_ref::<html::Canvas>();
    let container_width = create_rw_signal(0.0_f64);

    let measure = move || {
        if let Some(div) = container_ref.get_untracked() {
            let width = div.client_width() as f64;
            if container_width.get_untracked() != width {
                container_width.set(width);
            }
        }
    };

    container_ref.on_load(move |_| measure());
    let resize = window_event_listener(ev::resize, move |_| measure());
    on_cleanup(move || resize.remove());

    // Redraw when the data or the available width changes
    create_effect(move |_| {
        let width = container_width.get();
        spec.with(|spec| {
            if let Some(canvas) = canvas_ref.get() {
                let canvas: HtmlCanvasElement = (*canvas).clone();
                if let Some(mut surface) = CanvasSurface::new(canvas) {
                    draw_chart(&mut surface, spec, width);
                }
            }
        });
    });

    view! {
        <div node_ref=container_ref class="w-full">
            <canvas node_ref=canvas_ref class="block rounded-lg" />
        </div>
    }
}
