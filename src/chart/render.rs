//! Chart drawing
//!
//! A redraw is a pure function of the [`ChartSpec`] and the container width:
//! the surface is resized (which clears it) and everything is drawn again.

use std::f64::consts::FRAC_PI_2;

use super::layout::*;
use super::series::ChartSpec;
use super::surface::{Point, Rect, Surface, TextAlign, TextStyle};

/// Draw `spec` onto `surface`
pub fn draw_chart<S: Surface + ?Sized>(surface: &mut S, spec: &ChartSpec, container_width: f64) {
    let width = spec.effective_width(container_width);
    let height = spec.height.max(0.0);
    surface.resize(width, height);

    let area = PlotArea::new(width, height, spec.padding);

    draw_frame(surface, &area);
    draw_labels(surface, spec, width, height);
    draw_ticks(surface, spec, &area);
    draw_series(surface, spec, &area);

    if spec.series.len() > 1 {
        draw_legend(surface, spec, &area);
    }
}

fn draw_frame<S: Surface + ?Sized>(surface: &mut S, area: &PlotArea) {
    for i in 0..=GRID_LINES {
        let y = area.gridline_y(i);
        surface.stroke_polyline(
            &[Point::new(area.x, y), Point::new(area.right(), y)],
            GRID_COLOR,
            GRID_WIDTH,
        );
    }

    // L-shaped: left then bottom
    surface.stroke_polyline(
        &[
            Point::new(area.x, area.y),
            Point::new(area.x, area.bottom()),
            Point::new(area.right(), area.bottom()),
        ],
        AXIS_COLOR,
        AXIS_WIDTH,
    );
}

fn draw_labels<S: Surface + ?Sized>(surface: &mut S, spec: &ChartSpec, width: f64, height: f64) {
    if let Some(title) = &spec.title {
        let style = TextStyle::new(TITLE_SIZE, TITLE_COLOR).align(TextAlign::Center);
        surface.fill_text(title, Point::new(width / 2.0, 25.0), &style);
    }

    if let Some(label) = &spec.y_label {
        let style = TextStyle::new(LABEL_SIZE, LABEL_COLOR)
            .align(TextAlign::Center)
            .rotate(-FRAC_PI_2);
        surface.fill_text(label, Point::new(15.0, height / 2.0), &style);
    }

    if let Some(label) = &spec.x_label {
        let style = TextStyle::new(LABEL_SIZE, LABEL_COLOR).align(TextAlign::Center);
        surface.fill_text(label, Point::new(width / 2.0, height - 10.0), &style);
    }
}

fn draw_ticks<S: Surface + ?Sized>(surface: &mut S, spec: &ChartSpec, area: &PlotArea) {
    let style = TextStyle::new(TICK_SIZE, TICK_COLOR).align(TextAlign::Right);
    for i in 0..=GRID_LINES {
        let value = tick_value(i, spec.value_min, spec.value_max);
        let at = Point::new(area.x - 10.0, area.gridline_y(i) + 3.0);
        surface.fill_text(&format!("{:.0}", value), at, &style);
    }
}

fn draw_series<S: Surface + ?Sized>(surface: &mut S, spec: &ChartSpec, area: &PlotArea) {
    // The first series defines the x domain; longer series are cut to it
    let len = match spec.series.first() {
        Some(first) if !first.values.is_empty() => first.values.len(),
        _ => return,
    };

    for series in &spec.series {
        let points: Vec<Point> = series
            .values
            .iter()
            .take(len)
            .enumerate()
            .map(|(i, &v)| {
                Point::new(
                    area.x_at(i, len),
                    area.y_for(v, spec.value_min, spec.value_max),
                )
            })
            .collect();

        if points.len() > 1 {
            surface.stroke_polyline(&points, &series.color, SERIES_WIDTH);
        }
        for point in points {
            surface.fill_circle(point, MARKER_RADIUS, &series.color);
        }
    }
}

fn draw_legend<S: Surface + ?Sized>(surface: &mut S, spec: &ChartSpec, area: &PlotArea) {
    let y = area.bottom() + LEGEND_OFFSET;
    let style = TextStyle::new(LABEL_SIZE, LEGEND_TEXT_COLOR);
    let mut x = area.x;

    for series in &spec.series {
        surface.fill_rect(
            Rect {
                x,
                y,
                width: LEGEND_SWATCH,
                height: LEGEND_SWATCH,
            },
            &series.color,
        );
        surface.fill_text(&series.label, Point::new(x + LEGEND_LABEL_GAP, y + 9.0), &style);
        x += surface.measure_text(&series.label, LABEL_SIZE) + LEGEND_SPACING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::display::{DisplayList, DrawOp};
    use crate::chart::series::ChartSeries;
    use crate::chart::surface::approximate_text_width;

    const RED: &str = "#ff0000";
    const BLUE: &str = "#0000ff";

    fn render(spec: &ChartSpec) -> DisplayList {
        let mut list = DisplayList::new();
        draw_chart(&mut list, spec, 800.0);
        list
    }

    fn spec(series: Vec<ChartSeries>) -> ChartSpec {
        ChartSpec::new(series).height(250.0)
    }

    #[test]
    fn test_redraw_starts_with_clear() {
        let list = render(&spec(vec![]));
        assert_eq!(
            list.ops.first(),
            Some(&DrawOp::Clear {
                width: 800.0,
                height: 250.0
            })
        );
    }

    #[test]
    fn test_grid_and_axes() {
        let list = render(&spec(vec![]));
        let grid = list.polylines(GRID_COLOR);
        assert_eq!(grid.len(), GRID_LINES + 1);
        assert_eq!(grid[0], &[Point::new(60.0, 60.0), Point::new(740.0, 60.0)]);

        let axes = list.polylines(AXIS_COLOR);
        assert_eq!(axes.len(), 1);
        assert_eq!(
            axes[0],
            &[
                Point::new(60.0, 60.0),
                Point::new(60.0, 190.0),
                Point::new(740.0, 190.0)
            ]
        );
    }

    #[test]
    fn test_min_and_max_hit_plot_edges() {
        for len in [2usize, 3, 7, 10] {
            let mut values = vec![50.0; len];
            values[0] = 0.0;
            values[len - 1] = 100.0;
            let list = render(&spec(vec![ChartSeries::new("s", RED, values)]));

            let markers = list.markers(RED);
            assert_eq!(markers.len(), len);
            assert_eq!(markers[0], Point::new(60.0, 190.0));
            assert_eq!(markers[len - 1], Point::new(740.0, 60.0));
        }
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let list = render(&spec(vec![ChartSeries::new("s", RED, vec![-10.0, 0.0, 150.0])]));
        let markers = list.markers(RED);
        assert_eq!(markers[0].y, markers[1].y);
        assert_eq!(markers[2].y, 60.0);
    }

    #[test]
    fn test_single_sample_is_one_marker_without_segment() {
        let list = render(&spec(vec![ChartSeries::new("s", RED, vec![40.0])]));
        assert!(list.polylines(RED).is_empty());
        let markers = list.markers(RED);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].x, 60.0);
        assert!(markers[0].x.is_finite() && markers[0].y.is_finite());
    }

    #[test]
    fn test_empty_first_series_draws_nothing() {
        let list = render(&spec(vec![
            ChartSeries::new("a", RED, vec![]),
            ChartSeries::new("b", BLUE, vec![1.0, 2.0]),
        ]));
        assert!(list.markers(RED).is_empty());
        assert!(list.markers(BLUE).is_empty());
    }

    #[test]
    fn test_longer_series_is_cut_to_first_series_domain() {
        let list = render(&spec(vec![
            ChartSeries::new("a", RED, vec![10.0, 20.0, 30.0]),
            ChartSeries::new("b", BLUE, vec![1.0, 2.0, 3.0, 4.0, 5.0]),
        ]));
        let markers = list.markers(BLUE);
        assert_eq!(markers.len(), 3);
        assert!(markers.iter().all(|p| p.x <= 740.0));
        assert_eq!(markers[2].x, 740.0);
    }

    #[test]
    fn test_degenerate_range_uses_bottom() {
        let list = render(&spec(vec![ChartSeries::new("s", RED, vec![5.0, 20.0])]).range(10.0, 10.0));
        assert!(list.markers(RED).iter().all(|p| p.y == 190.0));
    }

    #[test]
    fn test_legend_only_with_multiple_series() {
        let single = render(&spec(vec![ChartSeries::new("only", RED, vec![1.0])]));
        assert!(single.rects().is_empty());
        assert!(single.find_text("only").is_none());

        let double = render(&spec(vec![
            ChartSeries::new("RAM", RED, vec![1.0]),
            ChartSeries::new("Swap", BLUE, vec![1.0]),
        ]));
        let rects = double.rects();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].0.x, 60.0);
        assert_eq!(rects[0].0.y, 220.0);
        assert_eq!(rects[1].0.x, 60.0 + approximate_text_width("RAM", 12.0) + 50.0);

        let (at, _) = double.find_text("Swap").unwrap();
        assert_eq!(at, Point::new(rects[1].0.x + 20.0, 229.0));
    }

    #[test]
    fn test_labels_and_ticks() {
        let list = render(
            &spec(vec![])
                .title("CPU")
                .x_label("Time")
                .y_label("Usage (%)"),
        );

        let (at, style) = list.find_text("CPU").unwrap();
        assert_eq!(at, Point::new(400.0, 25.0));
        assert_eq!(style.align, TextAlign::Center);

        let (at, style) = list.find_text("Usage (%)").unwrap();
        assert_eq!(at, Point::new(15.0, 125.0));
        assert_eq!(style.rotation, -FRAC_PI_2);

        let (at, _) = list.find_text("Time").unwrap();
        assert_eq!(at, Point::new(400.0, 240.0));

        let ticks: Vec<&str> = list
            .texts()
            .into_iter()
            .filter(|(_, _, style)| style.size == TICK_SIZE)
            .map(|(text, _, _)| text)
            .collect();
        assert_eq!(ticks, vec!["100", "80", "60", "40", "20", "0"]);
        let (at, style) = list.find_text("100").unwrap();
        assert_eq!(at, Point::new(50.0, 63.0));
        assert_eq!(style.align, TextAlign::Right);
    }

    #[test]
    fn test_explicit_width_ignores_container() {
        let mut list = DisplayList::new();
        draw_chart(&mut list, &spec(vec![]).width(400.0), 1200.0);
        assert_eq!(list.width, 400.0);
    }

    #[test]
    fn test_redraw_is_deterministic() {
        let spec = spec(vec![
            ChartSeries::new("a", RED, vec![1.0, 50.0, 99.0]),
            ChartSeries::new("b", BLUE, vec![10.0]),
        ]);
        let mut list = render(&spec);
        let first = list.ops.clone();
        draw_chart(&mut list, &spec, 800.0);
        assert_eq!(list.ops, first);
    }
}
