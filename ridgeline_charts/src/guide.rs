// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis guide rendering: tick marks, tick labels, gridlines, axis labels.
//!
//! Guides are pure functions from computed axis data to mark payloads; the
//! chart engine decides when (and how often) each guide is drawn.

use kurbo::{BezPath, Point};
use peniko::Brush;
use peniko::color::palette::css;

use crate::axis::{XAxis, YAxis};
use crate::config::{AxisPosition, ChartConfig};
use crate::mark::{MarkPayload, PathMark, TextAnchor, TextBaseline, TextMark};
use crate::scale::ScaleContinuous;
use crate::z_order;

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const LABEL_FONT_SIZE: f64 = 10.0;
const GRID_ALPHA: f32 = 0.1;

fn rule_brush() -> Brush {
    Brush::Solid(css::BLACK)
}

/// Renders the bottom x-axis guide: domain line, ticks, labels.
pub(crate) fn x_guide(config: &ChartConfig, axis: &XAxis) -> Vec<(i32, MarkPayload)> {
    let y = config.height - config.margin.bottom;
    let (r0, r1) = config.x_range();
    let tick_count = tick_count_for(config.width, 80.0);
    let (ticks, step) = tick_values(&axis.scale, tick_count);

    let mut out = Vec::new();

    // Domain line without outer ticks.
    let mut domain = BezPath::new();
    domain.move_to((r0, y));
    domain.line_to((r1, y));
    out.push((
        z_order::AXIS_RULES,
        MarkPayload::Path(PathMark::stroked(domain, rule_brush(), 1.0)),
    ));

    for &v in &ticks {
        let x = axis.scale.map(v);
        if !within(x, r0, r1) {
            continue;
        }

        let mut tick = BezPath::new();
        tick.move_to((x, y));
        tick.line_to((x, y + TICK_SIZE));
        out.push((
            z_order::AXIS_RULES,
            MarkPayload::Path(PathMark::stroked(tick, rule_brush(), 1.0)),
        ));

        out.push((
            z_order::AXIS_LABELS,
            MarkPayload::Text(TextMark {
                pos: Point::new(x, y + TICK_SIZE + TICK_PADDING),
                text: format_tick(&axis.scale, None, v, step),
                font_size: LABEL_FONT_SIZE,
                fill: rule_brush(),
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Hanging,
            }),
        ));
    }

    out
}

/// Renders one y-axis guide: ticks, labels, full-width gridlines, and the
/// optional axis label. No domain line is drawn.
pub(crate) fn y_guide(config: &ChartConfig, axis: &YAxis) -> Vec<(i32, MarkPayload)> {
    let x = match axis.position {
        AxisPosition::Left => config.margin.left,
        AxisPosition::Right => config.width - config.margin.right,
    };
    let (plot_left, plot_right) = (config.margin.left, config.width - config.margin.right);
    let tick_count = tick_count_for(config.height, 40.0);
    let (ticks, step) = tick_values(&axis.scale, tick_count);

    let (lo, hi) = ordered(axis.range);
    let mut out = Vec::new();

    for &v in &ticks {
        let y = axis.scale.map(v);
        if !within(y, lo, hi) {
            continue;
        }

        let mut grid = BezPath::new();
        grid.move_to((plot_left, y));
        grid.line_to((plot_right, y));
        out.push((
            z_order::GRID_LINES,
            MarkPayload::Path(PathMark::stroked(
                grid,
                Brush::Solid(css::BLACK.with_alpha(GRID_ALPHA)),
                1.0,
            )),
        ));

        let mut tick = BezPath::new();
        match axis.position {
            AxisPosition::Left => {
                tick.move_to((x, y));
                tick.line_to((x - TICK_SIZE, y));
            }
            AxisPosition::Right => {
                tick.move_to((x, y));
                tick.line_to((x + TICK_SIZE, y));
            }
        }
        out.push((
            z_order::AXIS_RULES,
            MarkPayload::Path(PathMark::stroked(tick, rule_brush(), 1.0)),
        ));

        let (label_x, anchor) = match axis.position {
            AxisPosition::Left => (x - TICK_SIZE - TICK_PADDING, TextAnchor::End),
            AxisPosition::Right => (x + TICK_SIZE + TICK_PADDING, TextAnchor::Start),
        };
        out.push((
            z_order::AXIS_LABELS,
            MarkPayload::Text(TextMark {
                pos: Point::new(label_x, y),
                text: format_tick(&axis.scale, axis.format.as_ref(), v, step),
                font_size: LABEL_FONT_SIZE,
                fill: rule_brush(),
                anchor,
                baseline: TextBaseline::Middle,
            }),
        ));
    }

    if !axis.label.is_empty() {
        // Anchored at the axis origin, pulled left by the left margin.
        out.push((
            z_order::AXIS_TITLES,
            MarkPayload::Text(TextMark {
                pos: Point::new(x - config.margin.left, 10.0),
                text: axis.label.clone(),
                font_size: LABEL_FONT_SIZE,
                fill: rule_brush(),
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Alphabetic,
            }),
        ));
    }

    out
}

fn tick_count_for(extent_px: f64, px_per_tick: f64) -> usize {
    let count = (extent_px / px_per_tick).floor().max(1.0).min(10_000.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
    {
        count as usize
    }
}

fn tick_values(scale: &ScaleContinuous, count: usize) -> (Vec<f64>, f64) {
    let ticks = scale.ticks(count);
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    let step = if step.is_finite() { step } else { 0.0 };
    (ticks, step)
}

fn format_tick(
    scale: &ScaleContinuous,
    formatter: Option<&crate::config::TickFormatter>,
    v: f64,
    step: f64,
) -> String {
    if let Some(f) = formatter {
        return f(v, step);
    }
    if scale.is_time() {
        crate::time::format_time_millis(v, step)
    } else {
        format_tick_number(v, step)
    }
}

/// Formats a numeric tick with decimals derived from the tick step.
pub(crate) fn format_tick_number(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let decimals = if step > 0.0 && step < 1.0 {
        let d = (-step.log10()).ceil().clamp(0.0, 6.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to 0..=6")]
        {
            d as usize
        }
    } else {
        0
    };
    format!("{v:.decimals$}")
}

fn within(px: f64, lo: f64, hi: f64) -> bool {
    px >= lo - 1.0e-9 && px <= hi + 1.0e-9
}

fn ordered(range: (f64, f64)) -> (f64, f64) {
    if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChartConfig, SeriesSpec};
    use crate::data::DataSet;
    use crate::scale::ScaleKind;

    fn config() -> ChartConfig {
        ChartConfig::new()
            .with_x_kind(ScaleKind::Linear)
            .with_series(SeriesSpec::default())
    }

    fn computed(config: &ChartConfig) -> (crate::axis::XAxis, crate::axis::YAxes) {
        let data = DataSet::from_pairs([(0.0, 0.0), (5.0, 50.0), (10.0, 100.0)]);
        (
            crate::axis::compute_x(config, &data).expect("x computes"),
            crate::axis::compute_y(config, &data).expect("y computes"),
        )
    }

    fn texts(marks: &[(i32, MarkPayload)]) -> Vec<String> {
        marks
            .iter()
            .filter_map(|(_, payload)| match payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                MarkPayload::Path(_) => None,
            })
            .collect()
    }

    #[test]
    fn x_guide_draws_domain_line_and_labels() {
        let config = config();
        let (x, _) = computed(&config);
        let marks = x_guide(&config, &x);

        let paths = marks
            .iter()
            .filter(|(z, _)| *z == z_order::AXIS_RULES)
            .count();
        assert!(paths >= 2, "domain line plus at least one tick");
        assert!(!texts(&marks).is_empty(), "tick labels expected");
    }

    #[test]
    fn y_guide_gridlines_span_the_plot_width() {
        let config = config();
        let (_, ys) = computed(&config);
        let marks = y_guide(&config, &ys.axes[0]);

        let grid_count = marks
            .iter()
            .filter(|(z, _)| *z == z_order::GRID_LINES)
            .count();
        assert!(grid_count > 0, "gridlines expected");
        for (z, payload) in &marks {
            if *z != z_order::GRID_LINES {
                continue;
            }
            let MarkPayload::Path(p) = payload else {
                panic!("gridlines are paths");
            };
            let bbox = kurbo::Shape::bounding_box(&p.path);
            assert_eq!(bbox.x0, config.margin.left);
            assert_eq!(bbox.x1, config.width - config.margin.right);
        }
    }

    #[test]
    fn y_guide_right_position_moves_the_ticks() {
        let mut config = config();
        config.series[0].position = Some(crate::config::AxisPosition::Right);
        let (_, ys) = computed(&config);
        let marks = y_guide(&config, &ys.axes[0]);

        let x_base = config.width - config.margin.right;
        let has_right_tick = marks.iter().any(|(z, payload)| {
            *z == z_order::AXIS_RULES
                && matches!(payload, MarkPayload::Path(p)
                    if kurbo::Shape::bounding_box(&p.path).x1 > x_base + 1.0)
        });
        assert!(has_right_tick, "right-side ticks must extend past the axis");
    }

    #[test]
    fn y_guide_axis_label_sits_at_the_origin_offset() {
        let mut config = config();
        config.series[0].label = Some("MB".into());
        let (_, ys) = computed(&config);
        let marks = y_guide(&config, &ys.axes[0]);

        let title = marks
            .iter()
            .find_map(|(z, payload)| match payload {
                MarkPayload::Text(t) if *z == z_order::AXIS_TITLES => Some(t.clone()),
                _ => None,
            })
            .expect("axis label expected");
        assert_eq!(title.text, "MB");
        assert_eq!(title.pos.x, 0.0, "left axis label starts at the surface edge");
        assert_eq!(title.pos.y, 10.0);
    }

    #[test]
    fn custom_formatter_overrides_tick_text() {
        let mut config = config();
        config.y.format = Some(std::sync::Arc::new(|v, _| format!("{v}ms")));
        let (_, ys) = computed(&config);
        let marks = y_guide(&config, &ys.axes[0]);
        assert!(
            texts(&marks).iter().any(|t| t.ends_with("ms")),
            "formatter output expected in labels"
        );
    }

    #[test]
    fn numeric_tick_formatting_follows_the_step() {
        assert_eq!(format_tick_number(4.0, 1.0), "4");
        assert_eq!(format_tick_number(0.25, 0.05), "0.25");
        assert_eq!(format_tick_number(1.5, 0.5), "1.5");
    }
}
