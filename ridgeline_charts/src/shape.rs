// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series shape rendering: line and area path geometry.
//!
//! Shapes draw the index sequence `0..x.len()` filtered by a per-index
//! `defined` predicate; a run of undefined indices breaks the geometry and a
//! new subpath starts where data resumes. Each shape kind owns its geometry
//! rule: lines connect scaled points (optionally step-interpolated), areas
//! close every defined run against the y-scale image of zero.

use kurbo::BezPath;

use crate::config::{CurveKind, DefinedPredicate, ResolvedStyle, ShapeKind};
use crate::mark::{MarkPayload, PathMark};
use crate::scale::ScaleContinuous;
use crate::z_order;

const DEFAULT_AREA_FILL_OPACITY: f64 = 0.3;

/// Renders one series into a path payload.
pub(crate) fn series_payload(
    xs: &[f64],
    x_scale: &ScaleContinuous,
    ys: &[f64],
    y_scale: &ScaleContinuous,
    shape: ShapeKind,
    style: &ResolvedStyle,
    defined: Option<&DefinedPredicate>,
) -> (i32, MarkPayload) {
    let included = |i: usize| match defined {
        Some(predicate) => predicate(i),
        None => {
            xs.get(i).copied().unwrap_or(f64::NAN).is_finite()
                && ys.get(i).copied().unwrap_or(f64::NAN).is_finite()
        }
    };

    match shape {
        ShapeKind::Line => {
            let path = line_path(xs, x_scale, ys, y_scale, style.curve, &included);
            let mut mark = PathMark::stroked(path, style.color.clone(), style.stroke_width);
            mark.stroke_opacity = style.stroke_opacity;
            mark.cap = style.cap;
            mark.join = style.join;
            (z_order::SERIES_STROKE, MarkPayload::Path(mark))
        }
        ShapeKind::Area => {
            let path = area_path(xs, x_scale, ys, y_scale, &included);
            let fill = style.fill.clone().unwrap_or_else(|| style.color.clone());
            let mut mark = PathMark::stroked(path, style.color.clone(), style.stroke_width);
            mark.fill = fill;
            mark.fill_opacity = style.fill_opacity.unwrap_or(DEFAULT_AREA_FILL_OPACITY);
            mark.stroke_opacity = style.stroke_opacity;
            mark.cap = style.cap;
            mark.join = style.join;
            (z_order::SERIES_FILL, MarkPayload::Path(mark))
        }
    }
}

/// Builds line geometry over the defined runs of the index sequence.
fn line_path(
    xs: &[f64],
    x_scale: &ScaleContinuous,
    ys: &[f64],
    y_scale: &ScaleContinuous,
    curve: CurveKind,
    included: &impl Fn(usize) -> bool,
) -> BezPath {
    let mut path = BezPath::new();
    let mut run_open = false;
    let mut prev_y = 0.0;

    for i in 0..xs.len() {
        if !included(i) {
            run_open = false;
            continue;
        }
        let px = x_scale.map(xs[i]);
        let py = y_scale.map(ys.get(i).copied().unwrap_or(f64::NAN));
        if !run_open {
            path.move_to((px, py));
            run_open = true;
        } else {
            match curve {
                CurveKind::Linear => path.line_to((px, py)),
                CurveKind::Step => {
                    // Step-after: hold the previous value until this x.
                    path.line_to((px, prev_y));
                    path.line_to((px, py));
                }
            }
        }
        prev_y = py;
    }

    path
}

/// Builds area geometry: every defined run closes against the zero baseline.
fn area_path(
    xs: &[f64],
    x_scale: &ScaleContinuous,
    ys: &[f64],
    y_scale: &ScaleContinuous,
    included: &impl Fn(usize) -> bool,
) -> BezPath {
    let baseline = y_scale.map(0.0);
    let mut path = BezPath::new();
    let mut run_open = false;
    let mut last_x = 0.0;

    for i in 0..xs.len() {
        if !included(i) {
            if run_open {
                path.line_to((last_x, baseline));
                path.close_path();
                run_open = false;
            }
            continue;
        }
        let px = x_scale.map(xs[i]);
        let py = y_scale.map(ys.get(i).copied().unwrap_or(f64::NAN));
        if !run_open {
            path.move_to((px, baseline));
            path.line_to((px, py));
            run_open = true;
        } else {
            path.line_to((px, py));
        }
        last_x = px;
    }
    if run_open {
        path.line_to((last_x, baseline));
        path.close_path();
    }

    path
}
