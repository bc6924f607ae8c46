// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mark model: one drawable element per mark.
//!
//! The chart layer renders everything — axis rules, tick labels, gridlines,
//! series shapes — by appending marks to a [`crate::Surface`]. Marks carry an
//! explicit `z_index` for render ordering; renderers sort by
//! `(z_index, MarkId)` for a deterministic tie-break.
//!
//! Text marks store unshaped strings; shaping/layout is downstream.

use kurbo::{BezPath, Cap, Join, Point};
use peniko::Brush;

/// Stable identity for a mark on a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates a mark id from a raw value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Horizontal anchoring for text marks, matching the SVG `text-anchor` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Anchor at the start of the text.
    Start,
    /// Anchor at the middle of the text.
    Middle,
    /// Anchor at the end of the text.
    End,
}

/// Vertical baseline for text marks, matching SVG `dominant-baseline` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    /// The alphabetic baseline.
    Alphabetic,
    /// The middle of the em box.
    Middle,
    /// The hanging baseline (text hangs below the anchor point).
    Hanging,
}

/// A stroked and/or filled path.
#[derive(Clone, Debug)]
pub struct PathMark {
    /// Path geometry in surface coordinates.
    pub path: BezPath,
    /// Fill paint; a fully transparent solid serializes as `fill="none"`.
    pub fill: Brush,
    /// Extra fill opacity multiplied into the fill paint's alpha.
    pub fill_opacity: f64,
    /// Stroke paint.
    pub stroke: Option<Brush>,
    /// Stroke width in surface coordinates; `0.0` disables the stroke.
    pub stroke_width: f64,
    /// Extra stroke opacity multiplied into the stroke paint's alpha.
    pub stroke_opacity: f64,
    /// Stroke cap shape.
    pub cap: Cap,
    /// Stroke join shape.
    pub join: Join,
}

impl PathMark {
    /// Creates a stroke-only path mark (no fill).
    pub fn stroked(path: BezPath, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            path,
            fill: Brush::Solid(peniko::Color::TRANSPARENT),
            fill_opacity: 1.0,
            stroke: Some(stroke.into()),
            stroke_width,
            stroke_opacity: 1.0,
            cap: Cap::Butt,
            join: Join::Miter,
        }
    }

    /// Creates a fill-only path mark (no stroke).
    pub fn filled(path: BezPath, fill: impl Into<Brush>) -> Self {
        Self {
            path,
            fill: fill.into(),
            fill_opacity: 1.0,
            stroke: None,
            stroke_width: 0.0,
            stroke_opacity: 1.0,
            cap: Cap::Butt,
            join: Join::Miter,
        }
    }
}

/// A positioned run of text.
#[derive(Clone, Debug)]
pub struct TextMark {
    /// Anchor position in surface coordinates.
    pub pos: Point,
    /// The text content (unshaped).
    pub text: String,
    /// Font size in surface coordinates.
    pub font_size: f64,
    /// Fill paint for the glyphs.
    pub fill: Brush,
    /// Horizontal anchoring.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
}

/// Drawable payload of a mark.
#[derive(Clone, Debug)]
pub enum MarkPayload {
    /// A path (line segment, gridline, series shape).
    Path(PathMark),
    /// A text run (tick label, axis label).
    Text(TextMark),
}

/// One drawable element with identity and render order.
#[derive(Clone, Debug)]
pub struct Mark {
    /// Stable identity on the owning surface.
    pub id: MarkId,
    /// Render ordering hint; see [`crate::z_order`].
    pub z_index: i32,
    /// The drawable payload.
    pub payload: MarkPayload,
}
