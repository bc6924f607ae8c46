// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration.
//!
//! Configuration is layered: a per-series override layer sits over the
//! chart-level defaults, which sit over built-in literals. Every overridable
//! field is an `Option` on [`SeriesSpec`] and resolves field-by-field in
//! [`SeriesSpec::resolved_style`] / [`SeriesSpec::resolved_axis`] — the only
//! places precedence is encoded.

use std::sync::Arc;

use kurbo::{Cap, Join};
use peniko::Brush;
use peniko::color::palette::css;

use crate::scale::ScaleKind;

/// Reads one value out of a row-oriented record.
pub type RowAccessor = Arc<dyn Fn(&[f64]) -> f64>;

/// Formats a tick value given `(value, tick_step)`.
pub type TickFormatter = Arc<dyn Fn(f64, f64) -> String>;

/// Per-index inclusion predicate for shape geometry (enables gaps).
pub type DefinedPredicate = Arc<dyn Fn(usize) -> bool>;

/// Margins around the plot area, in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 40.0,
            bottom: 20.0,
            left: 40.0,
        }
    }
}

/// Which side of the plot a y-axis guide is drawn on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisPosition {
    /// Guide at the left margin.
    #[default]
    Left,
    /// Guide at the right margin.
    Right,
}

/// Interpolation between the points of a line shape.
///
/// Area shapes always interpolate linearly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CurveKind {
    /// Straight segments between points.
    #[default]
    Linear,
    /// Step-after: hold each value until the next x position.
    Step,
}

/// The closed set of series shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShapeKind {
    /// A stroked polyline through the points.
    #[default]
    Line,
    /// A filled region between the points and the y-axis zero baseline.
    Area,
}

/// What repeated [`crate::Chart::load`] calls do to the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Accrete: each load appends additional axes and shapes. This mirrors
    /// the engine's historical overlay behavior and is the default.
    #[default]
    Append,
    /// Clear the surface before rendering each load.
    Replace,
}

/// Source of the x-axis value sequence.
#[derive(Clone)]
pub enum XValues {
    /// Apply an accessor to each record of a row-oriented data set.
    Accessor(RowAccessor),
    /// Generate a synthetic timestamp sequence from three named fields of a
    /// column-oriented data set. All three are required together; an
    /// incomplete combination is unrepresentable.
    StepFields {
        /// Field holding the start date.
        start: String,
        /// Field holding the end date (extended to the last instant of its
        /// day, so the range includes the final day).
        end: String,
        /// Field holding the step width in minutes.
        step: String,
    },
}

impl Default for XValues {
    fn default() -> Self {
        Self::Accessor(Arc::new(|row| row.first().copied().unwrap_or(f64::NAN)))
    }
}

impl core::fmt::Debug for XValues {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Accessor(_) => f.write_str("XValues::Accessor(..)"),
            Self::StepFields { start, end, step } => f
                .debug_struct("XValues::StepFields")
                .field("start", start)
                .field("end", end)
                .field("step", step)
                .finish(),
        }
    }
}

/// The x-axis specification.
#[derive(Clone, Debug)]
pub struct XSpec {
    /// Where x values come from.
    pub values: XValues,
    /// Scale kind; time by default.
    pub kind: ScaleKind,
    /// Explicit `(min, max)` domain, else the extent of the value sequence.
    pub domain: Option<(f64, f64)>,
    /// Explicit pixel range, else `[margin.left, width - margin.right]`.
    pub range: Option<(f64, f64)>,
}

impl Default for XSpec {
    fn default() -> Self {
        Self {
            values: XValues::default(),
            kind: ScaleKind::Time,
            domain: None,
            range: None,
        }
    }
}

/// Chart-level y-axis defaults, overridable per series.
#[derive(Clone, Default)]
pub struct AxisDefaults {
    /// Scale kind; linear by default.
    pub kind: ScaleKind,
    /// Explicit `(min, max)` domain, else the extent of the value sequence.
    pub domain: Option<(f64, f64)>,
    /// Explicit pixel range, else `[height - margin.bottom, margin.top]`.
    pub range: Option<(f64, f64)>,
    /// Tick label formatter.
    pub format: Option<TickFormatter>,
    /// Default y-axis grouping label for series without their own.
    pub label: Option<String>,
    /// Guide side.
    pub position: AxisPosition,
}

impl core::fmt::Debug for AxisDefaults {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisDefaults")
            .field("kind", &self.kind)
            .field("domain", &self.domain)
            .field("range", &self.range)
            .field("format", &self.format.is_some())
            .field("label", &self.label)
            .field("position", &self.position)
            .finish()
    }
}

/// Chart-level visual attribute defaults, overridable per series.
#[derive(Clone, Debug)]
pub struct VisualDefaults {
    /// Stroke color of shapes.
    pub color: Brush,
    /// Stroke width of shapes.
    pub stroke_width: f64,
    /// Stroke cap shape.
    pub stroke_linecap: Cap,
    /// Stroke join shape.
    pub stroke_linejoin: Join,
    /// Stroke opacity.
    pub stroke_opacity: f64,
    /// Fill paint for area shapes; defaults to the stroke color.
    pub fill: Option<Brush>,
    /// Fill opacity for area shapes; defaults to `0.3`.
    pub fill_opacity: Option<f64>,
    /// Interpolation for line shapes.
    pub curve: CurveKind,
}

impl Default for VisualDefaults {
    fn default() -> Self {
        Self {
            color: Brush::Solid(css::BLACK),
            stroke_width: 1.5,
            stroke_linecap: Cap::Round,
            stroke_linejoin: Join::Round,
            stroke_opacity: 1.0,
            fill: None,
            fill_opacity: None,
            curve: CurveKind::default(),
        }
    }
}

/// Source of one series' value sequence.
#[derive(Clone)]
pub enum SeriesValues {
    /// Apply an accessor to each record of a row-oriented data set.
    Accessor(RowAccessor),
    /// Read a named value column of a column-oriented data set.
    Field(String),
}

impl Default for SeriesValues {
    fn default() -> Self {
        Self::Accessor(Arc::new(|row| row.get(1).copied().unwrap_or(f64::NAN)))
    }
}

impl core::fmt::Debug for SeriesValues {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Accessor(_) => f.write_str("SeriesValues::Accessor(..)"),
            Self::Field(name) => f.debug_tuple("SeriesValues::Field").field(name).finish(),
        }
    }
}

/// One plotted series: a value source, a shape, and optional overrides of the
/// chart-level axis and visual defaults.
#[derive(Clone, Default)]
pub struct SeriesSpec {
    /// Where the series' values come from.
    pub values: SeriesValues,
    /// Y-axis grouping label; series sharing a label share one scale and one
    /// rendered guide.
    pub label: Option<String>,
    /// Shape kind.
    pub shape: ShapeKind,
    /// Per-index inclusion predicate; defaults to "x and y are finite".
    pub defined: Option<DefinedPredicate>,

    /// Override: scale kind.
    pub kind: Option<ScaleKind>,
    /// Override: explicit domain.
    pub domain: Option<(f64, f64)>,
    /// Override: pixel range.
    pub range: Option<(f64, f64)>,
    /// Override: tick formatter.
    pub format: Option<TickFormatter>,
    /// Override: guide side.
    pub position: Option<AxisPosition>,

    /// Override: stroke color.
    pub color: Option<Brush>,
    /// Override: stroke width.
    pub stroke_width: Option<f64>,
    /// Override: stroke cap.
    pub stroke_linecap: Option<Cap>,
    /// Override: stroke join.
    pub stroke_linejoin: Option<Join>,
    /// Override: stroke opacity.
    pub stroke_opacity: Option<f64>,
    /// Override: fill paint.
    pub fill: Option<Brush>,
    /// Override: fill opacity.
    pub fill_opacity: Option<f64>,
    /// Override: line interpolation.
    pub curve: Option<CurveKind>,
}

impl core::fmt::Debug for SeriesSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SeriesSpec")
            .field("values", &self.values)
            .field("label", &self.label)
            .field("shape", &self.shape)
            .field("defined", &self.defined.is_some())
            .field("kind", &self.kind)
            .field("domain", &self.domain)
            .field("range", &self.range)
            .field("format", &self.format.is_some())
            .field("position", &self.position)
            .field("color", &self.color)
            .field("stroke_width", &self.stroke_width)
            .field("stroke_linecap", &self.stroke_linecap)
            .field("stroke_linejoin", &self.stroke_linejoin)
            .field("stroke_opacity", &self.stroke_opacity)
            .field("fill", &self.fill)
            .field("fill_opacity", &self.fill_opacity)
            .field("curve", &self.curve)
            .finish()
    }
}

impl SeriesSpec {
    /// Creates a line series reading values with `accessor`.
    pub fn from_accessor(accessor: impl Fn(&[f64]) -> f64 + 'static) -> Self {
        Self {
            values: SeriesValues::Accessor(Arc::new(accessor)),
            ..Self::default()
        }
    }

    /// Creates a line series reading a named value column.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            values: SeriesValues::Field(name.into()),
            ..Self::default()
        }
    }

    /// Sets the y-axis grouping label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the shape kind.
    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the per-index inclusion predicate.
    pub fn with_defined(mut self, defined: impl Fn(usize) -> bool + 'static) -> Self {
        self.defined = Some(Arc::new(defined));
        self
    }

    /// Sets the stroke color.
    pub fn with_color(mut self, color: impl Into<Brush>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the stroke width.
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    /// Sets the guide side for this series' y-axis.
    pub fn with_position(mut self, position: AxisPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the scale kind for this series' y-axis.
    pub fn with_kind(mut self, kind: ScaleKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets an explicit domain for this series' y-axis.
    pub fn with_domain(mut self, domain: (f64, f64)) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Resolves this series' y-axis grouping label.
    ///
    /// Precedence: series label, else the chart-level default label, else the
    /// empty-string sentinel shared by all unlabeled series.
    pub(crate) fn resolved_label(&self, defaults: &AxisDefaults) -> String {
        self.label
            .clone()
            .or_else(|| defaults.label.clone())
            .unwrap_or_default()
    }

    /// Resolves the axis parameters for this series over the chart defaults.
    pub(crate) fn resolved_axis(&self, defaults: &AxisDefaults) -> ResolvedAxis {
        ResolvedAxis {
            kind: self.kind.unwrap_or(defaults.kind),
            domain: self.domain.or(defaults.domain),
            range: self.range.or(defaults.range),
            format: self.format.clone().or_else(|| defaults.format.clone()),
            position: self.position.unwrap_or(defaults.position),
        }
    }

    /// Resolves the visual attributes for this series over the chart defaults.
    pub(crate) fn resolved_style(&self, defaults: &VisualDefaults) -> ResolvedStyle {
        ResolvedStyle {
            color: self.color.clone().unwrap_or_else(|| defaults.color.clone()),
            stroke_width: self.stroke_width.unwrap_or(defaults.stroke_width),
            cap: self.stroke_linecap.unwrap_or(defaults.stroke_linecap),
            join: self.stroke_linejoin.unwrap_or(defaults.stroke_linejoin),
            stroke_opacity: self.stroke_opacity.unwrap_or(defaults.stroke_opacity),
            fill: self.fill.clone().or_else(|| defaults.fill.clone()),
            fill_opacity: self.fill_opacity.or(defaults.fill_opacity),
            curve: self.curve.unwrap_or(defaults.curve),
        }
    }
}

/// Fully resolved per-series axis parameters.
#[derive(Clone)]
pub(crate) struct ResolvedAxis {
    pub(crate) kind: ScaleKind,
    pub(crate) domain: Option<(f64, f64)>,
    pub(crate) range: Option<(f64, f64)>,
    pub(crate) format: Option<TickFormatter>,
    pub(crate) position: AxisPosition,
}

impl core::fmt::Debug for ResolvedAxis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResolvedAxis")
            .field("kind", &self.kind)
            .field("domain", &self.domain)
            .field("range", &self.range)
            .field("format", &self.format.is_some())
            .field("position", &self.position)
            .finish()
    }
}

/// Fully resolved per-series visual attributes.
#[derive(Clone, Debug)]
pub(crate) struct ResolvedStyle {
    pub(crate) color: Brush,
    pub(crate) stroke_width: f64,
    pub(crate) cap: Cap,
    pub(crate) join: Join,
    pub(crate) stroke_opacity: f64,
    pub(crate) fill: Option<Brush>,
    pub(crate) fill_opacity: Option<f64>,
    pub(crate) curve: CurveKind,
}

/// The full chart configuration: geometry, axis specs, series list, and
/// visual defaults. Immutable once a [`crate::Chart`] is constructed.
#[derive(Clone, Debug)]
pub struct ChartConfig {
    /// Outer width; `640` by default.
    pub width: f64,
    /// Outer height; `400` by default.
    pub height: f64,
    /// Margins around the plot area.
    pub margin: Margin,
    /// The x-axis specification.
    pub x: XSpec,
    /// Chart-level y-axis defaults.
    pub y: AxisDefaults,
    /// Chart-level visual defaults.
    pub style: VisualDefaults,
    /// The plotted series, in draw order.
    pub series: Vec<SeriesSpec>,
    /// What repeated loads do to the surface.
    pub load_mode: LoadMode,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartConfig {
    /// Creates a configuration with the documented defaults and no series.
    pub fn new() -> Self {
        Self {
            width: 640.0,
            height: 400.0,
            margin: Margin::default(),
            x: XSpec::default(),
            y: AxisDefaults::default(),
            style: VisualDefaults::default(),
            series: Vec::new(),
            load_mode: LoadMode::default(),
        }
    }

    /// Sets the outer geometry.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the margins.
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the x-axis value source to an accessor.
    pub fn with_x_accessor(mut self, accessor: impl Fn(&[f64]) -> f64 + 'static) -> Self {
        self.x.values = XValues::Accessor(Arc::new(accessor));
        self
    }

    /// Sets the x-axis value source to a start/end/step field triple.
    pub fn with_x_step_fields(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
        step: impl Into<String>,
    ) -> Self {
        self.x.values = XValues::StepFields {
            start: start.into(),
            end: end.into(),
            step: step.into(),
        };
        self
    }

    /// Sets the x scale kind.
    pub fn with_x_kind(mut self, kind: ScaleKind) -> Self {
        self.x.kind = kind;
        self
    }

    /// Sets an explicit x domain.
    pub fn with_x_domain(mut self, domain: (f64, f64)) -> Self {
        self.x.domain = Some(domain);
        self
    }

    /// Sets the default y-axis grouping label.
    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y.label = Some(label.into());
        self
    }

    /// Sets the default y-axis tick formatter.
    pub fn with_y_format(mut self, format: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.y.format = Some(Arc::new(format));
        self
    }

    /// Appends a series.
    pub fn with_series(mut self, series: SeriesSpec) -> Self {
        self.series.push(series);
        self
    }

    /// Sets the load mode.
    pub fn with_load_mode(mut self, load_mode: LoadMode) -> Self {
        self.load_mode = load_mode;
        self
    }

    /// The x pixel range: explicit, else margin-derived.
    pub(crate) fn x_range(&self) -> (f64, f64) {
        self.x
            .range
            .unwrap_or((self.margin.left, self.width - self.margin.right))
    }

    /// The default y pixel range: explicit, else margin-derived (bottom up).
    pub(crate) fn y_range(&self) -> (f64, f64) {
        self.y
            .range
            .unwrap_or((self.height - self.margin.bottom, self.margin.top))
    }
}
