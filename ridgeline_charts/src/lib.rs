// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative line/area charting.
//!
//! `ridgeline_charts` turns tabular or time-series data into a rendered 2D
//! chart. The interesting part is axis computation and scale sharing:
//! - x scales are derived from the data, or generated as a synthetic
//!   time-step sequence from start/end/step fields;
//! - series that share a logical y-axis **label** are merged onto one
//!   consistently scaled axis (domains union, the guide draws once);
//! - series values map through the finalized scales into line or area path
//!   geometry with gap support.
//!
//! Path geometry and paint are delegated to [`kurbo`] and [`peniko`]; the
//! drawable surface is an ordered mark list that serializes to SVG.
//!
//! ```
//! use ridgeline_charts::{Chart, ChartConfig, DataSet, ScaleKind, SeriesSpec};
//!
//! let config = ChartConfig::new()
//!     .with_x_kind(ScaleKind::Linear)
//!     .with_series(SeriesSpec::default().with_label("MB"))
//!     .with_series(
//!         SeriesSpec::from_accessor(|row| row.get(2).copied().unwrap_or(f64::NAN))
//!             .with_label("MB"),
//!     );
//! let mut chart = Chart::new(config);
//! chart
//!     .load(&DataSet::Rows(vec![
//!         vec![0.0, 2.0, 10.0],
//!         vec![1.0, 8.0, 40.0],
//!     ]))
//!     .unwrap();
//! let svg = chart.to_svg_string();
//! assert!(svg.starts_with("<svg"));
//! ```

mod axis;
mod chart;
mod config;
mod data;
mod error;
mod guide;
mod mark;
mod scale;
mod shape;
mod surface;
pub mod time;
pub mod z_order;

pub use chart::Chart;
pub use config::{
    AxisDefaults, AxisPosition, ChartConfig, CurveKind, DefinedPredicate, LoadMode, Margin,
    RowAccessor, SeriesSpec, SeriesValues, ShapeKind, TickFormatter, VisualDefaults, XSpec,
    XValues,
};
pub use data::{DataSet, FieldValue};
pub use error::ChartError;
pub use mark::{Mark, MarkId, MarkPayload, PathMark, TextAnchor, TextBaseline, TextMark};
pub use scale::{ScaleContinuous, ScaleKind, ScaleLinear, ScaleLog, ScaleTime, extent};
pub use surface::Surface;
