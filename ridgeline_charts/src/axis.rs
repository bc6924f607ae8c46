// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis computation: value sequences, domains, and finalized scales.
//!
//! X axes are computed once per load, either from an accessor over the
//! records or from a synthetic start/end/step timestamp sequence. Y axes are
//! grouped by resolved label and computed in **two passes**: the first pass
//! derives every series' value sequence and merges domains per label; the
//! second instantiates one scale per label from the final merged domain. No
//! scale exists before all merging is done, so a shape can never be drawn
//! against a domain that a later series would widen.

use log::{debug, warn};

use crate::config::{AxisPosition, ChartConfig, ResolvedAxis, SeriesValues, TickFormatter, XValues};
use crate::data::DataSet;
use crate::error::ChartError;
use crate::scale::{ScaleContinuous, extent, union_extent};
use crate::time;

/// The computed x axis: value sequence, domain, and scale.
#[derive(Debug)]
pub(crate) struct XAxis {
    /// X values in record order (synthetic sequences are already ordered).
    /// Non-finite entries stay at their index for `defined` filtering.
    pub(crate) values: Vec<f64>,
    /// The `(min, max)` domain.
    pub(crate) domain: (f64, f64),
    /// The finalized scale.
    pub(crate) scale: ScaleContinuous,
}

/// One computed y axis, shared by every series with its label.
pub(crate) struct YAxis {
    /// The resolved grouping label (empty for the unlabeled sentinel).
    pub(crate) label: String,
    /// The first contributing series' value sequence. Feeds only the guide's
    /// tick generation; shapes always use their own series' values.
    pub(crate) values: Vec<f64>,
    /// The merged `(min, max)` domain across all contributing series.
    pub(crate) domain: (f64, f64),
    /// The pixel range the scale was instantiated over.
    pub(crate) range: (f64, f64),
    /// The finalized scale over the merged domain.
    pub(crate) scale: ScaleContinuous,
    /// Guide side, from the last contributing series.
    pub(crate) position: AxisPosition,
    /// Tick formatter, from the last contributing series.
    pub(crate) format: Option<TickFormatter>,
    /// Whether the guide has been drawn this load.
    pub(crate) rendered: bool,
}

impl core::fmt::Debug for YAxis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("YAxis")
            .field("label", &self.label)
            .field("values", &self.values.len())
            .field("domain", &self.domain)
            .field("range", &self.range)
            .field("scale", &self.scale)
            .field("position", &self.position)
            .field("format", &self.format.is_some())
            .field("rendered", &self.rendered)
            .finish()
    }
}

/// All computed y axes plus the per-series bookkeeping the render loop needs.
#[derive(Debug)]
pub(crate) struct YAxes {
    /// Axes in first-touch order.
    pub(crate) axes: Vec<YAxis>,
    /// For each configured series, the index of its axis in `axes`.
    pub(crate) series_axis: Vec<usize>,
    /// For each configured series, its own value sequence.
    pub(crate) series_values: Vec<Vec<f64>>,
}

/// Computes the x axis for this load.
pub(crate) fn compute_x(config: &ChartConfig, data: &DataSet) -> Result<XAxis, ChartError> {
    let values = match &config.x.values {
        XValues::StepFields { start, end, step } => {
            let start_ms = data.date_millis(start)?;
            let end_ms = time::end_of_day_millis(data.date_millis(end)?);
            let step_minutes = data.number(step)?;
            if !step_minutes.is_finite() || step_minutes <= 0.0 {
                return Err(ChartError::InvalidStep(step_minutes));
            }
            time::step_sequence_millis(start_ms, end_ms, step_minutes)
        }
        XValues::Accessor(accessor) => data.rows()?.iter().map(|row| accessor(row)).collect(),
    };

    let domain = resolved_domain(config.x.domain, &values, "x");
    let scale = config.x.kind.instantiate(domain, config.x_range());
    debug!(
        "x axis: {} values, domain ({}, {})",
        values.len(),
        domain.0,
        domain.1
    );

    Ok(XAxis {
        values,
        domain,
        scale,
    })
}

/// Computes every y axis for this load, merging domains per label across all
/// configured series before any scale is instantiated.
pub(crate) fn compute_y(config: &ChartConfig, data: &DataSet) -> Result<YAxes, ChartError> {
    struct Pending {
        label: String,
        values: Vec<f64>,
        domain: Option<(f64, f64)>,
        axis: ResolvedAxis,
    }

    // Pass 1: derive per-series sequences and merge domains per label.
    let mut pending: Vec<Pending> = Vec::new();
    let mut series_axis = Vec::with_capacity(config.series.len());
    let mut series_values = Vec::with_capacity(config.series.len());

    for series in &config.series {
        let values: Vec<f64> = match &series.values {
            SeriesValues::Field(name) => data.values(name)?.to_vec(),
            SeriesValues::Accessor(accessor) => {
                data.rows()?.iter().map(|row| accessor(row)).collect()
            }
        };
        let axis = series.resolved_axis(&config.y);
        let label = series.resolved_label(&config.y);
        let declared = axis.domain.or_else(|| extent(&values));

        let index = match pending.iter().position(|p| p.label == label) {
            Some(index) => {
                let entry = &mut pending[index];
                entry.domain = match (entry.domain, declared) {
                    (Some(merged), Some(new)) => Some(union_extent(merged, new)),
                    (merged, new) => merged.or(new),
                };
                // Guide parameters follow the last contributing series; the
                // stored tick sequence stays the first contributor's.
                entry.axis = axis;
                index
            }
            None => {
                pending.push(Pending {
                    label,
                    values: values.clone(),
                    domain: declared,
                    axis,
                });
                pending.len() - 1
            }
        };
        series_axis.push(index);
        series_values.push(values);
    }

    // Pass 2: instantiate one scale per label from the final merged domain.
    let axes = pending
        .into_iter()
        .map(|p| {
            let domain = finalize_domain(p.domain, &p.label);
            let range = p.axis.range.unwrap_or_else(|| config.y_range());
            let scale = p.axis.kind.instantiate(domain, range);
            debug!("y axis `{}`: domain ({}, {})", p.label, domain.0, domain.1);
            YAxis {
                label: p.label,
                values: p.values,
                domain,
                range,
                scale,
                position: p.axis.position,
                format: p.axis.format,
                rendered: false,
            }
        })
        .collect();

    Ok(YAxes {
        axes,
        series_axis,
        series_values,
    })
}

fn resolved_domain(explicit: Option<(f64, f64)>, values: &[f64], what: &str) -> (f64, f64) {
    if let Some(domain) = explicit {
        return domain;
    }
    finalize_domain(extent(values), what)
}

fn finalize_domain(domain: Option<(f64, f64)>, what: &str) -> (f64, f64) {
    domain.unwrap_or_else(|| {
        warn!("{what} axis has no finite values and no explicit domain; chart will be empty");
        (0.0, 0.0)
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{ChartConfig, SeriesSpec};
    use crate::data::{DataSet, FieldValue};
    use crate::scale::ScaleKind;

    fn row_data() -> DataSet {
        DataSet::Rows(vec![
            vec![0.0, 2.0, 10.0],
            vec![1.0, 8.0, 40.0],
            vec![2.0, 4.0, 20.0],
        ])
    }

    fn third_column() -> SeriesSpec {
        SeriesSpec::from_accessor(|row| row.get(2).copied().unwrap_or(f64::NAN))
    }

    #[test]
    fn shared_label_domains_union_regardless_of_order() {
        let data = row_data();
        let forward = ChartConfig::new()
            .with_series(SeriesSpec::default().with_label("MB"))
            .with_series(third_column().with_label("MB"));
        let backward = ChartConfig::new()
            .with_series(third_column().with_label("MB"))
            .with_series(SeriesSpec::default().with_label("MB"));

        let f = compute_y(&forward, &data).expect("forward computes");
        let b = compute_y(&backward, &data).expect("backward computes");

        assert_eq!(f.axes.len(), 1, "one shared axis");
        assert_eq!(f.axes[0].domain, (2.0, 40.0));
        assert_eq!(b.axes[0].domain, (2.0, 40.0));
    }

    #[test]
    fn distinct_labels_get_independent_axes() {
        let data = row_data();
        let config = ChartConfig::new()
            .with_series(SeriesSpec::default().with_label("a"))
            .with_series(third_column().with_label("b"));

        let y = compute_y(&config, &data).expect("computes");
        assert_eq!(y.axes.len(), 2);
        assert_eq!(y.axes[0].domain, (2.0, 8.0));
        assert_eq!(y.axes[1].domain, (10.0, 40.0));
        assert_eq!(y.series_axis, vec![0, 1]);
    }

    #[test]
    fn explicit_series_domain_feeds_the_merge() {
        let data = row_data();
        let config = ChartConfig::new()
            .with_series(SeriesSpec::default().with_label("MB").with_domain((0.0, 100.0)))
            .with_series(third_column().with_label("MB"));

        let y = compute_y(&config, &data).expect("computes");
        assert_eq!(y.axes[0].domain, (0.0, 100.0));
    }

    #[test]
    fn shared_axis_keeps_first_series_tick_values() {
        let data = row_data();
        let config = ChartConfig::new()
            .with_series(SeriesSpec::default().with_label("MB"))
            .with_series(third_column().with_label("MB"));

        let y = compute_y(&config, &data).expect("computes");
        assert_eq!(y.axes[0].values, vec![2.0, 8.0, 4.0]);
        // Each series still scales its own sequence.
        assert_eq!(y.series_values[1], vec![10.0, 40.0, 20.0]);
    }

    #[test]
    fn unlabeled_series_share_the_sentinel_axis() {
        let data = row_data();
        let config = ChartConfig::new()
            .with_series(SeriesSpec::default())
            .with_series(third_column());

        let y = compute_y(&config, &data).expect("computes");
        assert_eq!(y.axes.len(), 1);
        assert_eq!(y.axes[0].label, "");
        assert_eq!(y.axes[0].domain, (2.0, 40.0));
    }

    #[test]
    fn x_accessor_produces_values_in_record_order() {
        let data = row_data();
        let config = ChartConfig::new().with_x_kind(ScaleKind::Linear);
        let x = compute_x(&config, &data).expect("computes");
        assert_eq!(x.values, vec![0.0, 1.0, 2.0]);
        assert_eq!(x.domain, (0.0, 2.0));
    }

    #[test]
    fn x_extent_excludes_nan_but_keeps_it_in_sequence() {
        let data = DataSet::Rows(vec![vec![0.0, 1.0], vec![f64::NAN, 2.0], vec![4.0, 3.0]]);
        let config = ChartConfig::new().with_x_kind(ScaleKind::Linear);
        let x = compute_x(&config, &data).expect("computes");
        assert_eq!(x.values.len(), 3);
        assert!(x.values[1].is_nan(), "NaN stays at its index");
        assert_eq!(x.domain, (0.0, 4.0));
    }

    #[test]
    fn explicit_x_domain_wins_over_extent() {
        let data = row_data();
        let config = ChartConfig::new()
            .with_x_kind(ScaleKind::Linear)
            .with_x_domain((-10.0, 10.0));
        let x = compute_x(&config, &data).expect("computes");
        assert_eq!(x.domain, (-10.0, 10.0));
    }

    #[test]
    fn step_fields_generate_the_sequence() {
        let data = DataSet::columns()
            .with_field("start_date", FieldValue::Text("2024-01-01".into()))
            .with_field("end_date", FieldValue::Text("2024-01-02".into()))
            .with_field("step_minutes", FieldValue::Number(60.0));
        let config = ChartConfig::new().with_x_step_fields("start_date", "end_date", "step_minutes");

        let x = compute_x(&config, &data).expect("computes");
        assert_eq!(x.values.len(), 48);
        assert_eq!(x.domain.0, x.values[0]);
        assert_eq!(x.domain.1, *x.values.last().expect("nonempty"));
    }

    #[test]
    fn step_fields_validate_inputs() {
        let config = ChartConfig::new().with_x_step_fields("start_date", "end_date", "step_minutes");

        let missing = DataSet::columns()
            .with_field("start_date", FieldValue::Text("2024-01-01".into()))
            .with_field("step_minutes", FieldValue::Number(60.0));
        assert!(matches!(
            compute_x(&config, &missing),
            Err(ChartError::MissingField(name)) if name == "end_date"
        ));

        let bad_step = DataSet::columns()
            .with_field("start_date", FieldValue::Text("2024-01-01".into()))
            .with_field("end_date", FieldValue::Text("2024-01-02".into()))
            .with_field("step_minutes", FieldValue::Number(0.0));
        assert!(matches!(
            compute_x(&config, &bad_step),
            Err(ChartError::InvalidStep(_))
        ));

        let bad_date = DataSet::columns()
            .with_field("start_date", FieldValue::Text("January 1st".into()))
            .with_field("end_date", FieldValue::Text("2024-01-02".into()))
            .with_field("step_minutes", FieldValue::Number(60.0));
        assert!(matches!(
            compute_x(&config, &bad_date),
            Err(ChartError::InvalidDate { .. })
        ));
    }

    #[test]
    fn accessor_x_on_column_data_is_rejected() {
        let data = DataSet::columns().with_field("load", FieldValue::Values(vec![1.0]));
        let config = ChartConfig::new();
        assert!(matches!(
            compute_x(&config, &data),
            Err(ChartError::RowDataRequired)
        ));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let data = row_data();
        let config = ChartConfig::new()
            .with_x_kind(ScaleKind::Linear)
            .with_series(SeriesSpec::default().with_label("MB"))
            .with_series(third_column().with_label("MB"));

        let (x1, y1) = (
            compute_x(&config, &data).expect("computes"),
            compute_y(&config, &data).expect("computes"),
        );
        let (x2, y2) = (
            compute_x(&config, &data).expect("computes"),
            compute_y(&config, &data).expect("computes"),
        );

        assert_eq!(x1.domain, x2.domain);
        assert_eq!(y1.axes[0].domain, y2.axes[0].domain);
        for probe in [0.0, 0.5, 1.7, 2.0] {
            assert_eq!(x1.scale.map(probe), x2.scale.map(probe));
            assert_eq!(y1.axes[0].scale.map(probe), y2.axes[0].scale.map(probe));
        }
    }

    #[test]
    fn custom_series_accessor_via_arc() {
        // Accessors are plain closures behind an Arc; make sure the shared
        // form composes with the builder path too.
        let data = row_data();
        let accessor: Arc<dyn Fn(&[f64]) -> f64> =
            Arc::new(|row| row.get(1).copied().unwrap_or(f64::NAN) * 2.0);
        let config = ChartConfig::new().with_series(SeriesSpec {
            values: SeriesValues::Accessor(accessor),
            ..SeriesSpec::default()
        });
        let y = compute_y(&config, &data).expect("computes");
        assert_eq!(y.series_values[0], vec![4.0, 16.0, 8.0]);
    }
}
