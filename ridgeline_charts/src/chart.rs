// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart engine: owns the surface and drives a load.

use log::{debug, warn};

use crate::axis;
use crate::config::{ChartConfig, LoadMode};
use crate::data::DataSet;
use crate::error::ChartError;
use crate::guide;
use crate::shape;
use crate::surface::Surface;

/// A chart: an immutable configuration plus the surface it renders into.
///
/// The surface is empty after construction and is populated by [`Chart::load`].
/// With the default [`LoadMode::Append`], repeated loads accrete additional
/// axes and shapes onto the same surface — intentional overlay behavior, not
/// a bug; configure [`LoadMode::Replace`] to clear between loads.
#[derive(Debug)]
pub struct Chart {
    config: ChartConfig,
    surface: Surface,
}

impl Chart {
    /// Creates a chart with an empty surface sized from the configuration.
    pub fn new(config: ChartConfig) -> Self {
        if config.series.is_empty() {
            warn!("chart configured with no series; loads will render axes only");
        }
        let surface = Surface::new(config.width, config.height);
        Self { config, surface }
    }

    /// The configuration this chart was built with.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The drawable surface, for embedding into a host document.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Serializes the surface to an SVG document string.
    pub fn to_svg_string(&self) -> String {
        self.surface.to_svg_string()
    }

    /// Computes axes from `data` and renders axes and series shapes.
    ///
    /// All axis computation — including the per-label domain merging across
    /// every configured series — completes before the first mark is appended,
    /// so a failed load leaves the surface untouched and every shape is drawn
    /// against final scales.
    pub fn load(&mut self, data: &DataSet) -> Result<(), ChartError> {
        let x = axis::compute_x(&self.config, data)?;
        let mut y = axis::compute_y(&self.config, data)?;

        if self.config.load_mode == LoadMode::Replace {
            self.surface.clear();
        }

        self.surface.extend(guide::x_guide(&self.config, &x));

        for (index, series) in self.config.series.iter().enumerate() {
            let axis_index = y.series_axis[index];
            let y_axis = &mut y.axes[axis_index];
            if !y_axis.rendered {
                self.surface.extend(guide::y_guide(&self.config, y_axis));
                y_axis.rendered = true;
            }

            let style = series.resolved_style(&self.config.style);
            let (z, payload) = shape::series_payload(
                &x.values,
                &x.scale,
                &y.series_values[index],
                &y_axis.scale,
                series.shape,
                &style,
                series.defined.as_ref(),
            );
            self.surface.push(z, payload);
        }

        debug!(
            "load complete: {} series over {} y axes, {} marks on surface",
            self.config.series.len(),
            y.axes.len(),
            self.surface.marks().len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeriesSpec;
    use crate::data::FieldValue;
    use crate::mark::MarkPayload;
    use crate::scale::ScaleKind;
    use crate::z_order;

    fn pairs() -> DataSet {
        DataSet::from_pairs([(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)])
    }

    fn third_column() -> SeriesSpec {
        SeriesSpec::from_accessor(|row| row.get(2).copied().unwrap_or(f64::NAN))
    }

    fn count_z(chart: &Chart, z: i32) -> usize {
        chart
            .surface()
            .marks()
            .iter()
            .filter(|m| m.z_index == z)
            .count()
    }

    fn axis_titles(chart: &Chart) -> Vec<String> {
        chart
            .surface()
            .marks()
            .iter()
            .filter(|m| m.z_index == z_order::AXIS_TITLES)
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                MarkPayload::Path(_) => None,
            })
            .collect()
    }

    #[test]
    fn shared_label_renders_one_guide() {
        let config = ChartConfig::new()
            .with_x_kind(ScaleKind::Linear)
            .with_series(SeriesSpec::default().with_label("MB"))
            .with_series(SeriesSpec::default().with_label("MB"));
        let mut chart = Chart::new(config);
        chart.load(&pairs()).expect("load succeeds");

        assert_eq!(axis_titles(&chart), vec!["MB"]);
        assert_eq!(count_z(&chart, z_order::SERIES_STROKE), 2, "both shapes draw");
    }

    #[test]
    fn distinct_labels_render_one_guide_each() {
        let config = ChartConfig::new()
            .with_x_kind(ScaleKind::Linear)
            .with_series(SeriesSpec::default().with_label("a"))
            .with_series(third_column().with_label("b"));
        let mut chart = Chart::new(config);
        chart
            .load(&DataSet::Rows(vec![vec![0.0, 1.0, 10.0], vec![1.0, 2.0, 20.0]]))
            .expect("load succeeds");

        assert_eq!(axis_titles(&chart), vec!["a", "b"]);
    }

    #[test]
    fn append_mode_accretes_across_loads() {
        let config = ChartConfig::new()
            .with_x_kind(ScaleKind::Linear)
            .with_series(SeriesSpec::default());
        let mut chart = Chart::new(config);
        chart.load(&pairs()).expect("first load");
        let after_first = chart.surface().marks().len();
        chart.load(&pairs()).expect("second load");
        assert_eq!(chart.surface().marks().len(), 2 * after_first);
    }

    #[test]
    fn replace_mode_clears_between_loads() {
        let config = ChartConfig::new()
            .with_x_kind(ScaleKind::Linear)
            .with_series(SeriesSpec::default())
            .with_load_mode(LoadMode::Replace);
        let mut chart = Chart::new(config);
        chart.load(&pairs()).expect("first load");
        let after_first = chart.surface().marks().len();
        chart.load(&pairs()).expect("second load");
        assert_eq!(chart.surface().marks().len(), after_first);
    }

    #[test]
    fn empty_series_list_renders_axes_only() {
        let config = ChartConfig::new().with_x_kind(ScaleKind::Linear);
        let mut chart = Chart::new(config);
        chart
            .load(&DataSet::Rows(vec![vec![0.0], vec![1.0]]))
            .expect("load succeeds");

        assert!(count_z(&chart, z_order::AXIS_RULES) > 0, "x guide expected");
        assert_eq!(count_z(&chart, z_order::SERIES_STROKE), 0);
        assert_eq!(count_z(&chart, z_order::SERIES_FILL), 0);
        assert_eq!(count_z(&chart, z_order::GRID_LINES), 0, "no y guide without series");
    }

    #[test]
    fn failed_load_leaves_the_surface_untouched() {
        let config = ChartConfig::new()
            .with_x_kind(ScaleKind::Linear)
            .with_series(SeriesSpec::from_field("missing"));
        let mut chart = Chart::new(config);
        let err = chart.load(&pairs()).expect_err("field access must fail");
        assert!(matches!(err, ChartError::ColumnDataRequired));
        assert!(chart.surface().marks().is_empty(), "no partial render on error");
    }

    #[test]
    fn column_data_end_to_end() {
        let data = DataSet::columns()
            .with_field("start_date", FieldValue::Text("2024-01-01".into()))
            .with_field("end_date", FieldValue::Text("2024-01-01".into()))
            .with_field("step_minutes", FieldValue::Number(60.0))
            .with_field(
                "load",
                FieldValue::Values((0..24).map(f64::from).collect()),
            )
            .with_field(
                "free",
                FieldValue::Values((0..24).map(|i| f64::from(100 - i)).collect()),
            );
        let config = ChartConfig::new()
            .with_x_step_fields("start_date", "end_date", "step_minutes")
            .with_series(SeriesSpec::from_field("load").with_label("GB"))
            .with_series(SeriesSpec::from_field("free").with_label("GB"));
        let mut chart = Chart::new(config);
        chart.load(&data).expect("load succeeds");

        assert_eq!(axis_titles(&chart), vec!["GB"]);
        let svg = chart.to_svg_string();
        assert!(svg.starts_with("<svg"), "svg document expected");
        assert!(svg.contains("<path"), "axis and series paths expected");
        assert!(svg.contains("<text"), "tick labels expected");
    }
}
