// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart demos for `ridgeline_charts`: writes sample SVG files.

use peniko::color::palette::css;
use ridgeline_charts::{
    AxisPosition, Chart, ChartConfig, DataSet, FieldValue, ScaleKind, SeriesSpec, ShapeKind,
};

fn main() {
    for (name, svg) in [
        ("ridgeline_demo_shared_axis.svg", shared_axis_demo()),
        ("ridgeline_demo_step_area.svg", step_area_demo()),
    ] {
        std::fs::write(name, svg).expect("write demo svg");
        println!("wrote {name}");
    }
}

/// Two line series sharing one y axis, one independent right-hand axis.
fn shared_axis_demo() -> String {
    let data = DataSet::Rows(
        (0..60)
            .map(|i| {
                let t = f64::from(i);
                let used = 420.0 + 40.0 * (t / 7.0).sin() + t;
                let cached = 380.0 + 25.0 * (t / 11.0).cos();
                let ops = 90.0 + 70.0 * (t / 5.0).sin().abs();
                vec![t * 60_000.0, used, cached, ops]
            })
            .collect(),
    );

    let config = ChartConfig::new()
        .with_y_label("MB")
        .with_series(SeriesSpec::default().with_color(css::STEEL_BLUE))
        .with_series(
            SeriesSpec::from_accessor(|row| row.get(2).copied().unwrap_or(f64::NAN))
                .with_color(css::MEDIUM_SEA_GREEN),
        )
        .with_series(
            SeriesSpec::from_accessor(|row| row.get(3).copied().unwrap_or(f64::NAN))
                .with_label("ops/s")
                .with_position(AxisPosition::Right)
                .with_color(css::CRIMSON)
                .with_stroke_width(2.0),
        );

    let mut chart = Chart::new(config);
    chart.load(&data).expect("demo data loads");
    chart.to_svg_string()
}

/// An area over a synthetic hourly time axis generated from step fields.
fn step_area_demo() -> String {
    let load: Vec<f64> = (0..48)
        .map(|i| {
            let t = f64::from(i);
            if i % 19 == 7 {
                f64::NAN // sensor dropout: the area breaks here
            } else {
                30.0 + 20.0 * (t / 6.0).sin() + t / 4.0
            }
        })
        .collect();

    let data = DataSet::columns()
        .with_field("start_date", FieldValue::Text("2024-01-01".into()))
        .with_field("end_date", FieldValue::Text("2024-01-02".into()))
        .with_field("step_minutes", FieldValue::Number(60.0))
        .with_field("load", FieldValue::Values(load));

    let config = ChartConfig::new()
        .with_x_step_fields("start_date", "end_date", "step_minutes")
        .with_x_kind(ScaleKind::Time)
        .with_y_label("load")
        .with_series(
            SeriesSpec::from_field("load")
                .with_shape(ShapeKind::Area)
                .with_color(css::DARK_CYAN),
        );

    let mut chart = Chart::new(config);
    chart.load(&data).expect("demo data loads");
    chart.to_svg_string()
}
