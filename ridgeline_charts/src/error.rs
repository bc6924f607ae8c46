// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for chart loading.
//!
//! Invalid configuration/data combinations are rejected up front instead of
//! silently producing empty or garbage geometry. Per-point missing values are
//! not errors: they surface as `NaN` and become gaps via the `defined`
//! predicate.

use thiserror::Error;

/// Errors returned by [`crate::Chart::load`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// A named field (step-axis field or series field) is absent from the
    /// data set.
    #[error("field `{0}` is missing from the data set")]
    MissingField(String),

    /// A named field holds a value of the wrong shape (e.g. a scalar where a
    /// value column is needed).
    #[error("field `{field}` is not a {expected}")]
    FieldShape {
        /// The offending field name.
        field: String,
        /// What the access path needed (`"value column"`, `"scalar"`, ...).
        expected: &'static str,
    },

    /// A start/end date field could not be parsed as a calendar date.
    #[error("field `{field}` holds an unparseable date: `{value}`")]
    InvalidDate {
        /// The offending field name.
        field: String,
        /// The raw text that failed to parse.
        value: String,
    },

    /// The step-minutes field is non-positive or non-finite.
    #[error("step minutes must be positive and finite, got {0}")]
    InvalidStep(f64),

    /// An accessor-based value source was configured but the data set is
    /// column-oriented.
    #[error("accessor value sources require row-oriented data")]
    RowDataRequired,

    /// A named-field value source was configured but the data set is
    /// row-oriented.
    #[error("named-field value sources require column-oriented data")]
    ColumnDataRequired,
}
