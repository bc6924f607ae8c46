// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input data sets.
//!
//! A chart consumes either an ordered sequence of numeric records (row
//! orientation, addressed by accessor closures) or a set of named fields
//! (column orientation, addressed by field names). Which orientation a
//! configuration needs follows from its value sources; the mismatch cases are
//! rejected when axes are computed, not discovered per point.
//!
//! Missing values are `f64::NAN` and flow through the `defined` filtering
//! path downstream.

use std::collections::BTreeMap;

use crate::error::ChartError;

/// One named field of a column-oriented data set.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// A scalar number (e.g. a step width in minutes).
    Number(f64),
    /// Scalar text (e.g. a calendar date such as `2024-01-01`).
    Text(String),
    /// A numeric value column.
    Values(Vec<f64>),
}

/// A chart input: row-oriented records or named columns.
#[derive(Clone, Debug, PartialEq)]
pub enum DataSet {
    /// An ordered sequence of numeric records.
    Rows(Vec<Vec<f64>>),
    /// Named fields: scalars and value columns.
    Columns(BTreeMap<String, FieldValue>),
}

impl DataSet {
    /// Builds a row-oriented data set from `(x, y)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::Rows(pairs.into_iter().map(|(x, y)| vec![x, y]).collect())
    }

    /// Builds an empty column-oriented data set.
    pub fn columns() -> Self {
        Self::Columns(BTreeMap::new())
    }

    /// Inserts a named field, replacing any previous value.
    ///
    /// No-op on row-oriented data sets.
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        if let Self::Columns(fields) = &mut self {
            fields.insert(name.into(), value);
        }
        self
    }

    /// The record list of a row-oriented data set.
    pub(crate) fn rows(&self) -> Result<&[Vec<f64>], ChartError> {
        match self {
            Self::Rows(rows) => Ok(rows),
            Self::Columns(_) => Err(ChartError::RowDataRequired),
        }
    }

    fn field(&self, name: &str) -> Result<&FieldValue, ChartError> {
        match self {
            Self::Rows(_) => Err(ChartError::ColumnDataRequired),
            Self::Columns(fields) => fields
                .get(name)
                .ok_or_else(|| ChartError::MissingField(name.to_owned())),
        }
    }

    /// A named value column.
    pub(crate) fn values(&self, name: &str) -> Result<&[f64], ChartError> {
        match self.field(name)? {
            FieldValue::Values(values) => Ok(values),
            _ => Err(ChartError::FieldShape {
                field: name.to_owned(),
                expected: "value column",
            }),
        }
    }

    /// A named scalar number.
    pub(crate) fn number(&self, name: &str) -> Result<f64, ChartError> {
        match self.field(name)? {
            FieldValue::Number(n) => Ok(*n),
            _ => Err(ChartError::FieldShape {
                field: name.to_owned(),
                expected: "scalar number",
            }),
        }
    }

    /// A named date field as a millisecond timestamp.
    ///
    /// Text fields are parsed as calendar dates; numeric fields are taken as
    /// epoch milliseconds directly.
    pub(crate) fn date_millis(&self, name: &str) -> Result<i64, ChartError> {
        match self.field(name)? {
            FieldValue::Text(text) => {
                crate::time::parse_date_millis(text).ok_or_else(|| ChartError::InvalidDate {
                    field: name.to_owned(),
                    value: text.clone(),
                })
            }
            FieldValue::Number(n) if n.is_finite() => {
                let clamped = n.round().clamp(i64::MIN as f64, i64::MAX as f64);
                #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
                {
                    Ok(clamped as i64)
                }
            }
            FieldValue::Number(n) => Err(ChartError::InvalidDate {
                field: name.to_owned(),
                value: format!("{n}"),
            }),
            FieldValue::Values(_) => Err(ChartError::FieldShape {
                field: name.to_owned(),
                expected: "scalar date",
            }),
        }
    }
}
