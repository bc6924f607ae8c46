// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar helpers: date parsing, synthetic step sequences, time ticks and
//! tick formatting.
//!
//! Time is modeled as **milliseconds since the Unix epoch** (UTC) throughout
//! the crate; `chrono` is used at the edges for parsing and formatting.

use chrono::{DateTime, NaiveDate, Utc};

const MILLIS_PER_SECOND: f64 = 1_000.0;
const MILLIS_PER_MINUTE: f64 = 60.0 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: f64 = 60.0 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: f64 = 24.0 * MILLIS_PER_HOUR;

/// Parses a calendar date or date-time into a millisecond timestamp.
///
/// Accepts RFC 3339 date-times (`2024-01-01T08:30:00Z`) and plain dates
/// (`2024-01-01`, interpreted as UTC midnight). Returns `None` on anything
/// else.
pub fn parse_date_millis(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(midnight.and_utc().timestamp_millis())
}

/// Returns the last instant (23:59:59.999) of the UTC day containing `ms`.
pub fn end_of_day_millis(ms: i64) -> i64 {
    let Some(dt) = DateTime::<Utc>::from_timestamp_millis(ms) else {
        return ms;
    };
    let Some(last) = dt.date_naive().and_hms_milli_opt(23, 59, 59, 999) else {
        return ms;
    };
    last.and_utc().timestamp_millis()
}

/// Generates a strictly increasing timestamp sequence from `start_ms` to
/// `end_ms` inclusive, stepping by `step_minutes`.
///
/// The caller is responsible for validating `step_minutes > 0`.
pub fn step_sequence_millis(start_ms: i64, end_ms: i64, step_minutes: f64) -> Vec<f64> {
    let step_ms = step_minutes * MILLIS_PER_MINUTE;
    let start = start_ms as f64;
    let end = end_ms as f64;
    let mut out = Vec::new();
    if step_ms <= 0.0 || !step_ms.is_finite() {
        return out;
    }
    let mut t = start;
    while t <= end {
        out.push(t);
        t += step_ms;
    }
    out
}

/// Returns a vector of "nice-ish" tick values for a time domain expressed in
/// milliseconds.
pub fn nice_time_ticks_millis(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }

    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_time_step_millis(step0);
    if step == 0.0 {
        return vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;
    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };

    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_time_step_millis(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }

    // Candidate steps spanning seconds through days. Calendar-aware month
    // steps are out of scope for the domains this engine plots.
    const STEPS: &[f64] = &[
        MILLIS_PER_SECOND,
        2.0 * MILLIS_PER_SECOND,
        5.0 * MILLIS_PER_SECOND,
        10.0 * MILLIS_PER_SECOND,
        15.0 * MILLIS_PER_SECOND,
        30.0 * MILLIS_PER_SECOND,
        MILLIS_PER_MINUTE,
        2.0 * MILLIS_PER_MINUTE,
        5.0 * MILLIS_PER_MINUTE,
        10.0 * MILLIS_PER_MINUTE,
        15.0 * MILLIS_PER_MINUTE,
        30.0 * MILLIS_PER_MINUTE,
        MILLIS_PER_HOUR,
        2.0 * MILLIS_PER_HOUR,
        3.0 * MILLIS_PER_HOUR,
        6.0 * MILLIS_PER_HOUR,
        12.0 * MILLIS_PER_HOUR,
        MILLIS_PER_DAY,
        2.0 * MILLIS_PER_DAY,
        7.0 * MILLIS_PER_DAY,
    ];

    for &s in STEPS {
        if s >= step {
            return s;
        }
    }
    // Fallback: round up to the next whole-day magnitude.
    let days = (step / MILLIS_PER_DAY).ceil();
    days.max(1.0) * MILLIS_PER_DAY
}

/// Formats a tick value (milliseconds) given the tick step (milliseconds).
///
/// Day-scale steps format as `Jan 02`, sub-day steps as clock time.
pub fn format_time_millis(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let ms = {
        let clamped = v.round().clamp(i64::MIN as f64, i64::MAX as f64);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
        {
            clamped as i64
        }
    };
    let Some(dt) = DateTime::<Utc>::from_timestamp_millis(ms) else {
        return format!("{v}");
    };
    let step = step.abs();

    if step >= MILLIS_PER_DAY {
        dt.format("%b %d").to_string()
    } else if step >= MILLIS_PER_MINUTE {
        dt.format("%H:%M").to_string()
    } else {
        dt.format("%H:%M:%S").to_string()
    }
}
