//! Literal formatting: how a [`FieldValue`] becomes SQL text.
//!
//! - `NULL` is emitted bare.
//! - Text, dates and datetimes are wrapped in single quotes.
//! - Integers, floats and booleans are emitted bare.
//!
//! In [`LiteralMode::Legacy`] quoted values are interpolated verbatim. A value
//! containing `'` therefore breaks the statement. [`LiteralMode::Escaped`]
//! applies BigQuery string-literal escapes instead.

use crate::value::FieldValue;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Deserialize;
use std::fmt::Write as _;

/// How quoted literals are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralMode {
    /// Interpolate text verbatim between single quotes (unsafe for untrusted input).
    #[default]
    Legacy,
    /// Backslash-escape `\`, `'`, newline and carriage return.
    Escaped,
}

/// Format one value as a SQL literal.
pub fn format_literal(value: &FieldValue, mode: LiteralMode) -> String {
    let mut out = String::new();
    write_literal(&mut out, value, mode);
    out
}

/// Format values as a `", "`-joined literal list, in input order.
///
/// An empty slice yields an empty string.
pub fn format_value_list<'a, I>(values: I, mode: LiteralMode) -> String
where
    I: IntoIterator<Item = &'a FieldValue>,
{
    let mut out = String::new();
    write_value_list(&mut out, values, mode);
    out
}

pub(crate) fn write_value_list<'a, I>(out: &mut String, values: I, mode: LiteralMode)
where
    I: IntoIterator<Item = &'a FieldValue>,
{
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_literal(out, value, mode);
    }
}

pub(crate) fn write_literal(out: &mut String, value: &FieldValue, mode: LiteralMode) {
    match value {
        FieldValue::Null => out.push_str("NULL"),
        FieldValue::Text(s) => write_quoted(out, s, mode),
        FieldValue::Date(d) => write_quoted(out, &date_text(d), mode),
        FieldValue::DateTime(dt) => write_quoted(out, &datetime_text(dt), mode),
        FieldValue::Integer(i) => {
            let _ = write!(out, "{i}");
        }
        FieldValue::Float(f) => write_float(out, *f),
        FieldValue::Boolean(true) => out.push_str("True"),
        FieldValue::Boolean(false) => out.push_str("False"),
    }
}

fn write_quoted(out: &mut String, s: &str, mode: LiteralMode) {
    out.push('\'');
    match mode {
        LiteralMode::Legacy => out.push_str(s),
        LiteralMode::Escaped => {
            for ch in s.chars() {
                match ch {
                    '\\' => out.push_str("\\\\"),
                    '\'' => out.push_str("\\'"),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    c => out.push(c),
                }
            }
        }
    }
    out.push('\'');
}

fn write_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("CAST('NaN' AS FLOAT64)");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 {
            "CAST('inf' AS FLOAT64)"
        } else {
            "CAST('-inf' AS FLOAT64)"
        });
    } else {
        let start = out.len();
        let _ = write!(out, "{f}");
        // Keep integral floats distinguishable from integers.
        if !out[start..].contains('.') {
            out.push_str(".0");
        }
    }
}

fn date_text(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DD HH:MM:SS`, plus `.ffffff` when there is a sub-second part.
///
/// A leap second is carried in `nanosecond() >= 1_000_000_000` and already
/// shows as `:60` in the seconds field.
fn datetime_text(dt: &NaiveDateTime) -> String {
    let mut s = dt.format("%Y-%m-%d %H:%M:%S").to_string();
    let micros = (dt.nanosecond() % 1_000_000_000) / 1_000;
    if micros != 0 {
        let _ = write!(s, ".{micros:06}");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy(v: impl Into<FieldValue>) -> String {
        format_literal(&v.into(), LiteralMode::Legacy)
    }

    #[test]
    fn null_is_bare() {
        assert_eq!(legacy(FieldValue::Null), "NULL");
    }

    #[test]
    fn bare_scalars() {
        assert_eq!(legacy(42i64), "42");
        assert_eq!(legacy(-7i64), "-7");
        assert_eq!(legacy(9.99), "9.99");
        assert_eq!(legacy(true), "True");
        assert_eq!(legacy(false), "False");
    }

    #[test]
    fn integral_float_keeps_fraction() {
        assert_eq!(legacy(1.0), "1.0");
        assert_eq!(legacy(-0.0), "-0.0");
        assert_eq!(legacy(0.5), "0.5");
    }

    #[test]
    fn non_finite_float() {
        assert_eq!(legacy(f64::NAN), "CAST('NaN' AS FLOAT64)");
        assert_eq!(legacy(f64::INFINITY), "CAST('inf' AS FLOAT64)");
        assert_eq!(legacy(f64::NEG_INFINITY), "CAST('-inf' AS FLOAT64)");
    }

    #[test]
    fn quoted_kinds() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        assert_eq!(legacy("a"), "'a'");
        assert_eq!(legacy(date), "'2024-06-16'");
    }

    #[test]
    fn datetime_micros_only_when_present() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        let whole = date.and_hms_opt(23, 24, 22).unwrap();
        let frac = date.and_hms_micro_opt(23, 24, 22, 715_454).unwrap();
        let small = date.and_hms_micro_opt(1, 2, 3, 40).unwrap();
        assert_eq!(legacy(whole), "'2024-06-16 23:24:22'");
        assert_eq!(legacy(frac), "'2024-06-16 23:24:22.715454'");
        assert_eq!(legacy(small), "'2024-06-16 01:02:03.000040'");
    }

    #[test]
    fn leap_second_fraction_stays_six_digits() {
        let date = NaiveDate::from_ymd_opt(2016, 12, 31).unwrap();
        let leap = date.and_hms_micro_opt(23, 59, 59, 1_150_000).unwrap();
        let leap_whole = date.and_hms_milli_opt(23, 59, 59, 1_000).unwrap();
        assert_eq!(legacy(leap), "'2016-12-31 23:59:60.150000'");
        assert_eq!(legacy(leap_whole), "'2016-12-31 23:59:60'");
    }

    #[test]
    fn legacy_does_not_escape() {
        assert_eq!(legacy("O'Brien"), "'O'Brien'");
        assert_eq!(legacy(r"C:\tmp"), r"'C:\tmp'");
    }

    #[test]
    fn escaped_mode() {
        let v = FieldValue::from("O'Brien\\\n");
        assert_eq!(format_literal(&v, LiteralMode::Escaped), r"'O\'Brien\\\n'");
        // Bare kinds are unaffected by the mode.
        assert_eq!(
            format_literal(&FieldValue::Integer(3), LiteralMode::Escaped),
            "3"
        );
    }

    #[test]
    fn value_list_joins_in_order() {
        let values = [
            FieldValue::from("a"),
            FieldValue::from(2i64),
            FieldValue::from(true),
            FieldValue::Null,
        ];
        assert_eq!(
            format_value_list(&values, LiteralMode::Legacy),
            "'a', 2, True, NULL"
        );
    }

    #[test]
    fn value_list_empty() {
        let empty: [FieldValue; 0] = [];
        assert_eq!(format_value_list(&empty, LiteralMode::Legacy), "");
    }
}
