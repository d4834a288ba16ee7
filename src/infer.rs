//! Sample-value type inference.
//!
//! A column's SQL type is decided from its raw label and a single sample
//! value. Rules are tried in a fixed order and the first hit wins:
//!
//! | # | Rule | Result |
//! |---|------|--------|
//! | 1 | lowercased label contains `ngay` | `DATE` |
//! | 2 | text sample equal to `INT` (trimmed, any case) | `INTEGER` |
//! | 3 | missing sample | `TEXT` |
//! | 4 | native date or date-time sample | `DATE` |
//! | 5 | text sample with a recognised date shape | `DATE` |
//! | 6 | numeric sample, or text numeric once `,` and `.` are removed | `DOUBLE PRECISION` |
//! | 7 | anything else | `TEXT` |
//!
//! Rule 1 overrides the sample, so `ngay_count` with sample `5` is still a
//! `DATE` column. The label is matched as written: `Số ngày nghỉ` does not
//! contain `ngay` and falls through to the sample rules.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::patterns;

const DATE_NAME_HINT: &str = "ngay";
const INTEGER_HINT: &str = "INT";

/// One representative value for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Missing,
}

impl SampleValue {
    /// Wraps decoded text, treating blank cells as missing.
    pub fn from_text(value: &str) -> Self {
        if value.trim().is_empty() {
            SampleValue::Missing
        } else {
            SampleValue::Text(value.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, SampleValue::Missing)
    }

    pub fn as_display(&self) -> String {
        match self {
            SampleValue::Text(s) => s.clone(),
            SampleValue::Integer(i) => i.to_string(),
            SampleValue::Real(f) => f.to_string(),
            SampleValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            SampleValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            SampleValue::Missing => String::new(),
        }
    }
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl From<&str> for SampleValue {
    fn from(value: &str) -> Self {
        SampleValue::Text(value.to_string())
    }
}

impl From<i64> for SampleValue {
    fn from(value: i64) -> Self {
        SampleValue::Integer(value)
    }
}

impl From<f64> for SampleValue {
    fn from(value: f64) -> Self {
        SampleValue::Real(value)
    }
}

impl From<NaiveDate> for SampleValue {
    fn from(value: NaiveDate) -> Self {
        SampleValue::Date(value)
    }
}

impl From<NaiveDateTime> for SampleValue {
    fn from(value: NaiveDateTime) -> Self {
        SampleValue::DateTime(value)
    }
}

impl<T: Into<SampleValue>> From<Option<T>> for SampleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SampleValue::Missing, Into::into)
    }
}

/// SQL column types the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Integer,
    DoublePrecision,
    Date,
    Text,
}

impl SqlType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Integer => "INTEGER",
            SqlType::DoublePrecision => "DOUBLE PRECISION",
            SqlType::Date => "DATE",
            SqlType::Text => "TEXT",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl Serialize for SqlType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_sql())
    }
}

/// The rule that decided a column's type, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    DateNameHint,
    IntegerHint,
    MissingSample,
    NativeDate,
    DateLiteral,
    Numeric,
    Fallback,
}

impl Rule {
    pub fn describe(&self) -> &'static str {
        match self {
            Rule::DateNameHint => "label mentions ngay",
            Rule::IntegerHint => "explicit INT hint",
            Rule::MissingSample => "no sample",
            Rule::NativeDate => "native date value",
            Rule::DateLiteral => "date-shaped text",
            Rule::Numeric => "numeric value",
            Rule::Fallback => "free text",
        }
    }
}

/// Numeric reading of a text sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Integer(i64),
    Real(f64),
}

/// Parses text as a number after removing `,` and `.` separators.
///
/// Integers are tried first, then finite floats (exponent forms such as
/// `1e5`, or integers too large for `i64`). Only ASCII digits count, and
/// `inf`/`nan` spellings, `_` digit grouping and overflowing exponents like
/// `1e400` stay text, which is stricter than a Python `float()` probe.
pub fn parse_numeric_text(value: &str) -> Option<Numeric> {
    let stripped: String = value
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ',' | '.'))
        .collect();
    if !stripped.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Ok(parsed) = stripped.parse::<i64>() {
        return Some(Numeric::Integer(parsed));
    }
    if stripped
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E'))
    {
        return None;
    }
    stripped
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .map(Numeric::Real)
}

/// True when the lowercased raw label contains `ngay`. Accented spellings
/// such as `ngày` do not match.
pub fn has_date_name_hint(raw_column_name: &str) -> bool {
    raw_column_name.to_lowercase().contains(DATE_NAME_HINT)
}

fn is_integer_hint(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(INTEGER_HINT)
}

/// Decides the SQL type for a column and reports which rule fired.
pub fn classify(sample: &SampleValue, raw_column_name: &str) -> (SqlType, Rule) {
    if has_date_name_hint(raw_column_name) {
        return (SqlType::Date, Rule::DateNameHint);
    }
    match sample {
        SampleValue::Text(text) if is_integer_hint(text) => (SqlType::Integer, Rule::IntegerHint),
        SampleValue::Missing => (SqlType::Text, Rule::MissingSample),
        SampleValue::Date(_) | SampleValue::DateTime(_) => (SqlType::Date, Rule::NativeDate),
        SampleValue::Text(text) if patterns::is_date_literal(text) => {
            (SqlType::Date, Rule::DateLiteral)
        }
        SampleValue::Integer(_) | SampleValue::Real(_) => {
            (SqlType::DoublePrecision, Rule::Numeric)
        }
        SampleValue::Text(text) if parse_numeric_text(text).is_some() => {
            (SqlType::DoublePrecision, Rule::Numeric)
        }
        SampleValue::Text(_) => (SqlType::Text, Rule::Fallback),
    }
}

/// Infers the SQL type for one column from its sample value and raw label.
pub fn infer_sql_type(sample: &SampleValue, raw_column_name: &str) -> SqlType {
    classify(sample, raw_column_name).0
}
