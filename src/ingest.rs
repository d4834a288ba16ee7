//! Turns user-supplied inputs into ordered [`ColumnSpec`] lists.
//!
//! Four shapes are accepted:
//!
//! - delimited files (`.csv`, `.tsv`, `.txt` or `-` for stdin) with a header
//!   row, where the first column is the label and the second the sample;
//! - JSON arrays of `{"column": ..., "sample": ...}` objects, where a sample
//!   may also be a tagged date such as `{"date": "2025-01-01"}` or
//!   `{"datetime": "2025-01-01T08:30:00"}`;
//! - two parallel line lists (labels and samples);
//! - `label,sample` lines typed by hand.
//!
//! Validation failures are reported as [`IngestError`] and stop the whole
//! submission; nothing reaches the inference engine.

use std::{io::Read, path::Path};

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use encoding_rs::Encoding;
use log::debug;
use serde::Deserialize;

use crate::{
    cli::SourceArgs, error::IngestError, infer::SampleValue, io_utils, schema::ColumnSpec,
};

/// Column specs together with how they were supplied.
#[derive(Debug, Clone)]
pub struct LoadedColumns {
    pub columns: Vec<ColumnSpec>,
    /// True for file uploads, whose samples get the numeric coercion pass.
    pub from_file: bool,
}

/// Resolves whichever source the command line selected.
pub fn load_source(source: &SourceArgs) -> Result<LoadedColumns> {
    let encoding = io_utils::resolve_encoding(source.input_encoding.as_deref())?;
    if let Some(path) = &source.input {
        let columns = load_path(path, source.delimiter, encoding)?;
        return Ok(LoadedColumns {
            columns,
            from_file: true,
        });
    }
    let columns = match (&source.names, &source.samples, &source.entries) {
        (Some(names), Some(samples), _) => {
            let names_text = io_utils::read_text(names, encoding)?;
            let samples_text = io_utils::read_text(samples, encoding)?;
            from_parallel_lists(&names_text, &samples_text)
                .with_context(|| format!("Pairing {names:?} with {samples:?}"))?
        }
        (_, _, Some(entries)) => {
            let text = io_utils::read_text(entries, encoding)?;
            from_entry_lines(&text)
                .with_context(|| format!("Reading entries from {entries:?}"))?
        }
        _ => bail!("One of --input, --names/--samples or --entries is required"),
    };
    Ok(LoadedColumns {
        columns,
        from_file: false,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Delimited,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        if io_utils::is_dash(path) {
            return Ok(InputFormat::Delimited);
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext)
                if ["csv", "tsv", "txt"]
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known)) =>
            {
                Ok(InputFormat::Delimited)
            }
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(InputFormat::Json),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Loads column specs from a file, picking the reader from its extension.
pub fn load_path(
    path: &Path,
    delimiter: Option<u8>,
    encoding: &'static Encoding,
) -> Result<Vec<ColumnSpec>> {
    match InputFormat::from_path(path)? {
        InputFormat::Delimited => {
            let delimiter = io_utils::resolve_input_delimiter(path, delimiter);
            let reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
            read_delimited(reader, encoding)
                .with_context(|| format!("Reading columns from {path:?}"))
        }
        InputFormat::Json => {
            let text = io_utils::read_text(path, encoding)?;
            parse_json(&text).with_context(|| format!("Reading columns from {path:?}"))
        }
    }
}

pub fn read_delimited<R: Read>(
    mut reader: csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<ColumnSpec>> {
    let headers = io_utils::reader_headers(&mut reader, encoding)?;
    if headers.len() < 2 {
        return Err(IngestError::TooFewColumns {
            found: headers.len(),
        }
        .into());
    }
    debug!("Using '{}' as labels and '{}' as samples", headers[0], headers[1]);

    let mut columns = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let line = row_idx + 2;
        let record = record.with_context(|| format!("Reading row {line}"))?;
        let decoded = io_utils::decode_record(&record, encoding)?;
        let label = decoded[0].trim();
        if label.is_empty() {
            return Err(IngestError::BlankLabel { line }.into());
        }
        columns.push(ColumnSpec::new(label, SampleValue::from_text(&decoded[1])));
    }
    ensure_not_empty(columns).map_err(Into::into)
}

#[derive(Debug, Deserialize)]
struct JsonEntry {
    #[serde(alias = "name", alias = "label")]
    column: String,
    #[serde(default, alias = "value")]
    sample: serde_json::Value,
}

pub fn parse_json(text: &str) -> Result<Vec<ColumnSpec>> {
    let entries: Vec<JsonEntry> =
        serde_json::from_str(text).context("Parsing JSON column list")?;
    let mut columns = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let label = entry.column.trim();
        if label.is_empty() {
            return Err(IngestError::InvalidJson {
                index,
                reason: "column label is blank".to_string(),
            }
            .into());
        }
        let sample = json_sample(entry.sample).map_err(|reason| IngestError::InvalidJson {
            index,
            reason,
        })?;
        columns.push(ColumnSpec::new(label, sample));
    }
    ensure_not_empty(columns).map_err(Into::into)
}

fn json_sample(value: serde_json::Value) -> std::result::Result<SampleValue, String> {
    use serde_json::Value;
    match value {
        Value::Null => Ok(SampleValue::Missing),
        Value::String(s) => Ok(SampleValue::from_text(&s)),
        Value::Bool(b) => Ok(SampleValue::Text(b.to_string())),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(SampleValue::Integer(i)),
            (None, Some(f)) => Ok(SampleValue::Real(f)),
            (None, None) => Err(format!("number {n} is out of range")),
        },
        Value::Object(map) => tagged_date(&map),
        Value::Array(_) => {
            Err("sample must be a string, number, boolean, tagged date or null".to_string())
        }
    }
}

fn tagged_date(
    map: &serde_json::Map<String, serde_json::Value>,
) -> std::result::Result<SampleValue, String> {
    let mut entries = map.iter();
    let (Some((tag, value)), None) = (entries.next(), entries.next()) else {
        return Err("tagged sample must have exactly one key".to_string());
    };
    let Some(text) = value.as_str().map(str::trim) else {
        return Err(format!("'{tag}' sample must be a string"));
    };
    match tag.as_str() {
        "date" => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(SampleValue::Date)
            .map_err(|err| format!("invalid date '{text}': {err}")),
        "datetime" => NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| text.parse::<NaiveDateTime>())
            .map(SampleValue::DateTime)
            .map_err(|err| format!("invalid datetime '{text}': {err}")),
        other => Err(format!("unknown sample tag '{other}'")),
    }
}

/// Pairs a list of labels with a list of samples, one per line.
pub fn from_parallel_lists(names: &str, samples: &str) -> Result<Vec<ColumnSpec>, IngestError> {
    let names = split_lines(names);
    let samples = split_lines(samples);
    if names.len() != samples.len() {
        return Err(IngestError::LengthMismatch {
            names: names.len(),
            samples: samples.len(),
        });
    }
    if names.is_empty() {
        return Err(IngestError::EmptyInput);
    }

    let mut columns = Vec::with_capacity(names.len());
    for (idx, (name, sample)) in names.into_iter().zip(samples).enumerate() {
        if name.is_empty() {
            return Err(IngestError::BlankLabel { line: idx + 1 });
        }
        columns.push(ColumnSpec::new(name, SampleValue::from_text(sample)));
    }
    Ok(columns)
}

fn split_lines(text: &str) -> Vec<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('\n').map(str::trim).collect()
    }
}

/// Reads `label,sample` lines; blank lines are skipped.
pub fn from_entry_lines(text: &str) -> Result<Vec<ColumnSpec>, IngestError> {
    let mut columns = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let fields = raw.split(',').collect::<Vec<_>>();
        let [label, sample] = fields.as_slice() else {
            return Err(IngestError::MalformedRecord {
                line,
                raw: raw.to_string(),
            });
        };
        let label = label.trim();
        if label.is_empty() {
            return Err(IngestError::BlankLabel { line });
        }
        columns.push(ColumnSpec::new(label, SampleValue::from_text(sample.trim())));
    }
    ensure_not_empty(columns)
}

fn ensure_not_empty(columns: Vec<ColumnSpec>) -> Result<Vec<ColumnSpec>, IngestError> {
    if columns.is_empty() {
        Err(IngestError::EmptyInput)
    } else {
        Ok(columns)
    }
}
