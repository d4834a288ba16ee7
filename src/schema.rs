//! Column specs, inferred columns and `CREATE TABLE` assembly.
//!
//! The builder walks the supplied columns in order, normalizes each label,
//! infers each type and renders the statement. A synthetic `id SERIAL PRIMARY
//! KEY` column always comes first.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use clap::ValueEnum;
use itertools::Itertools;
use log::{debug, warn};
use serde::Serialize;

use crate::{
    error::SchemaError,
    identifier,
    infer::{self, Numeric, SampleValue, SqlType},
};

pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_TABLE: &str = "table_name";
pub const PRIMARY_KEY_LINE: &str = "id SERIAL PRIMARY KEY";
pub const TEMPLATE_METADATA_COLUMNS: [&str; 2] = ["action_type", "id"];

const INDENT: &str = "    ";

/// A raw column label with its sample value, as supplied by the input layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub raw_name: String,
    pub sample: SampleValue,
}

impl ColumnSpec {
    pub fn new(raw_name: impl Into<String>, sample: impl Into<SampleValue>) -> Self {
        Self {
            raw_name: raw_name.into(),
            sample: sample.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferredColumn {
    pub identifier: String,
    pub sql_type: SqlType,
}

impl InferredColumn {
    pub fn from_spec(spec: &ColumnSpec) -> Self {
        Self {
            identifier: identifier::normalize(&spec.raw_name),
            sql_type: infer::infer_sql_type(&spec.sample, &spec.raw_name),
        }
    }
}

/// Schema-qualified table name; both parts are normalized identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub schema: String,
    pub table: String,
}

impl QualifiedName {
    /// Blank parts fall back to `public` and `table_name`.
    pub fn new(schema: Option<&str>, table: Option<&str>) -> Self {
        Self {
            schema: normalize_or_default(schema, DEFAULT_SCHEMA),
            table: normalize_or_default(table, DEFAULT_TABLE),
        }
    }

    /// Reads `schema.table` or a bare `table`, splitting on the first `.`.
    pub fn parse(value: &str) -> Self {
        match value.split_once('.') {
            Some((schema, table)) => Self::new(Some(schema), Some(table)),
            None => Self::new(None, Some(value)),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

fn normalize_or_default(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => identifier::normalize(v),
        None => default.to_string(),
    }
}

/// How to treat two columns that normalize to the same identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Emit both columns as-is (the generated SQL will not run)
    #[default]
    Allow,
    /// Fail with an error naming both source labels
    Reject,
    /// Keep the first, append `_2`, `_3`, ... to later ones
    Suffix,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Convert numeric text samples to numbers before inference.
    pub coerce_numeric: bool,
    pub duplicates: DuplicatePolicy,
}

#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    options: BuildOptions,
}

impl SchemaBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn infer_columns(
        &self,
        columns: &[ColumnSpec],
    ) -> Result<Vec<InferredColumn>, SchemaError> {
        let prepared = if self.options.coerce_numeric {
            coerce_numeric_samples(columns.to_vec())
        } else {
            columns.to_vec()
        };

        let mut inferred = Vec::with_capacity(prepared.len());
        for spec in &prepared {
            let (sql_type, rule) = infer::classify(&spec.sample, &spec.raw_name);
            let identifier = identifier::normalize(&spec.raw_name);
            debug!(
                "Column '{}' -> {identifier} {sql_type} ({})",
                spec.raw_name,
                rule.describe()
            );
            inferred.push(InferredColumn {
                identifier,
                sql_type,
            });
        }

        resolve_duplicates(&mut inferred, &prepared, self.options.duplicates)?;
        Ok(inferred)
    }

    pub fn build(
        &self,
        table: &QualifiedName,
        columns: &[ColumnSpec],
    ) -> Result<String, SchemaError> {
        let inferred = self.infer_columns(columns)?;
        Ok(render_create_table(table, &inferred))
    }
}

/// Renders `CREATE TABLE` for `table_identifier` (`schema.table` or `table`)
/// with default options.
pub fn build(table_identifier: &str, columns: &[ColumnSpec]) -> String {
    let table = QualifiedName::parse(table_identifier);
    let inferred = columns
        .iter()
        .map(InferredColumn::from_spec)
        .collect::<Vec<_>>();
    warn_on_duplicates(&inferred, columns);
    render_create_table(&table, &inferred)
}

pub fn render_create_table(table: &QualifiedName, columns: &[InferredColumn]) -> String {
    let body = std::iter::once(PRIMARY_KEY_LINE.to_string())
        .chain(
            columns
                .iter()
                .map(|column| format!("{} {}", column.identifier, column.sql_type)),
        )
        .map(|line| format!("{INDENT}{line}"))
        .join(",\n");
    format!("CREATE TABLE {table} (\n{body}\n);")
}

/// Header row for the companion data-entry sheet: two metadata columns, then
/// every identifier in order.
pub fn template_headers(columns: &[InferredColumn]) -> Vec<String> {
    TEMPLATE_METADATA_COLUMNS
        .iter()
        .map(|name| name.to_string())
        .chain(columns.iter().map(|column| column.identifier.clone()))
        .collect()
}

/// Replaces text samples that read as numbers with numeric samples.
///
/// Runs over the whole column list before inference. The `INT` hint is text
/// and stays untouched.
pub fn coerce_numeric_samples(columns: Vec<ColumnSpec>) -> Vec<ColumnSpec> {
    columns
        .into_iter()
        .map(|mut spec| {
            if let SampleValue::Text(text) = &spec.sample
                && let Some(numeric) = infer::parse_numeric_text(text)
            {
                spec.sample = match numeric {
                    Numeric::Integer(value) => SampleValue::Integer(value),
                    Numeric::Real(value) => SampleValue::Real(value),
                };
            }
            spec
        })
        .collect()
}

fn resolve_duplicates(
    inferred: &mut [InferredColumn],
    specs: &[ColumnSpec],
    policy: DuplicatePolicy,
) -> Result<(), SchemaError> {
    match policy {
        DuplicatePolicy::Allow => {
            warn_on_duplicates(inferred, specs);
            Ok(())
        }
        DuplicatePolicy::Reject => match find_duplicate(inferred) {
            Some((first, second)) => Err(SchemaError::DuplicateIdentifier {
                identifier: inferred[second].identifier.clone(),
                first: specs[first].raw_name.clone(),
                second: specs[second].raw_name.clone(),
            }),
            None => Ok(()),
        },
        DuplicatePolicy::Suffix => {
            suffix_duplicates(inferred);
            Ok(())
        }
    }
}

fn find_duplicate(columns: &[InferredColumn]) -> Option<(usize, usize)> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (idx, column) in columns.iter().enumerate() {
        if let Some(&first) = seen.get(column.identifier.as_str()) {
            return Some((first, idx));
        }
        seen.insert(column.identifier.as_str(), idx);
    }
    None
}

fn warn_on_duplicates(columns: &[InferredColumn], specs: &[ColumnSpec]) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (idx, column) in columns.iter().enumerate() {
        match seen.get(column.identifier.as_str()) {
            Some(&first) => warn!(
                "Columns '{}' and '{}' share identifier '{}'; emitting both",
                specs[first].raw_name, specs[idx].raw_name, column.identifier
            ),
            None => {
                seen.insert(column.identifier.as_str(), idx);
            }
        }
    }
}

fn suffix_duplicates(columns: &mut [InferredColumn]) {
    let mut taken: HashSet<String> = columns.iter().map(|c| c.identifier.clone()).collect();
    let mut emitted: HashSet<String> = HashSet::new();
    for column in columns.iter_mut() {
        if emitted.insert(column.identifier.clone()) {
            continue;
        }
        let base = column.identifier.clone();
        let mut counter = 2usize;
        let renamed = loop {
            let candidate = format!("{base}_{counter}");
            if !taken.contains(&candidate) {
                break candidate;
            }
            counter += 1;
        };
        debug!("Renamed duplicate identifier '{base}' to '{renamed}'");
        taken.insert(renamed.clone());
        emitted.insert(renamed.clone());
        column.identifier = renamed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, sample: &str) -> ColumnSpec {
        ColumnSpec::new(name, SampleValue::from_text(sample))
    }

    #[test]
    fn build_renders_student_table() {
        let columns = vec![
            spec("Họ và tên", "Nguyễn Văn A"),
            spec("Ngày sinh", "01/01/2000"),
            spec("Điểm trung bình", "8.5"),
        ];
        let sql = build("hoc_sinh", &columns);
        assert_eq!(
            sql,
            "CREATE TABLE public.hoc_sinh (\n    id SERIAL PRIMARY KEY,\n    ho_va_ten TEXT,\n    ngay_sinh DATE,\n    diem_trung_binh DOUBLE PRECISION\n);"
        );
    }

    #[test]
    fn build_without_columns_keeps_primary_key_only() {
        assert_eq!(
            build("t", &[]),
            "CREATE TABLE public.t (\n    id SERIAL PRIMARY KEY\n);"
        );
    }

    #[test]
    fn qualified_name_defaults_blank_parts() {
        assert_eq!(QualifiedName::new(None, None).to_string(), "public.table_name");
        assert_eq!(
            QualifiedName::new(Some("  "), Some("\t")).to_string(),
            "public.table_name"
        );
        assert_eq!(
            QualifiedName::new(Some("Kế toán"), Some("Giao dịch")).to_string(),
            "ke_toan.giao_dich"
        );
    }

    #[test]
    fn qualified_name_parse_splits_on_first_dot() {
        let name = QualifiedName::parse("Sub Public.Học sinh");
        assert_eq!(name.schema, "sub_public");
        assert_eq!(name.table, "hoc_sinh");
        assert_eq!(QualifiedName::parse("orders").to_string(), "public.orders");
        assert_eq!(QualifiedName::parse(".orders").to_string(), "public.orders");
    }

    #[test]
    fn duplicates_pass_through_by_default() {
        let columns = vec![spec("Tên", "a"), spec("TÊN", "b")];
        let sql = build("t", &columns);
        assert_eq!(sql.matches("ten TEXT").count(), 2);
    }

    #[test]
    fn duplicates_can_be_rejected() {
        let builder = SchemaBuilder::new(BuildOptions {
            duplicates: DuplicatePolicy::Reject,
            ..BuildOptions::default()
        });
        let err = builder
            .infer_columns(&[spec("Tên", "a"), spec("x", "1"), spec("TÊN", "b")])
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateIdentifier {
                identifier: "ten".to_string(),
                first: "Tên".to_string(),
                second: "TÊN".to_string(),
            }
        );
    }

    #[test]
    fn duplicates_can_be_suffixed() {
        let builder = SchemaBuilder::new(BuildOptions {
            duplicates: DuplicatePolicy::Suffix,
            ..BuildOptions::default()
        });
        let columns = builder
            .infer_columns(&[
                spec("ten", "a"),
                spec("ten_2", "b"),
                spec("Tên", "c"),
                spec("TEN", "d"),
            ])
            .expect("suffixed");
        let names = columns.iter().map(|c| c.identifier.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["ten", "ten_2", "ten_3", "ten_4"]);
    }

    #[test]
    fn coercion_converts_numeric_text_only() {
        let coerced = coerce_numeric_samples(vec![
            spec("a", "1.000"),
            spec("b", "1e3"),
            spec("c", "INT"),
            spec("d", "01/01/2025"),
            spec("e", ""),
        ]);
        assert_eq!(coerced[0].sample, SampleValue::Integer(1000));
        assert_eq!(coerced[1].sample, SampleValue::Real(1000.0));
        assert_eq!(coerced[2].sample, SampleValue::Text("INT".to_string()));
        assert_eq!(coerced[3].sample, SampleValue::Text("01/01/2025".to_string()));
        assert_eq!(coerced[4].sample, SampleValue::Missing);
    }

    #[test]
    fn coercion_does_not_change_inferred_types() {
        let columns = vec![
            spec("Ngân hàng", "ACB"),
            spec("Ngày giao dịch", "01/01/2025"),
            spec("Số tiền", "1,000"),
            spec("Số lượng", "INT"),
            spec("Ghi chú", ""),
            spec("Mốc", "2025-01-01 10:00:00"),
        ];
        let plain = SchemaBuilder::default().infer_columns(&columns).unwrap();
        let coerced = SchemaBuilder::new(BuildOptions {
            coerce_numeric: true,
            ..BuildOptions::default()
        })
        .infer_columns(&columns)
        .unwrap();
        assert_eq!(plain, coerced);
    }

    #[test]
    fn template_headers_prefix_metadata_columns() {
        let columns = SchemaBuilder::default()
            .infer_columns(&[spec("Ngân hàng", "ACB"), spec("Số tiền", "1000")])
            .unwrap();
        assert_eq!(
            template_headers(&columns),
            ["action_type", "id", "ngan_hang", "so_tien"]
        );
    }
}
