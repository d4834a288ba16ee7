//! Per-column report: label, identifier, sample, type and the deciding rule.

use anyhow::Result;
use log::info;

use crate::{
    cli::InspectArgs,
    identifier,
    infer::{self, Rule, SampleValue},
    ingest, patterns,
    schema::{ColumnSpec, coerce_numeric_samples},
    table,
};

const HEADERS: [&str; 6] = ["#", "label", "identifier", "sample", "type", "rule"];

pub fn execute(args: &InspectArgs) -> Result<()> {
    let loaded = ingest::load_source(&args.source)?;
    let columns = if loaded.from_file {
        coerce_numeric_samples(loaded.columns)
    } else {
        loaded.columns
    };
    table::print_table(&HEADERS, &report_rows(&columns));
    info!("Inspected {} column(s)", columns.len());
    Ok(())
}

pub fn report_rows(columns: &[ColumnSpec]) -> Vec<Vec<String>> {
    columns
        .iter()
        .enumerate()
        .map(|(idx, spec)| {
            let (sql_type, rule) = infer::classify(&spec.sample, &spec.raw_name);
            vec![
                (idx + 1).to_string(),
                spec.raw_name.clone(),
                identifier::normalize(&spec.raw_name),
                spec.sample.as_display(),
                sql_type.to_string(),
                describe_rule(rule, &spec.sample),
            ]
        })
        .collect()
}

fn describe_rule(rule: Rule, sample: &SampleValue) -> String {
    match (rule, sample) {
        (Rule::DateLiteral, SampleValue::Text(text)) => match patterns::matching_format(text) {
            Some(format) => format!("{} ({format})", rule.describe()),
            None => rule.describe().to_string(),
        },
        _ => rule.describe().to_string(),
    }
}
