//! Header-only CSV template for filling in rows of the generated table.

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::info;

use crate::{
    io_utils,
    schema::{InferredColumn, template_headers},
};

/// Renders the template as delimited text: one header row, no data rows.
pub fn render_template(columns: &[InferredColumn], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer
        .write_record(template_headers(columns))
        .context("Writing template header")?;
    let bytes = writer
        .into_inner()
        .map_err(|err| err.into_error())
        .context("Flushing template")?;
    String::from_utf8(bytes).context("Template is not valid UTF-8")
}

pub fn write_template(
    path: &Path,
    columns: &[InferredColumn],
    encoding: &'static Encoding,
) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(path, None);
    let rendered = render_template(columns, delimiter)?;
    io_utils::write_text(Some(path), &rendered, encoding)?;
    info!(
        "Template with {} column(s) written to {:?}",
        columns.len() + 2,
        path
    );
    Ok(())
}
