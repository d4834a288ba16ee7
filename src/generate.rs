use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::GenerateArgs,
    ingest, io_utils,
    schema::{BuildOptions, QualifiedName, SchemaBuilder, render_create_table},
    template,
};

pub fn execute(args: &GenerateArgs) -> Result<()> {
    let output_encoding = io_utils::resolve_encoding(args.output_encoding.as_deref())?;
    let loaded = ingest::load_source(&args.source)?;
    let table = QualifiedName::new(args.schema.as_deref(), args.table.as_deref());
    info!(
        "Generating {} from {} column(s)",
        table,
        loaded.columns.len()
    );

    let builder = SchemaBuilder::new(BuildOptions {
        coerce_numeric: loaded.from_file,
        duplicates: args.duplicates,
    });
    let inferred = builder
        .infer_columns(&loaded.columns)
        .context("Inferring column types")?;
    let sql = render_create_table(&table, &inferred);

    let destination = resolve_sql_path(args.output.as_deref(), &table);
    let mut text = sql;
    text.push('\n');
    io_utils::write_text(destination.as_deref(), &text, output_encoding)?;
    if let Some(path) = &destination {
        info!("CREATE TABLE for {table} written to {path:?}");
    }

    if let Some(path) = &args.template {
        template::write_template(path, &inferred, output_encoding)
            .with_context(|| format!("Writing template to {path:?}"))?;
    }
    Ok(())
}

/// A directory output gets `<table>.sql` inside it; `-` or nothing means stdout.
pub fn resolve_sql_path(output: Option<&Path>, table: &QualifiedName) -> Option<PathBuf> {
    match output {
        Some(path) if io_utils::is_dash(path) => None,
        Some(path) if path.is_dir() => Some(path.join(format!("{}.sql", table.table))),
        Some(path) => Some(path.to_path_buf()),
        None => None,
    }
}
