pub mod cli;
pub mod error;
pub mod generate;
pub mod identifier;
pub mod infer;
pub mod ingest;
pub mod inspect;
pub mod io_utils;
pub mod patterns;
pub mod schema;
pub mod table;
pub mod template;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::{Cli, Commands};

pub use crate::{
    identifier::normalize,
    infer::{SampleValue, SqlType, infer_sql_type},
    schema::{ColumnSpec, InferredColumn, build},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sample_ddl", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate::execute(&args),
        Commands::Inspect(args) => inspect::execute(&args),
        Commands::Normalize(args) => handle_normalize(&args),
    }
}

fn handle_normalize(args: &cli::NormalizeArgs) -> Result<()> {
    for label in &args.labels {
        let normalized = identifier::normalize(label);
        debug!("'{label}' -> '{normalized}'");
        println!("{normalized}");
    }
    Ok(())
}
