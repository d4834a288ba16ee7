use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::schema::DuplicatePolicy;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Generate CREATE TABLE statements from column labels and sample values",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a CREATE TABLE statement from labels and sample values
    Generate(GenerateArgs),
    /// Show how each column is normalized and typed without writing SQL
    Inspect(InspectArgs),
    /// Print the SQL identifier for each label
    Normalize(NormalizeArgs),
}

/// Where column labels and samples come from. Exactly one source is allowed.
#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["input", "names", "entries"])
))]
pub struct SourceArgs {
    /// Delimited (.csv/.tsv/.txt, '-' for stdin) or .json file of label/sample pairs
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
    /// File with one column label per line (pair with --samples)
    #[arg(long = "names", requires = "samples")]
    pub names: Option<PathBuf>,
    /// File with one sample value per line, aligned with --names
    #[arg(long = "samples", requires = "names")]
    pub samples: Option<PathBuf>,
    /// File with one `label,sample` pair per line
    #[arg(long = "entries")]
    pub entries: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Schema name (normalized; defaults to 'public')
    #[arg(long)]
    pub schema: Option<String>,
    /// Table name (normalized; defaults to 'table_name')
    #[arg(short = 't', long)]
    pub table: Option<String>,
    /// Output .sql file or directory (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Also write a header-only CSV template for data entry
    #[arg(long = "template")]
    pub template: Option<PathBuf>,
    /// How to handle labels that normalize to the same identifier
    #[arg(long = "duplicates", value_enum, default_value = "allow")]
    pub duplicates: DuplicatePolicy,
    /// Character encoding for the output files/stdout (defaults to utf-8)
    #[arg(long = "output-encoding")]
    pub output_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Labels to normalize
    #[arg(required = true)]
    pub labels: Vec<String>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
