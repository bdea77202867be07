use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::delimiter::Delimiter;

#[derive(Debug, Parser)]
#[command(author, version, about = "Inspect and convert nested-header data tables", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect the delimiter and write the inferred column layout to a .meta file
    Probe(ProbeArgs),
    /// Parse a table and rewrite it with another delimiter
    Convert(ConvertArgs),
    /// Print the first few rows as an aligned table
    Preview(PreviewArgs),
}

#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Input table file to inspect ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination .meta file path
    #[arg(short, long)]
    pub meta: PathBuf,
    /// Field delimiter (tab, ',', ';', ':'); detected from content when omitted
    #[arg(long)]
    pub delimiter: Option<Delimiter>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input table file ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output file path ('-' writes stdout)
    #[arg(short, long)]
    pub output: PathBuf,
    /// Input field delimiter; detected from content when omitted
    #[arg(long)]
    pub delimiter: Option<Delimiter>,
    /// Output field delimiter; resolved from the output extension when omitted
    #[arg(long = "output-delimiter")]
    pub output_delimiter: Option<Delimiter>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input table file ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// Field delimiter; detected from content when omitted
    #[arg(long)]
    pub delimiter: Option<Delimiter>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}
