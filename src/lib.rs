pub mod cli;
pub mod column;
pub mod data;
pub mod delimiter;
pub mod error;
pub mod io_utils;
pub mod parser;
pub mod preview;
pub mod row;
pub mod table;
pub mod tree;
pub mod undo;
pub mod variable;
pub mod writer;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};
use serde::Serialize;

use crate::cli::{Cli, Commands};
use crate::data::DataType;
use crate::delimiter::Delimiter;
use crate::io_utils::TableFileExtension;
use crate::table::DataTable;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("geotable", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Probe(args) => handle_probe(&args),
        Commands::Convert(args) => handle_convert(&args),
        Commands::Preview(args) => handle_preview(&args),
    }
}

fn handle_probe(args: &cli::ProbeArgs) -> Result<()> {
    let (table, delimiter) =
        load_table(&args.input, args.delimiter, args.input_encoding.as_deref())?;
    info!(
        "Probed '{}' using {} delimiter",
        args.input.display(),
        delimiter
    );
    let report = ProbeReport::of(&table, delimiter);
    let file = std::fs::File::create(&args.meta)
        .with_context(|| format!("Creating meta file {:?}", args.meta))?;
    serde_yaml::to_writer(file, &report).context("Writing meta YAML")?;
    info!(
        "Layout for {} column(s) across {} row(s) written to {:?}",
        report.column_count, report.row_count, args.meta
    );
    Ok(())
}

fn handle_convert(args: &cli::ConvertArgs) -> Result<()> {
    let (table, input_delimiter) =
        load_table(&args.input, args.delimiter, args.input_encoding.as_deref())?;
    let output_delimiter = match args.output_delimiter {
        Some(delimiter) => delimiter,
        None => TableFileExtension::from_path(&args.output)
            .map(TableFileExtension::default_delimiter)
            .unwrap_or(input_delimiter),
    };
    let content = writer::write_table(&table, output_delimiter)
        .with_context(|| format!("Rendering table with {output_delimiter} delimiter"))?;
    io_utils::write_text(&args.output, &content)?;
    info!(
        "Wrote {} row(s) in {} segment(s) to {:?} ({} delimiter)",
        table.row_count(),
        table.row_tree().segments().count(),
        args.output,
        output_delimiter
    );
    Ok(())
}

fn handle_preview(args: &cli::PreviewArgs) -> Result<()> {
    let (table, _) = load_table(&args.input, args.delimiter, args.input_encoding.as_deref())?;
    print!("{}", preview::render_preview(&table, args.rows));
    info!(
        "Displayed up to {} of {} row(s) from {:?}",
        args.rows,
        table.row_count(),
        args.input
    );
    Ok(())
}

/// Reads, decodes, and parses a table, resolving the delimiter from the
/// explicit flag, content detection, or (as a last resort for single-column
/// files) the file extension default.
fn load_table(
    input: &Path,
    delimiter: Option<Delimiter>,
    encoding_label: Option<&str>,
) -> Result<(DataTable, Delimiter)> {
    let encoding = io_utils::resolve_encoding(encoding_label)?;
    let text = io_utils::read_to_string(input, encoding)?;
    let delimiter = match delimiter {
        Some(delimiter) => delimiter,
        None => match delimiter::detect(&text) {
            Ok(detected) => detected,
            Err(err) => {
                let fallback = TableFileExtension::from_path(input)
                    .map(TableFileExtension::default_delimiter)
                    .with_context(|| format!("Detecting delimiter of {input:?}: {err}"))?;
                debug!("Detection failed for {input:?}; falling back to {fallback}");
                fallback
            }
        },
    };
    let label = if io_utils::is_dash(input) {
        "stdin".to_string()
    } else {
        input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string())
    };
    let table = parser::parse_table(&text, delimiter, &label)
        .with_context(|| format!("Parsing table from {input:?}"))?;
    Ok((table, delimiter))
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    label: String,
    delimiter: Delimiter,
    header_depth: usize,
    column_count: usize,
    row_count: usize,
    segment_count: usize,
    columns: Vec<ProbeColumn>,
}

#[derive(Debug, Serialize)]
struct ProbeColumn {
    title: String,
    datatype: DataType,
}

impl ProbeReport {
    fn of(table: &DataTable, delimiter: Delimiter) -> Self {
        ProbeReport {
            label: table.label().to_string(),
            delimiter,
            header_depth: table.column_tree().header_depth(),
            column_count: table.column_count(),
            row_count: table.row_count(),
            segment_count: table.row_tree().segments().count(),
            columns: table
                .column_tree()
                .columns()
                .map(|leaf| ProbeColumn {
                    title: leaf.label.replace('\n', " "),
                    datatype: leaf.payload,
                })
                .collect(),
        }
    }
}
