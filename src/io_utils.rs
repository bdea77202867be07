//! File-level text I/O: encoding resolution, BOM-aware decoding, the `-`
//! stdin/stdout convention, and the recognized table file extensions.
//!
//! Field-level reading and writing lives in `parser` and `writer`; this
//! module only turns paths into decoded text and back.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use anyhow::{Context, anyhow};
use encoding_rs::{Encoding, UTF_8};
use encoding_rs_io::DecodeReaderBytesBuilder;

use crate::delimiter::Delimiter;
use crate::error::TableError;

/// Recognized table file extensions and their default delimiters. Content
/// detection still overrides the default on the read side; the extension is
/// authoritative only when writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFileExtension {
    Csv,
    Tsv,
    Txt,
}

impl TableFileExtension {
    pub fn from_path(path: &Path) -> crate::error::Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Ok(TableFileExtension::Csv),
            "tsv" => Ok(TableFileExtension::Tsv),
            "txt" => Ok(TableFileExtension::Txt),
            other => Err(TableError::UnknownFileExtension(other.to_string())),
        }
    }

    pub fn default_delimiter(self) -> Delimiter {
        match self {
            TableFileExtension::Tsv => Delimiter::Tab,
            TableFileExtension::Csv | TableFileExtension::Txt => Delimiter::Comma,
        }
    }
}

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> anyhow::Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

/// Reads a file (or stdin for `-`) into a string, sniffing a BOM and falling
/// back to the given encoding.
pub fn read_to_string(path: &Path, encoding: &'static Encoding) -> anyhow::Result<String> {
    let source: Box<dyn Read> = if is_dash(path) {
        Box::new(std::io::stdin().lock())
    } else {
        Box::new(File::open(path).with_context(|| format!("Opening input file {path:?}"))?)
    };
    let mut decoder = DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding))
        .bom_sniffing(true)
        .build(source);
    let mut text = String::new();
    decoder
        .read_to_string(&mut text)
        .with_context(|| format!("Decoding {path:?} as {}", encoding.name()))?;
    Ok(text)
}

/// Writes text to a file, or to stdout for `-`.
pub fn write_text(path: &Path, content: &str) -> anyhow::Result<()> {
    if is_dash(path) {
        std::io::stdout()
            .write_all(content.as_bytes())
            .context("Writing to stdout")
    } else {
        std::fs::write(path, content).with_context(|| format!("Writing output file {path:?}"))
    }
}
