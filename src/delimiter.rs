//! Field-delimiter candidates and content-based detection.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// A supported field separator. [`Delimiter::CANDIDATES`] lists detection
/// priority: tab wins over comma, comma over semicolon, semicolon over
/// colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Tab,
    Comma,
    Semicolon,
    Colon,
}

impl Delimiter {
    pub const CANDIDATES: [Delimiter; 4] = [
        Delimiter::Tab,
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Colon,
    ];

    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Colon => b':',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }

    pub fn name(self) -> &'static str {
        match self {
            Delimiter::Tab => "tab",
            Delimiter::Comma => "comma",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Colon => "colon",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "\t" | "tab" | "\\t" => Ok(Delimiter::Tab),
            "," | "comma" => Ok(Delimiter::Comma),
            ";" | "semicolon" => Ok(Delimiter::Semicolon),
            ":" | "colon" => Ok(Delimiter::Colon),
            other => Err(format!(
                "Unsupported delimiter '{other}'. Supported: tab, ',', ';', ':'"
            )),
        }
    }
}

/// Guesses the delimiter of a raw text blob. A candidate is consistent when
/// every non-empty line splits into the same field count, and that count is
/// at least two (a single column is no evidence of a delimiter). The first
/// consistent candidate in priority order wins.
pub fn detect(text: &str) -> Result<Delimiter> {
    Delimiter::CANDIDATES
        .into_iter()
        .find(|candidate| is_consistent(text, *candidate))
        .ok_or(TableError::NoDelimiterFound)
}

fn is_consistent(text: &str, delimiter: Delimiter) -> bool {
    let counts = field_counts(text, delimiter);
    match counts.first() {
        Some(&first) if first >= 2 => counts.iter().all_equal(),
        _ => false,
    }
}

fn field_counts(text: &str, delimiter: Delimiter) -> Vec<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter.as_byte())
        .quoting(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    reader
        .records()
        .filter_map(|record| record.ok())
        .map(|record| record.len())
        .collect()
}
