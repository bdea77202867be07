use thiserror::Error;

use crate::data::DataType;

/// Errors raised by the table engine. Parse errors abort table construction
/// entirely; mutation errors leave the table in its prior state.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("no delimiter candidate splits every line into the same number of fields")]
    NoDelimiterFound,
    #[error("line {line}: expected {expected} field(s), found {found}")]
    IrregularRowLength {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("'{label}' carries {found} value(s) where {expected} are required")]
    ShapeMismatch {
        label: String,
        found: usize,
        expected: usize,
    },
    #[error("column '{column}' holds {expected} values, got {found}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        found: DataType,
    },
    #[error("unrecognized table file extension '{0}'")]
    UnknownFileExtension(String),
    #[error("field '{field}' on line {line} requires quoting, which the table format forbids")]
    UnwritableField { line: usize, field: String },
}

pub type Result<T> = std::result::Result<T, TableError>;
