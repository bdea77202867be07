use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// Declared value type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Number,
    String,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Number => "number",
            DataType::String => "string",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "number" | "num" | "double" | "float" => Ok(DataType::Number),
            "string" | "str" | "text" => Ok(DataType::String),
            other => Err(format!("Unknown column type '{other}'")),
        }
    }
}

/// A single typed cell. `None` is the null produced by an empty field; it
/// keeps the column's type so a later edit can be type-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(Option<f64>),
    String(Option<String>),
}

impl Value {
    pub fn number(value: f64) -> Self {
        Value::Number(Some(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Value::String(Some(value.into()))
    }

    /// The null cell for a column of the given type.
    pub fn empty(data_type: DataType) -> Self {
        match data_type {
            DataType::Number => Value::Number(None),
            DataType::String => Value::String(None),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Value::Number(_) => DataType::Number,
            Value::String(_) => DataType::String,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Value::Number(n) => n.is_none(),
            Value::String(s) => s.is_none(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => *n,
            Value::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => s.as_deref(),
            Value::Number(_) => None,
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            Value::Number(Some(n)) => format_number(*n),
            Value::String(Some(s)) => s.clone(),
            Value::Number(None) | Value::String(None) => String::new(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Renders a number so that it reads back as numeric: integral values keep a
/// trailing `.0` rather than collapsing to a bare integer.
pub fn format_number(value: f64) -> String {
    let text = value.to_string();
    if text.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        format!("{text}.0")
    } else {
        text
    }
}

/// Whether a raw field parses as a floating-point number. Empty fields do
/// not count as numeric.
pub fn is_numeric(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

/// Converts a raw field into a typed cell. An empty field becomes the null
/// of the column type; a non-numeric field in a number column is a
/// [`TableError::TypeMismatch`].
pub fn parse_cell(raw: &str, data_type: DataType, column: &str) -> Result<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::empty(data_type));
    }
    match data_type {
        DataType::Number => trimmed
            .parse::<f64>()
            .map(Value::number)
            .map_err(|_| TableError::TypeMismatch {
                column: column.to_string(),
                expected: DataType::Number,
                found: DataType::String,
            }),
        DataType::String => Ok(Value::string(trimmed)),
    }
}
