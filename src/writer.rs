//! Rendering a [`DataTable`] back to delimited text.
//!
//! The output is the labeled layout the parser treats as canonical:
//! `header_depth` header lines with forward-filled category labels and
//! multi-line column titles split across lines, then one marker line per
//! segment and one line per row. Writing and parsing are mutual inverses:
//! `parse(write(t)) == t`, and `write(parse(text))` reproduces
//! labeled-layout text up to whitespace padding.

use std::path::Path;

use crate::column::ColumnNode;
use crate::data::Value;
use crate::delimiter::Delimiter;
use crate::error::{Result, TableError};
use crate::io_utils::{self, TableFileExtension};
use crate::table::DataTable;
use crate::tree::Node;

/// Renders the table as one string, lines terminated with `\n`.
pub fn write_table(table: &DataTable, delimiter: Delimiter) -> Result<String> {
    let lines = write_lines(table, delimiter)?;
    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    Ok(text)
}

/// Renders the table as an ordered sequence of text lines.
pub fn write_lines(table: &DataTable, delimiter: Delimiter) -> Result<Vec<String>> {
    let records = render_records(table);
    let mut lines = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        for field in record {
            if field.contains(delimiter.as_char()) || field.contains(['\n', '\r']) {
                return Err(TableError::UnwritableField {
                    line: index + 1,
                    field: field.clone(),
                });
            }
        }
        lines.push(record.join(&delimiter.as_char().to_string()));
    }
    Ok(lines)
}

/// Writes the table to a file, resolving the delimiter from the path's
/// extension.
pub fn write_to_path(table: &DataTable, path: &Path) -> anyhow::Result<()> {
    let delimiter = TableFileExtension::from_path(path)?.default_delimiter();
    let content = write_table(table, delimiter)?;
    io_utils::write_text(path, &content)
}

/// The header lines as a field grid: one record per header line, a blank
/// label field first, category labels at their span starts, multi-line
/// titles split vertically.
pub(crate) fn header_records(table: &DataTable) -> Vec<Vec<String>> {
    let depth = table.column_tree().header_depth();
    let width = 1 + table.column_count();
    let mut records: Vec<Vec<String>> = vec![vec![String::new(); width]; depth];
    let mut cursor = 1;
    for node in &table.column_tree().children {
        fill_header(node, 0, &mut records, &mut cursor);
    }
    records
}

fn render_records(table: &DataTable) -> Vec<Vec<String>> {
    let width = 1 + table.column_count();
    let mut records = header_records(table);

    for segment in table.row_tree().segments() {
        let mut marker = vec![String::new(); width];
        marker[0] = segment.label.clone();
        records.push(marker);
        for row in segment.children.iter().filter_map(Node::as_leaf) {
            let mut record = Vec::with_capacity(width);
            record.push(row.label.clone());
            record.extend(row.payload.iter().map(Value::as_display));
            records.push(record);
        }
    }
    records
}

fn fill_header(node: &ColumnNode, line: usize, records: &mut [Vec<String>], cursor: &mut usize) {
    match node {
        Node::Leaf(leaf) => {
            for (offset, part) in leaf.label.lines().enumerate() {
                records[line + offset][*cursor] = part.to_string();
            }
            *cursor += 1;
        }
        Node::Branch(branch) => {
            // a category with no leaf columns occupies no field; skip it
            if node.count_leaves() == 0 {
                return;
            }
            records[line][*cursor] = branch.label.clone();
            for child in &branch.children {
                fill_header(child, line + 1, records, cursor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnTree, category, number_column, string_column};
    use crate::row::{RowTree, data_row, segment};

    #[test]
    fn renders_nested_headers_with_forward_fill() {
        let columns = ColumnTree::new(vec![category(
            "Cat1",
            vec![number_column("Col1"), number_column("Col2")],
        )]);
        let rows = RowTree::new(vec![segment(
            "Seg1",
            vec![data_row(
                "Seg1:Row1",
                vec![Value::number(1.0), Value::number(2.0)],
            )],
        )]);
        let table = DataTable::new("t", columns, rows).unwrap();
        let lines = write_lines(&table, Delimiter::Comma).unwrap();
        assert_eq!(
            lines,
            vec![",Cat1,", ",Col1,Col2", "Seg1,,", "Seg1:Row1,1.0,2.0"]
        );
    }

    #[test]
    fn splits_multi_line_titles_across_header_lines() {
        let columns = ColumnTree::new(vec![string_column("upper\nlower"), number_column("plain")]);
        let rows = RowTree::default();
        let table = DataTable::new("t", columns, rows).unwrap();
        let lines = write_lines(&table, Delimiter::Comma).unwrap();
        assert_eq!(lines, vec![",upper,plain", ",lower,"]);
    }

    #[test]
    fn refuses_fields_containing_the_delimiter() {
        let columns = ColumnTree::new(vec![string_column("a,b")]);
        let table = DataTable::new("t", columns, RowTree::default()).unwrap();
        let err = write_lines(&table, Delimiter::Comma).unwrap_err();
        assert!(matches!(err, TableError::UnwritableField { line: 1, .. }));
        assert!(write_lines(&table, Delimiter::Tab).is_ok());
    }

    #[test]
    fn empty_table_writes_nothing() {
        let table = DataTable::new("t", ColumnTree::default(), RowTree::default()).unwrap();
        assert_eq!(write_table(&table, Delimiter::Comma).unwrap(), "");
    }
}
