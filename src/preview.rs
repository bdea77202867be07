//! Aligned text rendering of a table for terminal preview: the nested
//! header lines, a separator, then rows grouped under their segment labels.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::data::Value;
use crate::table::DataTable;
use crate::tree::Node;
use crate::writer;

pub fn render_preview(table: &DataTable, max_rows: usize) -> String {
    let width = 1 + table.column_count();
    let header = writer::header_records(table);
    let mut body: Vec<Vec<String>> = Vec::new();

    let mut remaining = max_rows;
    'segments: for segment in table.row_tree().segments() {
        let mut marker = vec![String::new(); width];
        marker[0] = segment.label.clone();
        body.push(marker);
        for row in segment.children.iter().filter_map(Node::as_leaf) {
            if remaining == 0 {
                break 'segments;
            }
            remaining -= 1;
            let mut record = Vec::with_capacity(width);
            record.push(row.label.clone());
            record.extend(row.payload.iter().map(Value::as_display));
            body.push(record);
        }
    }

    let mut widths = vec![1usize; width];
    for record in header.iter().chain(&body) {
        for (index, cell) in record.iter().enumerate() {
            widths[index] = widths[index].max(display_width(&sanitize_cell(cell)));
        }
    }

    let mut output = String::new();
    for record in &header {
        let _ = writeln!(output, "{}", format_row(record, &widths));
    }
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat((*w).max(3))).collect();
    let separator_widths: Vec<usize> = widths.iter().map(|w| (*w).max(3)).collect();
    let _ = writeln!(output, "{}", format_row(&separator, &separator_widths));
    for record in &body {
        let _ = writeln!(output, "{}", format_row(record, &widths));
    }
    output
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        let sanitized = sanitize_cell(value);
        let display = display_width(sanitized.as_ref());
        let mut cell = sanitized.into_owned();
        let padding = widths
            .get(index)
            .copied()
            .unwrap_or_default()
            .saturating_sub(display);
        if padding > 0 {
            cell.push_str(&" ".repeat(padding));
        }
        cells.push(cell);
    }
    let mut line = cells.join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        let mut sanitized = String::with_capacity(value.len());
        for ch in value.chars() {
            match ch {
                '\n' | '\r' | '\t' => sanitized.push(' '),
                other => sanitized.push(other),
            }
        }
        Cow::Owned(sanitized)
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delimiter::Delimiter;
    use crate::parser;

    #[test]
    fn preview_shows_headers_segments_and_rows() {
        let text = ",Cat1,\n,Col1,Col2\nSeg1,,\nSeg1:Row1,1.0,2.0\nSeg1:Row2,3.0,4.0\n";
        let table = parser::parse_table(text, Delimiter::Comma, "t").unwrap();
        let rendered = render_preview(&table, 1);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Cat1"));
        assert!(lines[1].contains("Col1"));
        assert!(lines[2].starts_with("---"));
        assert!(lines[3].starts_with("Seg1"));
        assert!(lines[4].contains("Seg1:Row1"));
        assert!(!rendered.contains("Seg1:Row2"));
    }
}
