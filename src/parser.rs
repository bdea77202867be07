//! Parsing delimited text into a [`DataTable`].
//!
//! Two source layouts are recognized:
//!
//! - **Labeled** (the canonical layout the writer emits): the first field of
//!   the first line is empty. Header lines keep an empty first field; data
//!   columns occupy the remaining fields. After the headers, a line with a
//!   label and all-empty data fields opens a segment, and following lines
//!   are its rows.
//! - **Plain**: an ordinary delimited file. Leading lines whose first field
//!   is non-numeric are headers, every field is a data column, and all rows
//!   join a single `model` segment with generated labels.
//!
//! Header lines build a nested column tree bottom-up: the last header line
//! yields leaf columns; each earlier line groups contiguous runs of built
//! nodes under forward-filled labels. A label spanning a single leaf merges
//! into that leaf's title (newline-joined), the inverse of how the writer
//! renders multi-line titles.

use log::debug;

use crate::column::{ColumnNode, ColumnTree};
use crate::data::{self, DataType, Value};
use crate::delimiter::Delimiter;
use crate::error::{Result, TableError};
use crate::row::{self, RowNode, RowTree};
use crate::table::DataTable;
use crate::tree::{Branch, Leaf, Node};

/// Splits text into a rectangular grid of trimmed fields. Blank lines are
/// skipped; the first line fixes the expected field count and any
/// disagreement is an [`TableError::IrregularRowLength`].
pub fn read_cells(text: &str, delimiter: Delimiter) -> Result<Vec<Vec<String>>> {
    let mut cells: Vec<Vec<String>> = Vec::new();
    let mut expected = 0;
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<String> = line
            .split(delimiter.as_char())
            .map(|field| field.trim().to_string())
            .collect();
        if cells.is_empty() {
            expected = fields.len();
        } else if fields.len() != expected {
            return Err(TableError::IrregularRowLength {
                line: index + 1,
                expected,
                found: fields.len(),
            });
        }
        cells.push(fields);
    }
    Ok(cells)
}

/// Parses delimited text into a table. Errors abort construction; no
/// partial table is returned.
pub fn parse_table(text: &str, delimiter: Delimiter, label: &str) -> Result<DataTable> {
    let cells = read_cells(text, delimiter)?;
    if cells.is_empty() {
        return DataTable::new(label, ColumnTree::default(), RowTree::default());
    }

    let layout = Layout::of(&cells);
    debug!(
        "parsing '{label}': {} line(s), {} header line(s), labeled: {}",
        cells.len(),
        layout.header_lines,
        layout.labeled
    );

    let sources = source_columns(&cells, &layout);
    let columns = build_header_tree(&cells, &layout, &sources);
    let titles: Vec<String> = columns.columns().map(|leaf| leaf.label.clone()).collect();
    let rows = parse_rows(&cells, &layout, &sources, &titles)?;
    DataTable::new(label, columns, rows)
}

/// Parses only the column tree, for callers that need the header structure
/// without materializing rows.
pub fn parse_column_tree(text: &str, delimiter: Delimiter) -> Result<ColumnTree> {
    let cells = read_cells(text, delimiter)?;
    if cells.is_empty() {
        return Ok(ColumnTree::default());
    }
    let layout = Layout::of(&cells);
    let sources = source_columns(&cells, &layout);
    Ok(build_header_tree(&cells, &layout, &sources))
}

/// Classifies one source column over every data line: all non-empty fields
/// numeric means [`DataType::Number`], anything else means
/// [`DataType::String`]. A column with no non-empty fields defaults to
/// `Number`.
pub fn infer_column_type(cells: &[Vec<String>], column: usize, header_lines: usize) -> DataType {
    let textual = cells[header_lines..]
        .iter()
        .filter_map(|line| line.get(column))
        .any(|field| !field.is_empty() && !data::is_numeric(field));
    if textual {
        DataType::String
    } else {
        DataType::Number
    }
}

#[derive(Debug, Clone, Copy)]
struct Layout {
    labeled: bool,
    /// Count of leading header lines, before trailing blank/duplicate
    /// trimming.
    header_lines: usize,
    /// Header lines that survive trimming and contribute tree depth.
    informative_lines: usize,
    /// First source index holding data (1 skips the label column).
    data_start: usize,
}

impl Layout {
    fn of(cells: &[Vec<String>]) -> Layout {
        let labeled = cells[0][0].is_empty();
        let header_lines = if labeled {
            cells.iter().take_while(|line| line[0].is_empty()).count()
        } else {
            cells
                .iter()
                .take_while(|line| !data::is_numeric(&line[0]))
                .count()
        };
        let data_start = usize::from(labeled);
        let width = cells[0].len();
        let mut informative_lines = header_lines;
        while informative_lines > 0 {
            let line = &cells[informative_lines - 1][data_start..width];
            let blank = line.iter().all(|field| field.is_empty());
            let duplicate = informative_lines >= 2
                && cells[informative_lines - 2][data_start..width] == *line;
            if blank || duplicate {
                informative_lines -= 1;
            } else {
                break;
            }
        }
        Layout {
            labeled,
            header_lines,
            informative_lines,
            data_start,
        }
    }
}

#[derive(Debug, Clone)]
struct SourceColumn {
    /// Field index in the source grid.
    src: usize,
    data_type: DataType,
    /// Synthesized title for blank-headed columns in the plain layout.
    synthesized: Option<String>,
}

fn source_columns(cells: &[Vec<String>], layout: &Layout) -> Vec<SourceColumn> {
    let width = cells[0].len();
    let mut sources = Vec::new();
    for src in layout.data_start..width {
        let blank_header = cells[..layout.informative_lines]
            .iter()
            .all(|line| line[src].is_empty());
        if blank_header && layout.labeled {
            // the Squid-style layout drops unheadered columns outright
            continue;
        }
        let synthesized =
            blank_header.then(|| format!("column{}", src - layout.data_start + 1));
        sources.push(SourceColumn {
            src,
            data_type: infer_column_type(cells, src, layout.header_lines),
            synthesized,
        });
    }
    sources
}

struct BuiltNode {
    node: ColumnNode,
    start: usize,
}

/// Bottom-up header-tree construction over the informative header lines.
fn build_header_tree(cells: &[Vec<String>], layout: &Layout, sources: &[SourceColumn]) -> ColumnTree {
    let header = &cells[..layout.informative_lines];
    let mut nodes: Vec<BuiltNode> = sources
        .iter()
        .map(|source| {
            let title = match header.last() {
                Some(line) if !line[source.src].is_empty() => line[source.src].clone(),
                _ => source.synthesized.clone().unwrap_or_default(),
            };
            BuiltNode {
                node: Node::Leaf(Leaf::new(title, source.data_type)),
                start: source.src,
            }
        })
        .collect();

    for line in header.iter().rev().skip(1) {
        nodes = group_line(line, layout, cells[0].len(), nodes);
    }

    ColumnTree::new(nodes.into_iter().map(|built| built.node).collect())
}

/// Groups the already-built nodes under one header line. A non-blank cell
/// spans forward to the next non-blank cell in the same line; nodes left of
/// the first label stay ungrouped siblings.
fn group_line(
    line: &[String],
    layout: &Layout,
    width: usize,
    nodes: Vec<BuiltNode>,
) -> Vec<BuiltNode> {
    let labels: Vec<(usize, &str)> = (layout.data_start..width)
        .filter(|src| !line[*src].is_empty())
        .map(|src| (src, line[src].as_str()))
        .collect();
    if labels.is_empty() {
        return nodes;
    }

    let mut grouped: Vec<BuiltNode> = Vec::new();
    let mut nodes = nodes.into_iter().peekable();

    // ungrouped prefix before the first label
    while let Some(built) = nodes.peek()
        && built.start < labels[0].0
    {
        grouped.push(nodes.next().expect("peeked node"));
    }

    for (index, (start, label)) in labels.iter().enumerate() {
        let end = labels
            .get(index + 1)
            .map(|(next, _)| *next)
            .unwrap_or(width);
        let mut covered: Vec<BuiltNode> = Vec::new();
        while let Some(built) = nodes.peek()
            && built.start < end
        {
            covered.push(nodes.next().expect("peeked node"));
        }
        match covered.len() {
            0 => {} // label above dropped columns only
            1 if covered[0].node.as_leaf().is_some() => {
                let mut built = covered.into_iter().next().expect("single node");
                let leaf = built.node.as_leaf_mut().expect("checked leaf");
                leaf.label = if leaf.label.is_empty() {
                    (*label).to_string()
                } else {
                    format!("{label}\n{}", leaf.label)
                };
                grouped.push(built);
            }
            _ => {
                grouped.push(BuiltNode {
                    start: *start,
                    node: Node::Branch(Branch::new(
                        *label,
                        covered.into_iter().map(|built| built.node).collect(),
                    )),
                });
            }
        }
    }
    grouped
}

fn parse_rows(
    cells: &[Vec<String>],
    layout: &Layout,
    sources: &[SourceColumn],
    titles: &[String],
) -> Result<RowTree> {
    let mut segments: Vec<(String, Vec<RowNode>)> = Vec::new();
    let mut ordinal = 0;
    for line in &cells[layout.header_lines..] {
        if layout.labeled {
            let label = &line[0];
            let is_marker =
                !label.is_empty() && sources.iter().all(|source| line[source.src].is_empty());
            if is_marker {
                segments.push((label.clone(), Vec::new()));
                continue;
            }
        }
        ordinal += 1;
        let label = if layout.labeled && !line[0].is_empty() {
            line[0].clone()
        } else {
            format!("row{ordinal}")
        };
        let values: Vec<Value> = sources
            .iter()
            .zip(titles)
            .map(|(source, title)| data::parse_cell(&line[source.src], source.data_type, title))
            .collect::<Result<_>>()?;
        if segments.is_empty() {
            segments.push((row::DEFAULT_SEGMENT_LABEL.to_string(), Vec::new()));
        }
        let current = segments.last_mut().expect("segment pushed above");
        current.1.push(row::data_row(label, values));
    }

    Ok(RowTree::new(
        segments
            .into_iter()
            .map(|(label, rows)| row::segment(label, rows))
            .collect(),
    ))
}
