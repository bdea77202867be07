//! Column-tree specialization of the composite tree.
//!
//! Leaves are data columns: the label is the column title (which may hold
//! embedded newlines for multi-row header text), the payload is the
//! declared [`DataType`]. Branches are categories grouping a contiguous run
//! of columns under a shared header span. The pre-order leaf sequence
//! defines the column index used by rows and variable bindings.

use crate::data::DataType;
use crate::tree::{Branch, Leaf, Node, Tree};

pub type ColumnNode = Node<DataType>;
pub type ColumnTree = Tree<DataType>;

/// A leaf column holding numbers.
pub fn number_column(title: impl Into<String>) -> ColumnNode {
    Node::Leaf(Leaf::new(title, DataType::Number))
}

/// A leaf column holding text.
pub fn string_column(title: impl Into<String>) -> ColumnNode {
    Node::Leaf(Leaf::new(title, DataType::String))
}

/// A category grouping the given columns/categories under one label.
pub fn category(label: impl Into<String>, children: Vec<ColumnNode>) -> ColumnNode {
    Node::Branch(Branch::new(label, children))
}

impl ColumnTree {
    /// Ordered leaf columns; position in this sequence is the column index.
    pub fn columns(&self) -> impl Iterator<Item = &Leaf<DataType>> {
        self.leaves()
    }

    pub fn column_count(&self) -> usize {
        self.count_leaves()
    }

    pub fn column_title(&self, index: usize) -> &str {
        &self
            .columns()
            .nth(index)
            .expect("column index out of range")
            .label
    }

    pub fn column_type(&self, index: usize) -> DataType {
        self.columns()
            .nth(index)
            .expect("column index out of range")
            .payload
    }

    /// Index of the first leaf column with the given title.
    pub fn column_index(&self, title: &str) -> Option<usize> {
        self.columns().position(|column| column.label == title)
    }

    /// Number of header lines needed to render this tree: category nesting
    /// plus the line count of multi-line column titles.
    pub fn header_depth(&self) -> usize {
        self.children.iter().map(node_header_depth).max().unwrap_or(0)
    }
}

fn node_header_depth(node: &ColumnNode) -> usize {
    match node {
        Node::Leaf(leaf) => leaf.label.lines().count().max(1),
        Node::Branch(branch) => {
            1 + branch
                .children
                .iter()
                .map(node_header_depth)
                .max()
                .unwrap_or(0)
        }
    }
}
