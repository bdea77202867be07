//! Row-tree specialization of the composite tree.
//!
//! Branches are segments (rows that came from one contiguous block of the
//! source, e.g. a sample or session); leaves are rows, each holding one
//! [`Value`] per leaf column in canonical column order. Flattening the
//! segments in pre-order yields the table's row order.

use crate::data::Value;
use crate::tree::{Branch, Leaf, Node, Tree};

pub type RowNode = Node<Vec<Value>>;
pub type RowTree = Tree<Vec<Value>>;

/// Default segment label for sources without explicit segment markers.
pub const DEFAULT_SEGMENT_LABEL: &str = "model";

/// A segment grouping the given rows under one label.
pub fn segment(label: impl Into<String>, rows: Vec<RowNode>) -> RowNode {
    Node::Branch(Branch::new(label, rows))
}

/// A single row with one value per leaf column.
pub fn data_row(label: impl Into<String>, values: Vec<Value>) -> RowNode {
    Node::Leaf(Leaf::new(label, values))
}

impl RowTree {
    /// Ordered rows across all segments.
    pub fn rows(&self) -> impl Iterator<Item = &Leaf<Vec<Value>>> {
        self.leaves()
    }

    pub fn row_count(&self) -> usize {
        self.count_leaves()
    }

    /// Top-level segments, in order. Panics on a row stored outside a
    /// segment; the parser never builds one.
    pub fn segments(&self) -> impl Iterator<Item = &Branch<Vec<Value>>> {
        self.children.iter().map(Node::expect_branch)
    }

    /// Maps a flat row index onto (segment index, row index within the
    /// segment). Panics when out of range.
    pub fn locate_row(&self, row: usize) -> (usize, usize) {
        let mut remaining = row;
        for (seg_index, seg) in self.children.iter().enumerate() {
            let len = seg.count_leaves();
            if remaining < len {
                return (seg_index, remaining);
            }
            remaining -= len;
        }
        panic!("row index {row} out of range");
    }
}
