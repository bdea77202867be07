//! Generic composite tree shared by the column tree and the row tree.
//!
//! A [`Node`] is either a [`Branch`] holding an ordered run of children or a
//! [`Leaf`] holding a typed payload. Both carry a label and a selection
//! flag. The column tree instantiates `P = DataType` (leaf = column, branch
//! = category); the row tree instantiates `P = Vec<Value>` (leaf = row,
//! branch = segment). Structural equality is recursive over labels,
//! selection flags, and ordered children.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch<P> {
    pub label: String,
    pub selected: bool,
    pub children: Vec<Node<P>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf<P> {
    pub label: String,
    pub selected: bool,
    pub payload: P,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node<P> {
    Branch(Branch<P>),
    Leaf(Leaf<P>),
}

impl<P> Branch<P> {
    pub fn new(label: impl Into<String>, children: Vec<Node<P>>) -> Self {
        Branch {
            label: label.into(),
            selected: true,
            children,
        }
    }

    /// First direct child with the given label, if any.
    pub fn find(&self, label: &str) -> Option<&Node<P>> {
        self.children.iter().find(|child| child.label() == label)
    }
}

impl<P> Leaf<P> {
    pub fn new(label: impl Into<String>, payload: P) -> Self {
        Leaf {
            label: label.into(),
            selected: true,
            payload,
        }
    }
}

impl<P> Node<P> {
    pub fn label(&self) -> &str {
        match self {
            Node::Branch(branch) => &branch.label,
            Node::Leaf(leaf) => &leaf.label,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        match self {
            Node::Branch(branch) => branch.label = label.into(),
            Node::Leaf(leaf) => leaf.label = label.into(),
        }
    }

    pub fn is_selected(&self) -> bool {
        match self {
            Node::Branch(branch) => branch.selected,
            Node::Leaf(leaf) => leaf.selected,
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        match self {
            Node::Branch(branch) => branch.selected = selected,
            Node::Leaf(leaf) => leaf.selected = selected,
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }

    pub fn as_branch(&self) -> Option<&Branch<P>> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_branch_mut(&mut self) -> Option<&mut Branch<P>> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf<P>> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Branch(_) => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut Leaf<P>> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Branch(_) => None,
        }
    }

    /// Treats this node as a branch; panics otherwise. Misuse is a
    /// programming error, not a recoverable condition.
    pub fn expect_branch(&self) -> &Branch<P> {
        self.as_branch().expect("node is not a branch")
    }

    pub fn expect_branch_mut(&mut self) -> &mut Branch<P> {
        self.as_branch_mut().expect("node is not a branch")
    }

    /// Lazy pre-order traversal over all leaves under this node,
    /// depth-first and left-to-right.
    pub fn leaves(&self) -> Leaves<'_, P> {
        Leaves { stack: vec![self] }
    }

    pub fn count_leaves(&self) -> usize {
        self.leaves().count()
    }

    /// Maximum path length from this node down to a leaf; a leaf is 1.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch(branch) => {
                1 + branch
                    .children
                    .iter()
                    .map(Node::depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }
}

/// Root container of top-level nodes. Flattening its leaves in pre-order
/// defines the canonical leaf order (column index for the column tree, row
/// order for the row tree).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree<P> {
    pub children: Vec<Node<P>>,
}

impl<P> Default for Tree<P> {
    fn default() -> Self {
        Tree {
            children: Vec::new(),
        }
    }
}

impl<P> Tree<P> {
    pub fn new(children: Vec<Node<P>>) -> Self {
        Tree { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn leaves(&self) -> Leaves<'_, P> {
        Leaves {
            stack: self.children.iter().rev().collect(),
        }
    }

    pub fn count_leaves(&self) -> usize {
        self.leaves().count()
    }

    pub fn depth(&self) -> usize {
        self.children.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// First top-level node with the given label, if any.
    pub fn find(&self, label: &str) -> Option<&Node<P>> {
        self.children.iter().find(|child| child.label() == label)
    }
}

/// Restartable pre-order leaf iterator backed by an explicit stack.
pub struct Leaves<'a, P> {
    stack: Vec<&'a Node<P>>,
}

impl<'a, P> Iterator for Leaves<'a, P> {
    type Item = &'a Leaf<P>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Leaf(leaf) => return Some(leaf),
                Node::Branch(branch) => {
                    self.stack.extend(branch.children.iter().rev());
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree<u32> {
        Tree::new(vec![
            Node::Leaf(Leaf::new("a", 1)),
            Node::Branch(Branch::new(
                "group",
                vec![
                    Node::Leaf(Leaf::new("b", 2)),
                    Node::Branch(Branch::new("inner", vec![Node::Leaf(Leaf::new("c", 3))])),
                ],
            )),
        ])
    }

    #[test]
    fn leaves_traverse_pre_order_left_to_right() {
        let tree = sample();
        let labels: Vec<&str> = tree.leaves().map(|leaf| leaf.label.as_str()).collect();
        assert_eq!(labels, ["a", "b", "c"]);
        // restartable: a second traversal sees the same sequence
        assert_eq!(tree.count_leaves(), 3);
    }

    #[test]
    fn depth_is_longest_path_to_a_leaf() {
        let tree = sample();
        assert_eq!(tree.depth(), 3);
        assert_eq!(Tree::<u32>::default().depth(), 0);
    }

    #[test]
    fn find_matches_direct_children_only() {
        let tree = sample();
        assert!(tree.find("group").is_some());
        assert!(tree.find("b").is_none());
    }

    #[test]
    fn structural_equality_is_recursive() {
        let mut other = sample();
        assert_eq!(sample(), other);
        other.children[1].expect_branch_mut().children[0]
            .as_leaf_mut()
            .unwrap()
            .selected = false;
        assert_ne!(sample(), other);
    }
}
