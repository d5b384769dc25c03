//! The assembly tree: groups of children or leaf shapes.

use crate::{Aabb, Shape};
use kast_math::Location;

/// A node in an assembly: either a group of child nodes or a leaf shape.
///
/// Ownership is strictly hierarchical — a child belongs to exactly one
/// parent — so traversal never revisits a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A grouping of child nodes, optionally labeled.
    Group {
        /// Optional label for the group.
        label: Option<String>,
        /// Child nodes, in assembly order.
        children: Vec<Node>,
    },
    /// A single placed solid.
    Leaf(Shape),
}

impl Node {
    /// An unlabeled group.
    pub fn group(children: Vec<Node>) -> Self {
        Node::Group {
            label: None,
            children,
        }
    }

    /// A labeled group.
    pub fn named_group(label: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Group {
            label: Some(label.into()),
            children,
        }
    }

    /// Visit every leaf shape in depth-first assembly order.
    pub fn visit_leaves<'a>(&'a self, f: &mut impl FnMut(&'a Shape)) {
        match self {
            Node::Group { children, .. } => {
                for child in children {
                    child.visit_leaves(f);
                }
            }
            Node::Leaf(shape) => f(shape),
        }
    }

    /// Number of leaf shapes in this subtree.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.visit_leaves(&mut |_| count += 1);
        count
    }

    /// Bounding box of all leaves, or `None` for a subtree with no leaves.
    pub fn bounding_box(&self) -> Option<Aabb> {
        let mut bb: Option<Aabb> = None;
        self.visit_leaves(&mut |shape| {
            let leaf_bb = shape.bounding_box();
            bb = Some(match bb {
                Some(acc) => acc.union(leaf_bb),
                None => leaf_bb,
            });
        });
        bb
    }

    /// An independent copy with `outer` applied on top of every leaf's
    /// placement (moves or mirrors a whole subassembly).
    pub fn transformed(&self, outer: &Location) -> Node {
        match self {
            Node::Group { label, children } => Node::Group {
                label: label.clone(),
                children: children.iter().map(|c| c.transformed(outer)).collect(),
            },
            Node::Leaf(shape) => Node::Leaf(shape.transformed(outer)),
        }
    }
}

impl From<Shape> for Node {
    fn from(shape: Shape) -> Self {
        Node::Leaf(shape)
    }
}
