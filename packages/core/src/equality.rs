//! Structural comparison of resolved nodes.
//!
//! `same_node` is shallow: kind, props and, for text, the payload.
//! `same_tree` extends it to whole subtrees with children matched by position.

use crate::value::Props;
use crate::vdom::VNode;

/// Shallow identity check. Absent nodes are never the same.
pub fn same_node(a: Option<&VNode>, b: Option<&VNode>) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };

    match (a, b) {
        (VNode::Text(a), VNode::Text(b)) => a.text == b.text,
        (VNode::Element(a), VNode::Element(b)) => {
            a.kind == b.kind && same_props(&a.props, &b.props)
        }
        _ => false,
    }
}

/// Full structural identity of two subtrees
pub fn same_tree(a: Option<&VNode>, b: Option<&VNode>) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };

    if !same_node(Some(a), Some(b)) {
        return false;
    }

    let (left, right) = (a.children(), b.children());
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(l, r)| same_tree(Some(l), Some(r)))
}

/// Same key set and equal values per key. Callbacks compare by identity or
/// source label, structured values by deep equality.
pub fn same_props(a: &Props, b: &Props) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(name, value)| b.get(name).is_some_and(|other| value == other))
}

impl VNode {
    pub fn same_node(&self, other: &VNode) -> bool {
        same_node(Some(self), Some(other))
    }

    pub fn same_tree(&self, other: &VNode) -> bool {
        same_tree(Some(self), Some(other))
    }
}
