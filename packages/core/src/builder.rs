//! # Tree Builder
//!
//! Declarative construction of [`Node`] trees.
//!
//! ```rust,ignore
//! use trellis_core::{attrs, children, create_element};
//!
//! let list = create_element(
//!     "ul",
//!     attrs! { "className" => "todo" },
//!     children![
//!         vec![create_element("li", attrs! {}, children!["a"])],
//!         None::<String>,
//!         42,
//!     ],
//! );
//! ```
//!
//! Children are flattened depth-first, left to right, before they are
//! attached: nested lists splice inline, absent children become empty text,
//! and any other scalar is stringified into a text node.

use crate::node::{Node, NodeType};
use crate::value::Value;

/// Attribute list in application order
pub type Attributes = Vec<(String, Value)>;

/// Child argument before normalization
#[derive(Debug, Clone)]
pub enum Child {
    Node(Node),
    Text(String),
    Value(Value),
    List(Vec<Child>),
    Empty,
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<Value> for Child {
    fn from(value: Value) -> Self {
        Child::Value(value)
    }
}

impl From<bool> for Child {
    fn from(value: bool) -> Self {
        Child::Value(Value::from(value))
    }
}

impl From<i32> for Child {
    fn from(value: i32) -> Self {
        Child::Value(Value::from(value))
    }
}

impl From<i64> for Child {
    fn from(value: i64) -> Self {
        Child::Value(Value::from(value))
    }
}

impl From<usize> for Child {
    fn from(value: usize) -> Self {
        Child::Value(Value::from(value))
    }
}

impl From<f64> for Child {
    fn from(value: f64) -> Self {
        Child::Value(Value::from(value))
    }
}

impl<T: Into<Child>> From<Vec<T>> for Child {
    fn from(items: Vec<T>) -> Self {
        Child::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(child: Option<T>) -> Self {
        child.map_or(Child::Empty, Into::into)
    }
}

/// Build a node from a type descriptor, attributes and children
pub fn create_element(
    node_type: impl Into<NodeType>,
    attributes: Attributes,
    children: Vec<Child>,
) -> Node {
    let mut node = Node::from_type(node_type.into());
    for (name, value) in attributes {
        node.set_attribute(&name, value);
    }

    let mut flat = Vec::with_capacity(children.len());
    flatten_children(children, &mut flat);
    for child in flat {
        node.append_child(child);
    }

    node
}

/// Normalize children into nodes, preserving depth-first order
pub fn flatten_children(children: Vec<Child>, out: &mut Vec<Node>) {
    for child in children {
        match child {
            Child::Node(node) => out.push(node),
            Child::Text(text) => out.push(Node::text(text)),
            Child::List(items) => flatten_children(items, out),
            Child::Value(Value::Array(items)) => {
                flatten_children(items.into_iter().map(Child::Value).collect(), out)
            }
            Child::Value(value) => out.push(Node::text(value.to_string())),
            Child::Empty => out.push(Node::text("")),
        }
    }
}

/// Build an [`Attributes`] list: `attrs! { "id" => "main", "onClick" => callback }`
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::Attributes::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        vec![$((::std::string::String::from($name), $crate::Value::from($value))),+]
    };
}

/// Build a child list: `children![node, "text", 3, vec![a, b]]`
#[macro_export]
macro_rules! children {
    () => {
        ::std::vec::Vec::<$crate::Child>::new()
    };
    ($($child:expr),+ $(,)?) => {
        vec![$($crate::Child::from($child)),+]
    };
}
