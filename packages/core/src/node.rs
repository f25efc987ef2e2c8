//! Node model: the unresolved tree produced by builders and `render`.

use crate::component::{Component, Composite};
use crate::value::{Props, Value};
use std::rc::Rc;
use tracing::debug;

/// Kind reported by text nodes
pub const TEXT_KIND: &str = "#text";

/// Tree node
#[derive(Debug, Clone)]
pub enum Node {
    /// User-defined stateful unit that renders to a subtree
    Composite(Composite),

    /// Structural container with a tag-like kind
    Element(Element),

    /// Text leaf
    Text(Text),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub kind: String,
    pub props: Props,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub text: String,
}

/// Type descriptor accepted by the builder
#[derive(Clone)]
pub enum NodeType {
    /// Primitive element tag
    Tag(String),
    /// Component behavior; each build creates a fresh composite of this kind
    Composite(Rc<dyn Component>),
}

impl NodeType {
    pub fn component(behavior: impl Component + 'static) -> Self {
        NodeType::Composite(Rc::new(behavior))
    }
}

impl From<&str> for NodeType {
    fn from(tag: &str) -> Self {
        NodeType::Tag(tag.to_string())
    }
}

impl From<String> for NodeType {
    fn from(tag: String) -> Self {
        NodeType::Tag(tag)
    }
}

impl From<Rc<dyn Component>> for NodeType {
    fn from(behavior: Rc<dyn Component>) -> Self {
        NodeType::Composite(behavior)
    }
}

impl std::fmt::Debug for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeType::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            NodeType::Composite(behavior) => {
                f.debug_tuple("Composite").field(&behavior.kind()).finish()
            }
        }
    }
}

/// Host-facing name for an attribute
pub fn canonical_attribute_name(name: &str) -> &str {
    match name {
        "className" => "class",
        other => other,
    }
}

impl Node {
    pub fn element(kind: impl Into<String>) -> Self {
        Node::Element(Element {
            kind: kind.into(),
            props: Props::new(),
            children: Vec::new(),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text { text: text.into() })
    }

    pub fn composite(behavior: impl Component + 'static) -> Self {
        Node::Composite(Composite::new(Rc::new(behavior)))
    }

    pub fn from_type(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Tag(tag) => Node::element(tag),
            NodeType::Composite(behavior) => Node::Composite(Composite::new(behavior)),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Node::Composite(composite) => composite.kind(),
            Node::Element(element) => &element.kind,
            Node::Text(_) => TEXT_KIND,
        }
    }

    /// Record an attribute in `props`. Text nodes carry no props and ignore it.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<Value>) {
        let name = canonical_attribute_name(name).to_string();
        match self {
            Node::Composite(composite) => composite.set_attribute(name, value.into()),
            Node::Element(element) => {
                element.props.insert(name, value.into());
            }
            Node::Text(_) => debug!(attribute = %name, "Ignoring attribute on text node"),
        }
    }

    /// Read back a recorded attribute
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.props()?.get(canonical_attribute_name(name))
    }

    pub fn props(&self) -> Option<&Props> {
        match self {
            Node::Composite(composite) => Some(composite.props()),
            Node::Element(element) => Some(&element.props),
            Node::Text(_) => None,
        }
    }

    /// Raw children as passed by the builder
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Composite(composite) => composite.children(),
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    pub fn append_child(&mut self, child: Node) {
        match self {
            Node::Composite(composite) => composite.append_child(child),
            Node::Element(element) => element.children.push(child),
            Node::Text(_) => debug!(child = child.kind(), "Ignoring child appended to text node"),
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Node::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    pub fn as_composite_mut(&mut self) -> Option<&mut Composite> {
        match self {
            Node::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.append_child(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        for child in children {
            self.append_child(child);
        }
        self
    }
}
