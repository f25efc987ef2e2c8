//! Resolved tree: what a [`Node`] looks like once every composite has been
//! rendered through. Only elements and text remain, and each records where it
//! lives in the host after mounting.

use crate::host::{HostNode, Slot};
use crate::node::{Node, TEXT_KIND};
use crate::value::Props;
use serde::Serialize;

/// Resolved node
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum VNode {
    Element(VElement),
    Text(VText),
}

#[derive(Debug, Clone, Serialize)]
pub struct VElement {
    pub kind: String,
    #[serde(skip_serializing_if = "Props::is_empty")]
    pub props: Props,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VNode>,
    #[serde(skip)]
    pub handle: Option<HostNode>,
    #[serde(skip)]
    pub location: Option<Slot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VText {
    pub text: String,
    #[serde(skip)]
    pub handle: Option<HostNode>,
    #[serde(skip)]
    pub location: Option<Slot>,
}

impl VNode {
    pub fn element(kind: impl Into<String>) -> Self {
        VNode::Element(VElement {
            kind: kind.into(),
            props: Props::new(),
            children: Vec::new(),
            handle: None,
            location: None,
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        VNode::Text(VText {
            text: text.into(),
            handle: None,
            location: None,
        })
    }

    pub fn kind(&self) -> &str {
        match self {
            VNode::Element(element) => &element.kind,
            VNode::Text(_) => TEXT_KIND,
        }
    }

    pub fn props(&self) -> Option<&Props> {
        match self {
            VNode::Element(element) => Some(&element.props),
            VNode::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element(element) => &element.children,
            VNode::Text(_) => &[],
        }
    }

    pub fn handle(&self) -> Option<HostNode> {
        match self {
            VNode::Element(element) => element.handle,
            VNode::Text(text) => text.handle,
        }
    }

    pub fn location(&self) -> Option<Slot> {
        match self {
            VNode::Element(element) => element.location,
            VNode::Text(text) => text.location,
        }
    }

    /// Concatenated text of this subtree
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text(text) => text.text.clone(),
            VNode::Element(element) => element.children.iter().map(VNode::text_content).collect(),
        }
    }

    /// Number of nodes in this subtree, including itself
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(VNode::size).sum::<usize>()
    }

    pub(crate) fn set_mounted(&mut self, handle: HostNode, location: Slot) {
        match self {
            VNode::Element(element) => {
                element.handle = Some(handle);
                element.location = Some(location);
            }
            VNode::Text(text) => {
                text.handle = Some(handle);
                text.location = Some(location);
            }
        }
    }

    /// Take over the host handle and location of `previous` for this node only
    pub(crate) fn adopt_node(&mut self, previous: &VNode) {
        let (handle, location) = (previous.handle(), previous.location());
        match self {
            VNode::Element(element) => {
                element.handle = handle;
                element.location = location;
            }
            VNode::Text(text) => {
                text.handle = handle;
                text.location = location;
            }
        }
    }

    /// Take over host handles and locations of a structurally identical tree
    pub(crate) fn adopt(&mut self, previous: &VNode) {
        self.adopt_node(previous);
        if let VNode::Element(element) = self {
            for (child, old_child) in element.children.iter_mut().zip(previous.children()) {
                child.adopt(old_child);
            }
        }
    }
}

impl Node {
    /// Rendered form of this node. Composites are rendered and resolved
    /// transitively; elements resolve their children; text resolves to itself.
    pub fn resolve(&self) -> VNode {
        match self {
            Node::Composite(composite) => composite.resolve(),
            Node::Element(element) => VNode::Element(VElement {
                kind: element.kind.clone(),
                props: element.props.clone(),
                children: element.children.iter().map(Node::resolve).collect(),
                handle: None,
                location: None,
            }),
            Node::Text(text) => VNode::text(text.text.clone()),
        }
    }
}
