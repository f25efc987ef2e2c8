use serde::{Deserialize, Serialize};
use std::fmt;
use trellis_core::{HostNode, Slot};

/// One host mutation performed on a [`crate::Document`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    CreateElement {
        node: HostNode,
        tag: String,
    },
    CreateText {
        node: HostNode,
        text: String,
    },
    SetAttribute {
        node: HostNode,
        name: String,
        value: String,
    },
    AddListener {
        node: HostNode,
        event: String,
    },
    #[serde(rename_all = "camelCase")]
    Insert {
        slot: Slot,
        parent: HostNode,
        node: HostNode,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        replaced: Option<HostNode>,
    },
}

impl Mutation {
    /// Node the mutation applies to
    pub fn node(&self) -> HostNode {
        match self {
            Mutation::CreateElement { node, .. }
            | Mutation::CreateText { node, .. }
            | Mutation::SetAttribute { node, .. }
            | Mutation::AddListener { node, .. }
            | Mutation::Insert { node, .. } => *node,
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::CreateElement { node, tag } => write!(f, "create {} <{}>", node, tag),
            Mutation::CreateText { node, text } => write!(f, "create {} {:?}", node, text),
            Mutation::SetAttribute { node, name, value } => {
                write!(f, "set {} {}={:?}", node, name, value)
            }
            Mutation::AddListener { node, event } => write!(f, "listen {} {}", node, event),
            Mutation::Insert {
                slot,
                parent,
                node,
                replaced,
            } => match replaced {
                Some(old) => write!(f, "insert {} into {} at {} replacing {}", node, parent, slot, old),
                None => write!(f, "insert {} into {} at {}", node, parent, slot),
            },
        }
    }
}
