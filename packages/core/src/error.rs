use crate::host::{HostNode, Slot};
use thiserror::Error;

pub type HostResult<T> = Result<T, HostError>;

pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Failures reported by a host surface adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Unknown host node {0}")]
    UnknownNode(HostNode),

    #[error("Unknown slot {0}")]
    UnknownSlot(Slot),

    #[error("Slot {slot} is anchored after {anchor}, which is no longer attached")]
    DetachedAnchor { slot: Slot, anchor: HostNode },

    #[error("Host node {0} is not an element")]
    NotAnElement(HostNode),
}

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Component '{kind}' has no location; mount it before updating")]
    NotMounted { kind: String },

    #[error("Component '{kind}' is already mounted")]
    AlreadyMounted { kind: String },

    #[error("Previously mounted '{kind}' node has no recorded location")]
    MissingLocation { kind: String },

    #[error("Root node is a '{kind}', not a component")]
    NotAComponent { kind: String },
}
