//! # Host Mount Protocol
//!
//! The reconciler never touches a display surface directly. Everything it
//! materializes goes through a [`Host`] passed in by the caller, which hands
//! back opaque [`HostNode`] and [`Slot`] ids.
//!
//! A slot is a location inside a parent that holds at most one node.
//! Inserting into an occupied slot replaces the occupant, which is how a
//! mismatched subtree is swapped out in place.

use crate::error::HostResult;
use crate::value::{Callback, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Opaque handle to a node materialized by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostNode(pub u64);

impl fmt::Display for HostNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque insertion location handed out by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot(pub u64);

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Surface the reconciler mounts into
pub trait Host {
    /// Create a new, detached, empty element
    fn create_element(&mut self, kind: &str) -> HostNode;

    /// Create a new, detached text leaf
    fn create_text(&mut self, text: &str) -> HostNode;

    /// Set a literal attribute
    fn set_attribute(&mut self, node: HostNode, name: &str, value: &Value) -> HostResult<()>;

    /// Register a listener for `event` on `node`
    fn add_event_listener(
        &mut self,
        node: HostNode,
        event: &str,
        listener: Callback,
    ) -> HostResult<()>;

    /// Place `node` at `slot`, replacing whatever occupied it
    fn insert_at(&mut self, slot: Slot, node: HostNode) -> HostResult<()>;

    fn has_children(&self, parent: HostNode) -> HostResult<bool>;

    /// Location directly after the current last child of `parent`
    fn location_after_last_child(&mut self, parent: HostNode) -> HostResult<Slot>;

    /// Location at the start of `parent`
    fn location_at_start(&mut self, parent: HostNode) -> HostResult<Slot>;

    /// Apply a rendered prop. A callback under any `on<rest>` name registers
    /// a listener for the derived event instead of setting an attribute.
    /// Non-callable values under an `on<Name>` name are skipped.
    fn set_host_attribute(&mut self, node: HostNode, name: &str, value: &Value) -> HostResult<()> {
        if let Some(listener) = value.as_callback() {
            if let Some(event) = bound_event(name) {
                return self.add_event_listener(node, &event, listener.clone());
            }
        }

        if event_name(name).is_some() {
            warn!(
                attribute = name,
                value_type = value.type_name(),
                "Event prop without a callback - skipping"
            );
            return Ok(());
        }

        self.set_attribute(node, name, value)
    }

    /// Location for appending a new child to `parent`
    fn append_location(&mut self, parent: HostNode) -> HostResult<Slot> {
        if self.has_children(parent)? {
            self.location_after_last_child(parent)
        } else {
            self.location_at_start(parent)
        }
    }
}

/// Event name of an `on<Name>` attribute: the prefix is stripped and the
/// first remaining character lowercased (`onClick` -> `click`). Names like
/// `online` are plain attributes.
pub fn event_name(attribute: &str) -> Option<String> {
    let rest = attribute.strip_prefix("on")?;
    if !rest.starts_with(|c: char| c.is_ascii_uppercase()) {
        return None;
    }
    bound_event(attribute)
}

/// Event a callback under `attribute` listens to, for any `on<rest>` name
fn bound_event(attribute: &str) -> Option<String> {
    let rest = attribute.strip_prefix("on")?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    Some(first.to_lowercase().collect::<String>() + chars.as_str())
}
