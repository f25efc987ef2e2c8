//! # Trellis Core
//!
//! A small UI-tree reconciliation engine.
//!
//! ## Purpose
//!
//! Builds an in-memory tree describing a user interface, compares successive
//! versions of it and applies the smallest set of host mutations that brings
//! the rendered output in line with the newest version.
//!
//! ## Pieces
//!
//! - [`Node`]: composite / element / text tree produced by the builder and by
//!   [`Component::render`]
//! - [`VNode`]: resolved tree (composites rendered through) as mounted in the host
//! - [`create_element`]: declarative builder with child flattening
//! - [`same_node`] / [`same_tree`]: structural comparison
//! - [`Reconciler`]: mount and patch against a [`Host`]
//! - [`Composite`]: lifecycle state machine and the state-update protocol
//! - [`render`]: mount a tree into an existing host container
//! - [`UpdateQueue`]: state updates requested by event listeners
//!
//! ## Determinism Contract
//!
//! Props live in ordered maps, so a given tree always produces the same
//! sequence of host calls. Re-rendering an unchanged tree produces no host
//! mutations at all.
//!
//! ## Execution model
//!
//! Everything is synchronous and single-threaded. A reconciliation pass runs
//! to completion before the next state update starts. Callbacks hold `Rc`
//! handlers, so trees never cross threads.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trellis_core::{render, Component, Node, RenderScope};
//!
//! struct Counter;
//!
//! impl Component for Counter {
//!     fn render(&self, scope: &RenderScope<'_>) -> Node {
//!         let count = scope.get("count").map(ToString::to_string).unwrap_or_default();
//!         Node::element("span").with_child(Node::text(count))
//!     }
//! }
//!
//! let mut root = render(Node::composite(Counter), container, &mut host)?;
//! root.set_state(&mut host, serde_json::json!({"count": 1}))?;
//! ```

pub mod builder;
pub mod component;
pub mod equality;
pub mod error;
pub mod host;
pub mod node;
pub mod queue;
pub mod reconciler;
pub mod render;
pub mod state;
pub mod value;
pub mod vdom;

#[cfg(test)]
mod test_host;

#[cfg(test)]
mod tests_lifecycle;


pub use builder::{create_element, flatten_children, Attributes, Child};
pub use component::{
    Component, Composite, LifecyclePhase, RenderScope, StateChange, UpdateContext,
};
pub use equality::{same_node, same_props, same_tree};
pub use error::{HostError, HostResult, ReconcileError, ReconcileResult};
pub use host::{event_name, Host, HostNode, Slot};
pub use node::{canonical_attribute_name, Element, Node, NodeType, Text, TEXT_KIND};
pub use queue::{UpdateQueue, Updater};
pub use reconciler::{reconcile, ReconcileStats, Reconciler};
pub use render::{render, RenderRoot};
pub use state::deep_merge;
pub use value::{Callback, Event, Props, Value};
pub use vdom::{VElement, VNode, VText};
