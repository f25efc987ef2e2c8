//! # Reconciler
//!
//! Brings the host in line with a freshly resolved tree.
//!
//! For every position the new subtree is compared with the one mounted
//! before it:
//!
//! - identical subtree (`same_tree`): reused, the host is not touched
//! - different node (`same_node` fails): the new subtree is mounted fresh at
//!   the old node's location, discarding everything below it
//! - same node, different descendants: children are compared by index
//!
//! Children are matched purely by position; there is no keyed reordering.
//! When the number of children changes, the whole subtree is replaced at that
//! node rather than appending or removing individual children.

use crate::equality::{same_node, same_tree};
use crate::error::{ReconcileError, ReconcileResult};
use crate::host::{Host, Slot};
use crate::vdom::VNode;
use serde::Serialize;
use tracing::{debug, trace};

/// Work done by a reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    /// Host nodes created
    pub mounted: usize,
    /// Subtrees mounted over a previous subtree
    pub replaced: usize,
    /// Subtrees left untouched
    pub reused: usize,
}

impl ReconcileStats {
    /// True when the pass did not create anything in the host
    pub fn is_noop(&self) -> bool {
        self.mounted == 0
    }
}

pub struct Reconciler<'h> {
    host: &'h mut dyn Host,
    stats: ReconcileStats,
}

impl<'h> Reconciler<'h> {
    pub fn new(host: &'h mut dyn Host) -> Self {
        Self {
            host,
            stats: ReconcileStats::default(),
        }
    }

    /// Materialize `node` and its whole subtree at `location`
    pub fn mount(&mut self, node: &mut VNode, location: Slot) -> ReconcileResult<()> {
        let handle = match node {
            VNode::Element(element) => {
                let handle = self.host.create_element(&element.kind);
                for (name, value) in &element.props {
                    self.host.set_host_attribute(handle, name, value)?;
                }
                for child in &mut element.children {
                    let slot = self.host.append_location(handle)?;
                    self.mount(child, slot)?;
                }
                handle
            }
            VNode::Text(text) => self.host.create_text(&text.text),
        };

        self.host.insert_at(location, handle)?;
        node.set_mounted(handle, location);
        self.stats.mounted += 1;
        trace!(kind = node.kind(), %handle, %location, "Mounted node");
        Ok(())
    }

    /// Patch the host from `previous` to `next`, position by position
    pub fn replace(&mut self, next: &mut VNode, previous: &VNode) -> ReconcileResult<()> {
        if same_tree(Some(&*next), Some(previous)) {
            next.adopt(previous);
            self.stats.reused += 1;
            return Ok(());
        }

        let location = previous
            .location()
            .ok_or_else(|| ReconcileError::MissingLocation {
                kind: previous.kind().to_string(),
            })?;

        if !same_node(Some(&*next), Some(previous)) {
            debug!(old = previous.kind(), new = next.kind(), %location, "Replacing subtree");
            self.stats.replaced += 1;
            return self.mount(next, location);
        }

        if next.children().len() != previous.children().len() {
            debug!(
                kind = next.kind(),
                old_children = previous.children().len(),
                new_children = next.children().len(),
                "Child count changed - replacing subtree"
            );
            self.stats.replaced += 1;
            return self.mount(next, location);
        }

        next.adopt_node(previous);
        if let VNode::Element(element) = next {
            for (child, old_child) in element.children.iter_mut().zip(previous.children()) {
                self.replace(child, old_child)?;
            }
        }
        Ok(())
    }

    pub fn finish(self) -> ReconcileStats {
        self.stats
    }
}

/// Reconcile `next` against an already mounted `previous` tree
pub fn reconcile(
    next: &mut VNode,
    previous: &VNode,
    host: &mut dyn Host,
) -> ReconcileResult<ReconcileStats> {
    let mut reconciler = Reconciler::new(host);
    reconciler.replace(next, previous)?;
    Ok(reconciler.finish())
}
