//! Entry point for mounting a tree into an existing host container.

use crate::component::{Composite, StateChange};
use crate::error::{ReconcileError, ReconcileResult};
use crate::host::{Host, HostNode, Slot};
use crate::node::Node;
use crate::reconciler::{ReconcileStats, Reconciler};
use crate::value::Value;
use crate::vdom::VNode;
use tracing::{info, instrument};

/// A node mounted into a host container
#[derive(Debug)]
pub struct RenderRoot {
    node: Node,
    /// Mounted tree of element and text roots; composites keep their own
    tree: Option<VNode>,
    container: HostNode,
    location: Slot,
}

/// Append `node` to `container` and mount it.
///
/// Composite roots go through [`Composite::mount_to`] and end up `Mounted`.
#[instrument(skip(node, host), fields(kind = node.kind()))]
pub fn render(
    mut node: Node,
    container: HostNode,
    host: &mut dyn Host,
) -> ReconcileResult<RenderRoot> {
    let location = host.append_location(container)?;

    let (tree, stats) = match &mut node {
        Node::Composite(composite) => (None, composite.mount_to(location, host)?),
        other => {
            let mut tree = other.resolve();
            let mut reconciler = Reconciler::new(host);
            reconciler.mount(&mut tree, location)?;
            (Some(tree), reconciler.finish())
        }
    };

    info!(%location, nodes = stats.mounted, "Rendered root");
    Ok(RenderRoot {
        node,
        tree,
        container,
        location,
    })
}

impl RenderRoot {
    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn container(&self) -> HostNode {
        self.container
    }

    pub fn location(&self) -> Slot {
        self.location
    }

    /// Currently mounted resolved tree
    pub fn tree(&self) -> Option<&VNode> {
        match &self.node {
            Node::Composite(composite) => composite.mounted_tree(),
            _ => self.tree.as_ref(),
        }
    }

    pub fn composite(&self) -> Option<&Composite> {
        self.node.as_composite()
    }

    pub fn composite_mut(&mut self) -> Option<&mut Composite> {
        self.node.as_composite_mut()
    }

    /// Forward a state update to the root composite
    pub fn set_state(
        &mut self,
        host: &mut dyn Host,
        partial: impl Into<Value>,
    ) -> ReconcileResult<StateChange> {
        let kind = self.node.kind().to_string();
        let composite = self
            .node
            .as_composite_mut()
            .ok_or(ReconcileError::NotAComponent { kind })?;
        composite.set_state(host, partial)
    }

    /// Reconcile a new root description against what is mounted. A root
    /// composite that gets replaced is unmounted.
    #[instrument(skip(self, next, host), fields(kind = next.kind()))]
    pub fn rerender(&mut self, next: Node, host: &mut dyn Host) -> ReconcileResult<ReconcileStats> {
        let mut tree = next.resolve();
        let mut reconciler = Reconciler::new(host);
        match self.tree() {
            Some(previous) => reconciler.replace(&mut tree, previous)?,
            None => reconciler.mount(&mut tree, self.location)?,
        }
        let stats = reconciler.finish();

        let previous = std::mem::replace(&mut self.node, next);
        match &mut self.node {
            Node::Composite(composite) => {
                composite.attach(self.location, tree);
                self.tree = None;
            }
            _ => self.tree = Some(tree),
        }
        if let Node::Composite(old) = previous {
            old.unmount();
        }

        Ok(stats)
    }

    /// Discard the root, notifying a mounted root composite
    pub fn unmount(self) {
        if let Node::Composite(composite) = self.node {
            composite.unmount();
        }
    }
}
