//! # Components and the Lifecycle State Machine
//!
//! A [`Composite`] pairs a user [`Component`] behavior with the instance data
//! the engine owns: props, raw children, state, lifecycle phase, assigned
//! location and the last mounted tree.
//!
//! ## Lifecycle
//!
//! ```text
//! Init --mount_to--> Mounted
//! ```
//!
//! The phase moves forward exactly once, after the first mount completes.
//! Update callbacks only fire in the `Mounted` phase.
//!
//! ## State updates
//!
//! [`Composite::set_state`] deep-merges a partial object into the state,
//! compares the result with a snapshot and stops there when nothing changed.
//! Otherwise it runs `will_update`, a reconciliation pass and `did_update`,
//! in that order.
//!
//! `did_update` may call [`UpdateContext::set_state`]. Each such call is a
//! complete nested pass on top of the current one; nothing is batched, so a
//! component that keeps changing its own state from `did_update` recurses
//! without bound.

use crate::error::{ReconcileError, ReconcileResult};
use crate::host::{Host, Slot};
use crate::node::Node;
use crate::reconciler::{ReconcileStats, Reconciler};
use crate::state::deep_merge;
use crate::value::{Props, Value};
use crate::vdom::VNode;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, instrument, trace, warn};

/// User-defined behavior of a composite
pub trait Component {
    /// Kind tag of composites built from this behavior
    fn kind(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Describe the subtree for the current props, state and children
    fn render(&self, scope: &RenderScope<'_>) -> Node;

    /// Called before the reconciliation pass of an accepted state change
    fn will_update(&self, _prev: &Value, _next: &Value) {}

    /// Called after the reconciliation pass of an accepted state change
    fn did_update(&self, _ctx: &mut UpdateContext<'_>) -> ReconcileResult<()> {
        Ok(())
    }

    /// Called when a mounted composite is discarded
    fn will_unmount(&self) {}
}

fn short_type_name(name: &str) -> &str {
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum LifecyclePhase {
    Init,
    Mounted,
}

/// Outcome of [`Composite::set_state`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// Merged state equals the previous state; nothing ran
    Unchanged,
    /// State changed but the composite has no location yet; the next mount
    /// renders it
    Deferred,
    /// State changed and a reconciliation pass ran
    Applied(ReconcileStats),
}

/// Read-only view handed to [`Component::render`]
#[derive(Debug, Clone, Copy)]
pub struct RenderScope<'a> {
    props: &'a Props,
    state: &'a Value,
    children: &'a [Node],
}

impl<'a> RenderScope<'a> {
    pub fn props(&self) -> &'a Props {
        self.props
    }

    pub fn prop(&self, name: &str) -> Option<&'a Value> {
        self.props.get(crate::node::canonical_attribute_name(name))
    }

    pub fn state(&self) -> &'a Value {
        self.state
    }

    /// Top-level state entry
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.state.get(key)
    }

    /// Raw children passed by the parent
    pub fn children(&self) -> &'a [Node] {
        self.children
    }
}

/// Handle passed to [`Component::did_update`]
pub struct UpdateContext<'a> {
    composite: &'a mut Composite,
    host: &'a mut dyn Host,
}

impl UpdateContext<'_> {
    pub fn state(&self) -> &Value {
        &self.composite.state
    }

    pub fn mounted_tree(&self) -> Option<&VNode> {
        self.composite.mounted.as_ref()
    }

    /// Request another state change; runs a full nested pass
    pub fn set_state(&mut self, partial: impl Into<Value>) -> ReconcileResult<StateChange> {
        self.composite.set_state(&mut *self.host, partial)
    }
}

/// Stateful node instance
pub struct Composite {
    kind: String,
    props: Props,
    children: Vec<Node>,
    state: Value,
    phase: LifecyclePhase,
    location: Option<Slot>,
    mounted: Option<VNode>,
    behavior: Rc<dyn Component>,
}

impl Composite {
    pub fn new(behavior: Rc<dyn Component>) -> Self {
        Self {
            kind: behavior.kind().to_string(),
            props: Props::new(),
            children: Vec::new(),
            state: Value::object(),
            phase: LifecyclePhase::Init,
            location: None,
            mounted: None,
            behavior,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub(crate) fn set_attribute(&mut self, name: String, value: Value) {
        self.props.insert(name, value);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn append_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn state(&self) -> &Value {
        &self.state
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.phase == LifecyclePhase::Mounted
    }

    pub fn location(&self) -> Option<Slot> {
        self.location
    }

    /// Tree produced by the last reconciliation pass
    pub fn mounted_tree(&self) -> Option<&VNode> {
        self.mounted.as_ref()
    }

    /// Invoke the behavior's `render` once
    pub fn render(&self) -> Node {
        self.behavior.render(&RenderScope {
            props: &self.props,
            state: &self.state,
            children: &self.children,
        })
    }

    /// Rendered form, followed through nested composites
    pub fn resolve(&self) -> VNode {
        self.render().resolve()
    }

    /// Mount at `location` and enter the `Mounted` phase
    #[instrument(skip(self, host), fields(kind = %self.kind))]
    pub fn mount_to(
        &mut self,
        location: Slot,
        host: &mut dyn Host,
    ) -> ReconcileResult<ReconcileStats> {
        if self.is_mounted() {
            return Err(ReconcileError::AlreadyMounted {
                kind: self.kind.clone(),
            });
        }

        self.location = Some(location);
        let stats = self.update(host)?;
        self.phase = LifecyclePhase::Mounted;
        debug!(%location, nodes = stats.mounted, "Component mounted");
        Ok(stats)
    }

    /// Re-render and reconcile against the mounted tree, or mount fresh on
    /// the first call
    #[instrument(skip(self, host), fields(kind = %self.kind))]
    pub fn update(&mut self, host: &mut dyn Host) -> ReconcileResult<ReconcileStats> {
        let location = self.location.ok_or_else(|| ReconcileError::NotMounted {
            kind: self.kind.clone(),
        })?;

        let mut next = self.resolve();
        let mut reconciler = Reconciler::new(host);
        match &self.mounted {
            Some(previous) => reconciler.replace(&mut next, previous)?,
            None => reconciler.mount(&mut next, location)?,
        }
        self.mounted = Some(next);

        let stats = reconciler.finish();
        debug!(
            mounted = stats.mounted,
            replaced = stats.replaced,
            reused = stats.reused,
            "Reconciliation pass complete"
        );
        Ok(stats)
    }

    /// Merge `partial` into the state and re-render if anything changed.
    /// Absent (`null`) or non-object updates are ignored.
    ///
    /// When the reconciliation pass fails the state is rolled back to its
    /// value before the merge, and the mounted tree still describes the last
    /// completed pass.
    /// `will_update` has already run by then.
    #[instrument(skip(self, host, partial), fields(kind = %self.kind))]
    pub fn set_state(
        &mut self,
        host: &mut dyn Host,
        partial: impl Into<Value>,
    ) -> ReconcileResult<StateChange> {
        let partial = partial.into();
        if !matches!(partial, Value::Object(_)) {
            trace!(value_type = partial.type_name(), "Ignoring non-object state update");
            return Ok(StateChange::Unchanged);
        }

        let previous = self.state.clone();
        deep_merge(&mut self.state, &partial);
        if self.state == previous {
            trace!("State unchanged - skipping update");
            return Ok(StateChange::Unchanged);
        }

        let behavior = Rc::clone(&self.behavior);
        if self.is_mounted() {
            behavior.will_update(&previous, &self.state);
        }

        if self.location.is_none() {
            debug!("State changed before mount - deferring render");
            return Ok(StateChange::Deferred);
        }

        let stats = match self.update(host) {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, "Reconciliation failed - restoring previous state");
                self.state = previous;
                return Err(err);
            }
        };

        if self.is_mounted() {
            behavior.did_update(&mut UpdateContext {
                composite: self,
                host,
            })?;
        }

        Ok(StateChange::Applied(stats))
    }

    /// Discard this composite, notifying the behavior if it was mounted
    pub fn unmount(self) {
        if self.is_mounted() {
            debug!(kind = %self.kind, "Unmounting component");
            self.behavior.will_unmount();
        }
    }

    /// Record an externally reconciled tree as this composite's mount
    pub(crate) fn attach(&mut self, location: Slot, tree: VNode) {
        self.location = Some(location);
        self.mounted = Some(tree);
        self.phase = LifecyclePhase::Mounted;
    }
}

/// A clone is a fresh, unmounted instance of the same description.
impl Clone for Composite {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            props: self.props.clone(),
            children: self.children.clone(),
            state: self.state.clone(),
            phase: LifecyclePhase::Init,
            location: None,
            mounted: None,
            behavior: Rc::clone(&self.behavior),
        }
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("kind", &self.kind)
            .field("props", &self.props)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("location", &self.location)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}
