//! Arena-backed document implementing the Host Mount Protocol.
//!
//! Nodes live in a flat `Vec` indexed by [`HostNode`]. A [`Slot`] remembers
//! its parent, the sibling it was anchored after when handed out, and the
//! node currently occupying it. Inserting into an occupied slot swaps the
//! occupant in place; an empty slot resolves its position from the anchor.

use crate::mutation::Mutation;
use std::collections::BTreeMap;
use tracing::trace;
use trellis_core::{Callback, Event, Host, HostError, HostNode, HostResult, Slot, Value};

#[derive(Debug, Clone)]
pub enum NodeData {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        listeners: Vec<(String, Callback)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct DomNode {
    data: NodeData,
    parent: Option<HostNode>,
    children: Vec<HostNode>,
}

#[derive(Debug, Clone, Copy)]
struct SlotEntry {
    parent: HostNode,
    after: Option<HostNode>,
    occupant: Option<HostNode>,
}

/// In-memory host surface with a mutation journal
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<DomNode>,
    slots: Vec<SlotEntry>,
    journal: Vec<Mutation>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detached element to render into. Not recorded in the journal.
    pub fn create_container(&mut self, tag: &str) -> HostNode {
        self.alloc(NodeData::Element {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            listeners: Vec::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn data(&self, node: HostNode) -> HostResult<&NodeData> {
        Ok(&self.get(node)?.data)
    }

    pub fn tag(&self, node: HostNode) -> Option<&str> {
        match &self.get(node).ok()?.data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    pub fn attribute(&self, node: HostNode, name: &str) -> Option<&str> {
        match &self.get(node).ok()?.data {
            NodeData::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeData::Text(_) => None,
        }
    }

    pub fn parent(&self, node: HostNode) -> Option<HostNode> {
        self.get(node).ok()?.parent
    }

    pub fn children(&self, node: HostNode) -> &[HostNode] {
        self.get(node)
            .map(|entry| entry.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn listener_count(&self, node: HostNode) -> usize {
        match self.get(node).map(|entry| &entry.data) {
            Ok(NodeData::Element { listeners, .. }) => listeners.len(),
            _ => 0,
        }
    }

    /// Concatenated text of every attached descendant
    pub fn text_content(&self, node: HostNode) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: HostNode, out: &mut String) {
        let Ok(entry) = self.get(node) else {
            return;
        };
        match &entry.data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element { .. } => {
                for child in &entry.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// First node under `root` (inclusive, depth-first) matching `predicate`
    pub fn find(
        &self,
        root: HostNode,
        predicate: &dyn Fn(HostNode, &NodeData) -> bool,
    ) -> Option<HostNode> {
        let entry = self.get(root).ok()?;
        if predicate(root, &entry.data) {
            return Some(root);
        }
        entry
            .children
            .iter()
            .find_map(|child| self.find(*child, predicate))
    }

    pub fn find_by_attribute(&self, root: HostNode, name: &str, value: &str) -> Option<HostNode> {
        self.find(root, &|node, _| self.attribute(node, name) == Some(value))
    }

    pub fn find_all_by_tag(&self, root: HostNode, tag: &str) -> Vec<HostNode> {
        let mut found = Vec::new();
        self.collect_by_tag(root, tag, &mut found);
        found
    }

    fn collect_by_tag(&self, node: HostNode, tag: &str, found: &mut Vec<HostNode>) {
        if self.tag(node) == Some(tag) {
            found.push(node);
        }
        for child in self.children(node) {
            self.collect_by_tag(*child, tag, found);
        }
    }

    pub fn journal(&self) -> &[Mutation] {
        &self.journal
    }

    pub fn take_journal(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// Deliver `event` to listeners on `target` and then on each ancestor.
    /// Returns how many listeners ran.
    pub fn dispatch(&self, target: HostNode, event: &Event) -> HostResult<usize> {
        self.get(target)?;

        let mut matched = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            let entry = self.get(node)?;
            if let NodeData::Element { listeners, .. } = &entry.data {
                matched.extend(
                    listeners
                        .iter()
                        .filter(|(name, _)| *name == event.name)
                        .map(|(_, listener)| listener.clone()),
                );
            }
            current = entry.parent;
        }

        trace!(%target, event = %event.name, listeners = matched.len(), "Dispatching event");
        for listener in &matched {
            listener.call(event);
        }
        Ok(matched.len())
    }

    fn alloc(&mut self, data: NodeData) -> HostNode {
        self.nodes.push(DomNode {
            data,
            parent: None,
            children: Vec::new(),
        });
        HostNode(self.nodes.len() as u64 - 1)
    }

    fn get(&self, node: HostNode) -> HostResult<&DomNode> {
        self.nodes
            .get(node.0 as usize)
            .ok_or(HostError::UnknownNode(node))
    }

    fn get_mut(&mut self, node: HostNode) -> HostResult<&mut DomNode> {
        self.nodes
            .get_mut(node.0 as usize)
            .ok_or(HostError::UnknownNode(node))
    }

    fn element_mut(
        &mut self,
        node: HostNode,
    ) -> HostResult<(&mut BTreeMap<String, String>, &mut Vec<(String, Callback)>)> {
        match &mut self.get_mut(node)?.data {
            NodeData::Element {
                attributes,
                listeners,
                ..
            } => Ok((attributes, listeners)),
            NodeData::Text(_) => Err(HostError::NotAnElement(node)),
        }
    }

    fn ensure_element(&self, node: HostNode) -> HostResult<()> {
        match self.get(node)?.data {
            NodeData::Element { .. } => Ok(()),
            NodeData::Text(_) => Err(HostError::NotAnElement(node)),
        }
    }

    fn index_in_parent(&self, parent: HostNode, child: HostNode) -> HostResult<Option<usize>> {
        Ok(self.get(parent)?.children.iter().position(|c| *c == child))
    }

    fn detach(&mut self, node: HostNode) -> HostResult<()> {
        if let Some(parent) = self.get(node)?.parent {
            self.get_mut(parent)?.children.retain(|child| *child != node);
            self.get_mut(node)?.parent = None;
        }
        Ok(())
    }

    fn new_slot(&mut self, parent: HostNode, after: Option<HostNode>) -> Slot {
        self.slots.push(SlotEntry {
            parent,
            after,
            occupant: None,
        });
        Slot(self.slots.len() as u64 - 1)
    }
}

impl Host for Document {
    fn create_element(&mut self, kind: &str) -> HostNode {
        let node = self.create_container(kind);
        self.journal.push(Mutation::CreateElement {
            node,
            tag: kind.to_string(),
        });
        node
    }

    fn create_text(&mut self, text: &str) -> HostNode {
        let node = self.alloc(NodeData::Text(text.to_string()));
        self.journal.push(Mutation::CreateText {
            node,
            text: text.to_string(),
        });
        node
    }

    fn set_attribute(&mut self, node: HostNode, name: &str, value: &Value) -> HostResult<()> {
        let value = value.to_string();
        let (attributes, _) = self.element_mut(node)?;
        attributes.insert(name.to_string(), value.clone());
        self.journal.push(Mutation::SetAttribute {
            node,
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    fn add_event_listener(
        &mut self,
        node: HostNode,
        event: &str,
        listener: Callback,
    ) -> HostResult<()> {
        let (_, listeners) = self.element_mut(node)?;
        listeners.push((event.to_string(), listener));
        self.journal.push(Mutation::AddListener {
            node,
            event: event.to_string(),
        });
        Ok(())
    }

    fn insert_at(&mut self, slot: Slot, node: HostNode) -> HostResult<()> {
        let entry = *self
            .slots
            .get(slot.0 as usize)
            .ok_or(HostError::UnknownSlot(slot))?;
        let parent = entry.parent;
        self.ensure_element(parent)?;
        self.detach(node)?;

        let replaced = match entry.occupant {
            Some(old) if self.get(old)?.parent == Some(parent) => Some(old),
            _ => None,
        };

        let index = match (replaced, entry.after) {
            (Some(old), _) => {
                let index = self.index_in_parent(parent, old)?.unwrap_or(0);
                self.detach(old)?;
                index
            }
            (None, None) => 0,
            (None, Some(anchor)) => self
                .index_in_parent(parent, anchor)?
                .map(|index| index + 1)
                .ok_or(HostError::DetachedAnchor { slot, anchor })?,
        };

        self.get_mut(parent)?.children.insert(index, node);
        self.get_mut(node)?.parent = Some(parent);
        self.slots[slot.0 as usize].occupant = Some(node);

        trace!(%slot, %parent, %node, index, "Inserted node");
        self.journal.push(Mutation::Insert {
            slot,
            parent,
            node,
            replaced,
        });
        Ok(())
    }

    fn has_children(&self, parent: HostNode) -> HostResult<bool> {
        Ok(!self.get(parent)?.children.is_empty())
    }

    fn location_after_last_child(&mut self, parent: HostNode) -> HostResult<Slot> {
        self.ensure_element(parent)?;
        let last = self.get(parent)?.children.last().copied();
        Ok(self.new_slot(parent, last))
    }

    fn location_at_start(&mut self, parent: HostNode) -> HostResult<Slot> {
        self.ensure_element(parent)?;
        Ok(self.new_slot(parent, None))
    }
}
