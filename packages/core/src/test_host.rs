//! Minimal host that records every call, for unit tests.

use crate::error::{HostError, HostResult};
use crate::host::{Host, HostNode, Slot};
use crate::value::{Callback, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    CreateElement(String),
    CreateText(String),
    SetAttribute(HostNode, String, String),
    Listen(HostNode, String),
    Insert(Slot, HostNode),
}

#[derive(Debug, Default)]
struct Record {
    label: String,
    children: Vec<HostNode>,
}

#[derive(Debug)]
struct SlotRecord {
    parent: HostNode,
    index: usize,
    occupant: Option<HostNode>,
}

/// Records ops and keeps just enough structure to answer location queries
#[derive(Debug, Default)]
pub struct RecordingHost {
    nodes: Vec<Record>,
    slots: Vec<SlotRecord>,
    pub ops: Vec<Op>,
    pub listeners: Vec<(HostNode, String, Callback)>,
    /// Fail every `insert_at` while set
    pub reject_inserts: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(&mut self) -> HostNode {
        self.alloc("root")
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    pub fn mutation_count(&self) -> usize {
        self.ops.len()
    }

    /// Labels of the children of `parent`, for structure assertions
    pub fn labels(&self, parent: HostNode) -> Vec<String> {
        self.nodes[parent.0 as usize]
            .children
            .iter()
            .map(|child| self.nodes[child.0 as usize].label.clone())
            .collect()
    }

    fn alloc(&mut self, label: &str) -> HostNode {
        self.nodes.push(Record {
            label: label.to_string(),
            children: Vec::new(),
        });
        HostNode(self.nodes.len() as u64 - 1)
    }

    fn record(&self, node: HostNode) -> HostResult<&Record> {
        self.nodes
            .get(node.0 as usize)
            .ok_or(HostError::UnknownNode(node))
    }

    fn new_slot(&mut self, parent: HostNode, index: usize) -> Slot {
        self.slots.push(SlotRecord {
            parent,
            index,
            occupant: None,
        });
        Slot(self.slots.len() as u64 - 1)
    }
}

impl Host for RecordingHost {
    fn create_element(&mut self, kind: &str) -> HostNode {
        self.ops.push(Op::CreateElement(kind.to_string()));
        self.alloc(kind)
    }

    fn create_text(&mut self, text: &str) -> HostNode {
        self.ops.push(Op::CreateText(text.to_string()));
        self.alloc(&format!("\"{}\"", text))
    }

    fn set_attribute(&mut self, node: HostNode, name: &str, value: &Value) -> HostResult<()> {
        self.record(node)?;
        self.ops
            .push(Op::SetAttribute(node, name.to_string(), value.to_string()));
        Ok(())
    }

    fn add_event_listener(
        &mut self,
        node: HostNode,
        event: &str,
        listener: Callback,
    ) -> HostResult<()> {
        self.record(node)?;
        self.ops.push(Op::Listen(node, event.to_string()));
        self.listeners.push((node, event.to_string(), listener));
        Ok(())
    }

    fn insert_at(&mut self, slot: Slot, node: HostNode) -> HostResult<()> {
        if self.reject_inserts {
            return Err(HostError::UnknownSlot(slot));
        }
        let record = self
            .slots
            .get_mut(slot.0 as usize)
            .ok_or(HostError::UnknownSlot(slot))?;
        let (parent, index, occupant) = (record.parent, record.index, record.occupant);
        record.occupant = Some(node);

        let children = &mut self.nodes[parent.0 as usize].children;
        match occupant {
            Some(_) if index < children.len() => children[index] = node,
            _ => children.insert(index.min(children.len()), node),
        }
        self.ops.push(Op::Insert(slot, node));
        Ok(())
    }

    fn has_children(&self, parent: HostNode) -> HostResult<bool> {
        Ok(!self.record(parent)?.children.is_empty())
    }

    fn location_after_last_child(&mut self, parent: HostNode) -> HostResult<Slot> {
        let index = self.record(parent)?.children.len();
        Ok(self.new_slot(parent, index))
    }

    fn location_at_start(&mut self, parent: HostNode) -> HostResult<Slot> {
        self.record(parent)?;
        Ok(self.new_slot(parent, 0))
    }
}
