//! Deferred state updates requested from event listeners.
//!
//! A listener runs while the host is busy dispatching, so it cannot touch the
//! render root itself. It queues an updater instead, and the caller flushes
//! the queue once dispatch returns.
//!
//! Listeners are compared by source label during reconciliation, so a reused
//! node keeps the closure from an earlier render. Updaters therefore receive
//! the state current at flush time rather than capturing it.

use crate::error::ReconcileResult;
use crate::host::Host;
use crate::render::RenderRoot;
use crate::value::{Callback, Event, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::debug;

/// Computes a partial state from the current state
pub type Updater = Box<dyn FnOnce(&Value) -> Value>;

/// Shared FIFO of pending updaters
#[derive(Clone, Default)]
pub struct UpdateQueue {
    pending: Rc<RefCell<VecDeque<Updater>>>,
}

impl UpdateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, updater: impl FnOnce(&Value) -> Value + 'static) {
        self.pending.borrow_mut().push_back(Box::new(updater));
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Listener that queues `handler(event, state)` for the next flush
    pub fn listener(
        &self,
        source: impl Into<String>,
        handler: impl Fn(&Event, &Value) -> Value + 'static,
    ) -> Callback {
        let queue = self.clone();
        let handler = Rc::new(handler);
        Callback::new(source, move |event: &Event| {
            let handler = Rc::clone(&handler);
            let event = event.clone();
            queue.push(move |state| handler(&event, state));
        })
    }

    /// Apply queued updaters to `root` in order, including any queued while
    /// flushing. Returns how many ran.
    pub fn flush(&self, root: &mut RenderRoot, host: &mut dyn Host) -> ReconcileResult<usize> {
        let mut applied = 0;
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(updater) = next else {
                break;
            };
            let state = root
                .composite()
                .map(|composite| composite.state().clone())
                .unwrap_or_default();
            root.set_state(host, updater(&state))?;
            applied += 1;
        }
        if applied > 0 {
            debug!(applied, "Flushed queued state updates");
        }
        Ok(applied)
    }
}
