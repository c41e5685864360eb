//! Rolling window tracker
//!
//! Per-identity bounded FIFO of recent outgoing message texts, capacity
//! [`WINDOW_CAPACITY`]. The window always holds the sender's most recent
//! texts in arrival order; appending to a full window evicts the oldest
//! entry first.
//!
//! The tracker is keyed strictly by the SENDER of a message. Reading or
//! evaluating any other identity's window is a correctness violation — this
//! is the system's core anti-spoofing guarantee, enforced by the session
//! layer only ever passing its own bound identity here.

use crate::shard::ShardedMap;
use sentra_domain::{Identity, WINDOW_CAPACITY};
use std::collections::VecDeque;

/// Per-identity rolling windows of recent message texts.
pub struct RollingWindowTracker {
    windows: ShardedMap<VecDeque<String>>,
}

impl RollingWindowTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self {
            windows: ShardedMap::new(),
        }
    }

    /// Allocate an empty window for `identity` if none exists
    pub fn open(&self, identity: &Identity) {
        self.windows.write(identity, |shard| {
            shard
                .entry(identity.clone())
                .or_insert_with(|| VecDeque::with_capacity(WINDOW_CAPACITY));
        });
    }

    /// Append one text to the identity's window, evicting the oldest entry
    /// past capacity. Returns the window size after the append.
    pub fn append(&self, identity: &Identity, text: impl Into<String>) -> usize {
        let text = text.into();
        self.windows.write(identity, |shard| {
            let window = shard
                .entry(identity.clone())
                .or_insert_with(|| VecDeque::with_capacity(WINDOW_CAPACITY));
            if window.len() == WINDOW_CAPACITY {
                window.pop_front();
            }
            window.push_back(text);
            window.len()
        })
    }

    /// Current window size, 0..=5
    pub fn len(&self, identity: &Identity) -> usize {
        self.windows
            .read(identity, |window| window.map_or(0, VecDeque::len))
    }

    /// True when the identity has no buffered texts
    pub fn is_empty(&self, identity: &Identity) -> bool {
        self.len(identity) == 0
    }

    /// Ordered contents, oldest first, without mutating state
    pub fn snapshot(&self, identity: &Identity) -> Vec<String> {
        self.windows.read(identity, |window| {
            window.map_or_else(Vec::new, |w| w.iter().cloned().collect())
        })
    }

    /// Drop the identity's window entirely
    pub fn discard(&self, identity: &Identity) {
        self.windows.write(identity, |shard| {
            shard.remove(identity);
        });
    }
}

impl Default for RollingWindowTracker {
    fn default() -> Self {
        Self::new()
    }
}
