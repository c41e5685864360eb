//! Connection registry
//!
//! Maps each identity to its single live outbound channel. A new connect for
//! an identity supersedes the old entry without an explicit close — the
//! accepted reconnect race. Entries are generation-tagged: `disconnect` only
//! removes the entry the ticket was issued for, so a superseded session's
//! late teardown never touches its replacement's connection or window.

use crate::shard::ShardedMap;
use crate::window::RollingWindowTracker;
use sentra_domain::{Identity, ServerEvent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Outbound side of a live connection. The session's writer task drains the
/// paired receiver into the socket.
pub type OutboundChannel = mpsc::UnboundedSender<ServerEvent>;

struct Entry {
    generation: u64,
    channel: OutboundChannel,
}

/// Proof of a specific registration, required to disconnect it.
#[derive(Debug)]
pub struct ConnectionTicket {
    identity: Identity,
    generation: u64,
}

impl ConnectionTicket {
    /// Identity this ticket was issued for
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

/// Identity → live connection map with attached rolling windows.
pub struct ConnectionRegistry {
    connections: ShardedMap<Entry>,
    windows: Arc<RollingWindowTracker>,
    next_generation: AtomicU64,
}

impl ConnectionRegistry {
    /// Create an empty registry with its own window tracker
    pub fn new() -> Self {
        Self {
            connections: ShardedMap::new(),
            windows: Arc::new(RollingWindowTracker::new()),
            next_generation: AtomicU64::new(1),
        }
    }

    /// The rolling windows tied to this registry's connections
    pub fn windows(&self) -> &Arc<RollingWindowTracker> {
        &self.windows
    }

    /// Register `channel` as the live connection for `identity`, replacing
    /// any prior entry, and allocate an empty window if none exists.
    pub fn connect(&self, identity: Identity, channel: OutboundChannel) -> ConnectionTicket {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        self.connections.write(&identity, |shard| {
            let replaced = shard
                .insert(
                    identity.clone(),
                    Entry {
                        generation,
                        channel,
                    },
                )
                .is_some();
            if replaced {
                debug!("connection for {} superseded", identity);
            }
        });
        self.windows.open(&identity);

        ConnectionTicket {
            identity,
            generation,
        }
    }

    /// Remove the registration the ticket proves, discarding the identity's
    /// window. A stale ticket (the entry was already superseded) is a no-op
    /// and leaves the replacement's state untouched.
    pub fn disconnect(&self, ticket: &ConnectionTicket) -> bool {
        let removed = self.connections.write(&ticket.identity, |shard| {
            let current = shard
                .get(&ticket.identity)
                .map_or(false, |entry| entry.generation == ticket.generation);
            if current {
                shard.remove(&ticket.identity);
            }
            current
        });
        if removed {
            self.windows.discard(&ticket.identity);
        }
        removed
    }

    /// Send `event` to the identity's live connection, if any. Never errors,
    /// never queues for offline identities, never retries.
    pub fn unicast(&self, identity: &Identity, event: impl Into<ServerEvent>) {
        let event = event.into();
        self.connections.read(identity, |entry| {
            if let Some(entry) = entry {
                // Ignore send errors: a closing session is indistinguishable
                // from an absent one here.
                let _ = entry.channel.send(event);
            }
        });
    }

    /// True when the identity currently has a live connection
    pub fn is_connected(&self, identity: &Identity) -> bool {
        self.connections.read(identity, |entry| entry.is_some())
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
