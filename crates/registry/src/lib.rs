//! Sentra Registry - Live connections and rolling message windows
//!
//! Two pieces of shared in-memory state back every session task:
//! - [`ConnectionRegistry`]: identity → live outbound channel, one entry per
//!   identity, generation-tagged so a superseded connection can neither be
//!   resurrected by a delayed send nor tear down its replacement
//! - [`RollingWindowTracker`]: identity → bounded FIFO of that sender's most
//!   recent outgoing texts, capacity 5, discarded with the connection
//!
//! Both are sharded by identity hash: mutations to one identity never contend
//! with unrelated identities' traffic. Windows live and die with the
//! registry entry — `connect` allocates an empty window, `disconnect`
//! discards it, and a reconnect therefore starts from a clean slate.

pub mod registry;
mod shard;
pub mod window;

pub use registry::{ConnectionRegistry, ConnectionTicket, OutboundChannel};
pub use window::RollingWindowTracker;
