//! Sentra Domain - Shared wire and identity types for the Sentra relay
//!
//! This crate contains the vocabulary every other Sentra crate speaks, with
//! no I/O dependencies:
//! - User identities (opaque, stable strings)
//! - Inbound chat frames and their validation rules
//! - Outbound server events (relay messages, security updates, freeze alerts)
//!
//! Security events carry a `type` tag and are only ever addressed to the
//! sender's own connection; relay messages are untagged payloads addressed to
//! the intended receiver. Both live in one `ServerEvent` union so the
//! connection registry can treat outbound traffic uniformly while the session
//! layer decides who gets what.

#![warn(missing_docs)]

pub mod event;
pub mod frame;
pub mod identity;

pub use event::{now_rfc3339, round_score, RelayMessage, SecurityEvent, ServerEvent};
pub use frame::{ChatFrame, ValidFrame};
pub use identity::Identity;

/// Capacity of every sender's rolling message window. Trust evaluation runs
/// against exactly this many texts.
pub const WINDOW_CAPACITY: usize = 5;
