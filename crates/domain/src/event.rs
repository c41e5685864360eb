//! Outbound server events
//!
//! Three payloads leave the relay:
//! - [`RelayMessage`] — the chat payload forwarded to the intended receiver
//! - [`SecurityEvent::Update`] — per-frame status for the sender only
//! - [`SecurityEvent::Freeze`] — advisory freeze alert for the sender only
//!
//! Security events are internally tagged with `type` so dashboards can
//! dispatch on it; relay messages are untagged, matching what chat clients
//! already consume.

use crate::identity::Identity;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Chat payload forwarded to the intended receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayMessage {
    /// Identity that sent the message
    pub sender: Identity,
    /// Message body
    pub content: String,
    /// RFC 3339 UTC timestamp assigned at relay time
    pub timestamp: String,
}

impl RelayMessage {
    /// Build a relay message stamped with the current time
    pub fn new(sender: Identity, content: impl Into<String>) -> Self {
        Self {
            sender,
            content: content.into(),
            timestamp: now_rfc3339(),
        }
    }
}

/// Status traffic addressed exclusively to the sender's own connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityEvent {
    /// Per-frame window status: size after this frame, plus the trust score
    /// when (and only when) a scoring call happened this frame.
    #[serde(rename = "SECURITY_UPDATE")]
    Update {
        /// Window size after this frame, 1..=5
        count: usize,
        /// Trust score rounded to 4 decimals, `null` when no scoring ran or
        /// the oracle was unavailable
        score: Option<f64>,
    },

    /// Advisory freeze alert: the sender's trust score fell below threshold.
    #[serde(rename = "SECURITY_FREEZE")]
    Freeze {
        /// Offending trust score rounded to 4 decimals
        score: f64,
    },
}

/// Any payload the registry can deliver over a live connection.
///
/// Untagged on the wire: relay messages serialize to their bare shape,
/// security events keep their `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerEvent {
    /// Chat payload for the receiver
    Relay(RelayMessage),
    /// Status payload for the sender
    Security(SecurityEvent),
}

impl From<RelayMessage> for ServerEvent {
    fn from(msg: RelayMessage) -> Self {
        Self::Relay(msg)
    }
}

impl From<SecurityEvent> for ServerEvent {
    fn from(event: SecurityEvent) -> Self {
        Self::Security(event)
    }
}

/// Current time as an RFC 3339 UTC string
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Round a trust score to 4 decimal places for reporting
pub fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}
