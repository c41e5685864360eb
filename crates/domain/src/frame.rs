//! Inbound chat frames
//!
//! A frame arrives as JSON text `{"receiver": ..., "content": ...}`. Frames
//! that fail to parse, or that are missing either field, or that carry an
//! empty value for either field, are dropped silently: the sender gets no
//! error and the session stays open.

use crate::identity::Identity;
use serde::Deserialize;

/// Inbound chat frame exactly as received off the wire.
///
/// Both fields are optional at this layer so that a partial frame still
/// parses; [`ChatFrame::into_valid`] is the single gate deciding whether the
/// frame is processed at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatFrame {
    /// Declared receiver of the message
    #[serde(default)]
    pub receiver: Option<Identity>,
    /// Message body
    #[serde(default)]
    pub content: Option<String>,
}

/// A chat frame that passed validation: both fields present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidFrame {
    /// Intended receiver
    pub receiver: Identity,
    /// Message body
    pub content: String,
}

impl ChatFrame {
    /// Parse raw frame text. Returns `None` for anything that is not a JSON
    /// object of the expected shape.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Validate the frame. Missing or empty receiver/content means the frame
    /// is dropped, not an error.
    pub fn into_valid(self) -> Option<ValidFrame> {
        let receiver = self.receiver.filter(|r| !r.is_empty())?;
        let content = self.content.filter(|c| !c.is_empty())?;
        Some(ValidFrame { receiver, content })
    }
}
