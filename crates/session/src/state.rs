//! Session lifecycle states

/// Lifecycle of one connection.
///
/// A session only ever moves forward; authentication failure jumps straight
/// from `Authenticating` to `Terminated` without passing through `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Socket accepted, no credential examined yet
    Unauthenticated,
    /// Credential extracted, verification in progress
    Authenticating,
    /// Bound to an identity and processing frames
    Active,
    /// Connection torn down; no further events are emitted
    Terminated,
}

impl SessionState {
    /// True once the session is processing frames
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}
