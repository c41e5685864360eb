//! Sentra Session - The relay's core control loop
//!
//! The session orchestrator drives one authenticated connection through its
//! lifecycle:
//!
//! ```text
//! UNAUTHENTICATED -> AUTHENTICATING -> ACTIVE -> TERMINATED
//! ```
//!
//! and, while ACTIVE, runs every inbound chat frame through a fixed pipeline:
//! validate, persist, relay to the receiver, append to the SENDER's rolling
//! window, score the window when full, and report status back to the sender.
//!
//! Routing is strict by construction: relay messages go to the receiver's
//! channel and nowhere else; security updates and freeze alerts go to the
//! sender's channel and nowhere else. No step discloses the receiver's
//! identity or the content to any third party.

pub mod orchestrator;
pub mod state;

pub use orchestrator::SessionOrchestrator;
pub use state::SessionState;
