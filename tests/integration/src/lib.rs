//! Integration tests for the Sentra relay core
//!
//! This test suite validates:
//! - The end-to-end frame pipeline (persist, relay, window, score, report)
//! - Strict routing of security events to the sender only
//! - Window lifecycle across disconnect/reconnect
//! - Authentication gating at the session boundary

pub mod test_utils;

#[cfg(test)]
mod relay_flow_tests;

#[cfg(test)]
mod security_routing_tests;
