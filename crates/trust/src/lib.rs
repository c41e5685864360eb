//! Sentra Trust - Trust-scoring protocol around the external oracle
//!
//! The relay does not define the statistical model that scores a sender's
//! recent messages; it defines the protocol around calling it:
//! - The [`TrustOracle`] seam: an ordered batch of exactly
//!   [`WINDOW_CAPACITY`](sentra_domain::WINDOW_CAPACITY) texts in, a score in
//!   [0, 1] out
//! - The [`TrustEvaluator`]: timeout-bounded invocation that maps every
//!   failure mode (error, timeout, out-of-range score) to "score
//!   unavailable" — never to "score passed"
//! - The freeze threshold and its strict `<` comparison
//!
//! A [`SimulatedOracle`] ships for demos and load tests; production wires a
//! real scoring service behind the same trait.

pub mod error;
pub mod evaluator;
pub mod oracle;

pub use error::OracleError;
pub use evaluator::{TrustEvaluator, DEFAULT_ORACLE_TIMEOUT};
pub use oracle::{SimulatedOracle, TrustOracle};

/// Scores strictly below this freeze the sender's session (advisory).
pub const TRUST_THRESHOLD: f64 = 0.95;

/// True when a score falls below the freeze threshold.
///
/// Comparison is strict: exactly 0.95 passes.
pub fn breaches_threshold(score: f64) -> bool {
    score < TRUST_THRESHOLD
}
