//! Timeout-bounded oracle invocation
//!
//! The evaluator is the only way the session layer talks to the oracle. It
//! enforces the batch contract (exactly one full window, oldest first),
//! bounds the call with a timeout so a stuck oracle never blocks a session
//! task, and collapses every failure to `None` — the caller reports the score
//! as unavailable, never as passed.

use crate::{OracleError, TrustOracle};
use sentra_domain::WINDOW_CAPACITY;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Default bound on a single oracle call.
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Bounded, failure-collapsing front end for a [`TrustOracle`].
#[derive(Clone)]
pub struct TrustEvaluator {
    oracle: Arc<dyn TrustOracle>,
    timeout: Duration,
}

impl TrustEvaluator {
    /// Wrap an oracle with the default timeout
    pub fn new(oracle: Arc<dyn TrustOracle>) -> Self {
        Self::with_timeout(oracle, DEFAULT_ORACLE_TIMEOUT)
    }

    /// Wrap an oracle with an explicit timeout
    pub fn with_timeout(oracle: Arc<dyn TrustOracle>, timeout: Duration) -> Self {
        Self { oracle, timeout }
    }

    /// Score a full window. Returns `None` whenever no trustworthy score is
    /// available: wrong batch size, oracle error, timeout, or a score
    /// outside [0, 1].
    pub async fn evaluate(&self, window: &[String]) -> Option<f64> {
        let result = if window.len() != WINDOW_CAPACITY {
            Err(OracleError::BadBatch(window.len()))
        } else {
            match tokio::time::timeout(self.timeout, self.oracle.evaluate(window)).await {
                Ok(Ok(score)) if (0.0..=1.0).contains(&score) => Ok(score),
                Ok(Ok(score)) => Err(OracleError::OutOfRange(score)),
                Ok(Err(e)) => Err(e),
                Err(_) => Err(OracleError::Timeout),
            }
        };

        match result {
            Ok(score) => Some(score),
            Err(e) => {
                warn!("trust score unavailable: {}", e);
                None
            }
        }
    }
}
