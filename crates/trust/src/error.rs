//! Error types for trust-oracle calls.

use thiserror::Error;

/// Why a scoring call produced no usable score.
///
/// Every variant means "score unavailable". None of them may ever be
/// interpreted as a passing score.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The oracle call itself failed
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    /// The oracle did not answer within the configured bound
    #[error("oracle call timed out")]
    Timeout,

    /// The oracle answered with a score outside [0, 1]
    #[error("oracle returned out-of-range score {0}")]
    OutOfRange(f64),

    /// The batch handed to the oracle did not hold exactly the window
    /// capacity of texts
    #[error("oracle batch had {0} texts, expected the full window")]
    BadBatch(usize),
}
