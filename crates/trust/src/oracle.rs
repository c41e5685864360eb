//! Trust oracle seam and the simulated scorer

use crate::OracleError;
use async_trait::async_trait;
use rand::Rng;

/// External scoring service: an ordered batch of a sender's recent texts in,
/// a trust score in [0, 1] out.
#[async_trait]
pub trait TrustOracle: Send + Sync {
    /// Score an ordered batch (oldest first) of one sender's recent texts.
    async fn evaluate(&self, window: &[String]) -> Result<f64, OracleError>;
}

/// Random scorer for demos and load tests.
///
/// Scores land in the passing band most of the time, with a configurable
/// chance of dipping into 0.70..0.94 to exercise the freeze path.
pub struct SimulatedOracle {
    low_score_rate: f64,
}

impl SimulatedOracle {
    /// Oracle that dips below threshold 20% of the time
    pub fn new() -> Self {
        Self {
            low_score_rate: 0.2,
        }
    }

    /// Oracle with a custom below-threshold rate in [0, 1]
    pub fn with_low_score_rate(low_score_rate: f64) -> Self {
        Self { low_score_rate }
    }
}

impl Default for SimulatedOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrustOracle for SimulatedOracle {
    async fn evaluate(&self, _window: &[String]) -> Result<f64, OracleError> {
        let mut rng = rand::thread_rng();
        let score = if rng.gen_bool(self.low_score_rate) {
            rng.gen_range(0.70..0.94)
        } else {
            rng.gen_range(0.95..0.99)
        };
        Ok(score)
    }
}
