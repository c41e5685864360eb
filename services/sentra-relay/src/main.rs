//! Sentra relay service
//!
//! Binds the WebSocket endpoint, wires the session orchestrator to its
//! collaborators, and runs one task per live connection.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use sentra_auth::{SignedTokenVerifier, TokenSigner};
use sentra_registry::ConnectionRegistry;
use sentra_session::SessionOrchestrator;
use sentra_store::SealedMemoryStore;
use sentra_trust::{SimulatedOracle, TrustEvaluator};

mod config;
mod server;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let verifier: SignedTokenVerifier = match &config.auth_public_key_hex {
        Some(hex_key) => SignedTokenVerifier::from_hex(hex_key)?,
        None => {
            let signer = TokenSigner::generate();
            warn!(
                "AUTH_PUBLIC_KEY not set; using ephemeral key {} (tokens from previous runs are invalid)",
                signer.verifying_key_hex()
            );
            signer.verifier()
        }
    };

    let oracle = SimulatedOracle::with_low_score_rate(config.oracle_low_score_rate);
    let evaluator = TrustEvaluator::with_timeout(
        Arc::new(oracle),
        Duration::from_millis(config.oracle_timeout_ms),
    );

    let orchestrator = Arc::new(SessionOrchestrator::new(
        Arc::new(ConnectionRegistry::new()),
        Arc::new(verifier),
        Arc::new(SealedMemoryStore::new()),
        evaluator,
    ));

    info!("starting Sentra relay on {}", config.bind_addr);
    server::run(orchestrator, &config.bind_addr).await
}
