//! Shared fixtures for the integration suite

use async_trait::async_trait;
use sentra_auth::TokenSigner;
use sentra_domain::{Identity, ServerEvent};
use sentra_registry::{ConnectionRegistry, ConnectionTicket};
use sentra_session::SessionOrchestrator;
use sentra_store::{MessageStore, SealedMemoryStore};
use sentra_trust::{OracleError, TrustEvaluator, TrustOracle};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedReceiver;

/// Oracle that replays a fixed script of scores and records every batch it
/// was handed.
pub struct ScriptedOracle {
    scores: Mutex<VecDeque<f64>>,
    batches: Mutex<Vec<Vec<String>>>,
}

impl ScriptedOracle {
    pub fn new(scores: &[f64]) -> Arc<Self> {
        Arc::new(Self {
            scores: Mutex::new(scores.iter().copied().collect()),
            batches: Mutex::new(Vec::new()),
        })
    }

    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().expect("lock").clone()
    }
}

#[async_trait]
impl TrustOracle for ScriptedOracle {
    async fn evaluate(&self, window: &[String]) -> Result<f64, OracleError> {
        self.batches.lock().expect("lock").push(window.to_vec());
        self.scores
            .lock()
            .expect("lock")
            .pop_front()
            .ok_or_else(|| OracleError::Unavailable("script exhausted".into()))
    }
}

/// Fully wired relay core with a scripted oracle and a real sealed store.
pub struct RelayFixture {
    pub orchestrator: Arc<SessionOrchestrator>,
    pub oracle: Arc<ScriptedOracle>,
    pub store: Arc<SealedMemoryStore>,
    pub signer: TokenSigner,
}

impl RelayFixture {
    pub fn new(scores: &[f64]) -> Self {
        let oracle = ScriptedOracle::new(scores);
        let store = Arc::new(SealedMemoryStore::new());
        let signer = TokenSigner::generate();
        let orchestrator = Arc::new(SessionOrchestrator::new(
            Arc::new(ConnectionRegistry::new()),
            Arc::new(signer.verifier()),
            store.clone() as Arc<dyn MessageStore>,
            TrustEvaluator::new(oracle.clone()),
        ));
        Self {
            orchestrator,
            oracle,
            store,
            signer,
        }
    }

    /// Attach a user, returning the ticket and that user's event feed
    pub fn connect(&self, name: &str) -> (ConnectionTicket, UnboundedReceiver<ServerEvent>) {
        self.orchestrator.attach(Identity::new(name))
    }

    /// A valid `Cookie` header for `name`
    pub fn cookie_for(&self, name: &str) -> String {
        format!(
            "access_token=Bearer%20{}",
            self.signer.issue(&Identity::new(name), 60)
        )
    }

    /// Send one chat frame from `sender` to `receiver`
    pub async fn send(&self, sender: &str, receiver: &str, content: &str) {
        let raw = format!(r#"{{"receiver":"{receiver}","content":"{content}"}}"#);
        self.orchestrator
            .process_frame(&Identity::new(sender), &raw)
            .await;
    }
}

/// Collect everything currently queued on an event feed
pub fn drain(rx: &mut UnboundedReceiver<ServerEvent>) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
