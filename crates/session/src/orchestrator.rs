//! Session orchestrator
//!
//! Owns the collaborator seams (auth verifier, message store, trust
//! evaluator) and the shared registry, and exposes the three operations a
//! transport needs: authenticate a handshake, attach/detach a connection,
//! and process one inbound frame.
//!
//! Frame pipeline (ACTIVE state), in order:
//! 1. Validate the frame; malformed or empty frames are dropped silently.
//! 2. Persist sender/receiver/content. Best-effort: failures are logged and
//!    the frame continues.
//! 3. Relay {sender, content, timestamp} to the receiver, if connected.
//! 4. Append the content to the sender's own window — never the receiver's.
//! 5. When the window holds a full 5 texts, score it with the oracle. A
//!    score below threshold sends the sender a freeze alert first.
//! 6. Send the sender a security update with the new count and the score
//!    (absent when no scoring call happened or the oracle failed).
//!
//! The window stays at capacity once full, so scoring re-runs on every
//! subsequent frame. Freezing is advisory: a low score never terminates the
//! connection here.

use sentra_auth::{strip_bearer, token_from_cookie_header, AuthError, AuthVerifier};
use sentra_domain::{
    round_score, ChatFrame, Identity, RelayMessage, SecurityEvent, ServerEvent, WINDOW_CAPACITY,
};
use sentra_registry::{ConnectionRegistry, ConnectionTicket};
use sentra_store::MessageStore;
use sentra_trust::{breaches_threshold, TrustEvaluator};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Core control loop shared by every connection task.
pub struct SessionOrchestrator {
    registry: Arc<ConnectionRegistry>,
    verifier: Arc<dyn AuthVerifier>,
    store: Arc<dyn MessageStore>,
    evaluator: TrustEvaluator,
}

impl SessionOrchestrator {
    /// Wire the orchestrator to its collaborators
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        verifier: Arc<dyn AuthVerifier>,
        store: Arc<dyn MessageStore>,
        evaluator: TrustEvaluator,
    ) -> Self {
        Self {
            registry,
            verifier,
            store,
            evaluator,
        }
    }

    /// The shared connection registry
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// AUTHENTICATING: extract the credential from the handshake `Cookie`
    /// header, verify it, and require the claim to match the identity the
    /// connection declared. Any failure closes the attempt.
    pub fn authenticate(
        &self,
        declared: &Identity,
        cookie_header: Option<&str>,
    ) -> Result<Identity, AuthError> {
        let token = cookie_header
            .and_then(token_from_cookie_header)
            .ok_or(AuthError::Missing)?;

        let claimed = self.verifier.verify(strip_bearer(token))?;
        if &claimed != declared {
            return Err(AuthError::IdentityMismatch {
                claimed: claimed.to_string(),
                declared: declared.to_string(),
            });
        }
        Ok(claimed)
    }

    /// Bind an authenticated identity to a fresh outbound channel. The
    /// returned receiver is the connection's event feed; the ticket proves
    /// this registration for `detach`.
    pub fn attach(
        &self,
        identity: Identity,
    ) -> (ConnectionTicket, mpsc::UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ticket = self.registry.connect(identity.clone(), tx);
        info!("session active for {}", identity);
        (ticket, rx)
    }

    /// ACTIVE -> TERMINATED: drop the registration and its window.
    pub fn detach(&self, ticket: &ConnectionTicket) {
        self.registry.disconnect(ticket);
        info!("session terminated for {}", ticket.identity());
    }

    /// Run one inbound frame from `sender` through the pipeline.
    pub async fn process_frame(&self, sender: &Identity, raw: &str) {
        let Some(frame) = ChatFrame::parse(raw).and_then(ChatFrame::into_valid) else {
            debug!("dropping malformed frame from {}", sender);
            return;
        };

        // Persistence is best-effort on the relay path.
        if let Err(e) = self
            .store
            .append(sender, &frame.receiver, &frame.content)
            .await
        {
            error!("failed to persist message from {}: {}", sender, e);
        }

        self.registry.unicast(
            &frame.receiver,
            RelayMessage::new(sender.clone(), frame.content.clone()),
        );

        // The window is keyed by the SENDER. Appending anywhere else would
        // let one user poison another's trust evaluation.
        let windows = self.registry.windows();
        let count = windows.append(sender, frame.content);

        let mut score = None;
        if count == WINDOW_CAPACITY {
            score = self.evaluator.evaluate(&windows.snapshot(sender)).await;
            if let Some(s) = score {
                if breaches_threshold(s) {
                    self.registry.unicast(
                        sender,
                        SecurityEvent::Freeze {
                            score: round_score(s),
                        },
                    );
                }
            }
        }

        self.registry.unicast(
            sender,
            SecurityEvent::Update {
                count,
                score: score.map(round_score),
            },
        );
    }
}
