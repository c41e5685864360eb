//! WebSocket endpoint
//!
//! One task per connection. The handshake path `/ws/chat/{identity}`
//! declares the identity; the credential rides in the `Cookie` header and is
//! verified before the session goes ACTIVE. Auth failure of any kind closes
//! the socket with a policy-violation signal and nothing else.

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{Request, Response};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use sentra_domain::Identity;
use sentra_session::{SessionOrchestrator, SessionState};

/// Accept loop: one spawned task per connection.
pub async fn run(orchestrator: Arc<SessionOrchestrator>, bind_addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!("WebSocket endpoint listening on {}", bind_addr);

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                info!("new connection from {}", peer_addr);
                let orchestrator = Arc::clone(&orchestrator);

                tokio::spawn(async move {
                    if let Err(e) = handle_connection(orchestrator, stream, peer_addr).await {
                        error!("connection error from {}: {}", peer_addr, e);
                    }
                });
            }
            Err(e) => {
                error!("failed to accept connection: {}", e);
            }
        }
    }
}

/// Extract the declared identity from a `/ws/chat/{identity}` path.
fn identity_from_path(path: &str) -> Option<Identity> {
    let name = path.strip_prefix("/ws/chat/")?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some(Identity::new(name))
}

async fn handle_connection(
    orchestrator: Arc<SessionOrchestrator>,
    stream: TcpStream,
    peer_addr: SocketAddr,
) -> anyhow::Result<()> {
    let mut state = SessionState::Unauthenticated;
    debug!("session for {} now {:?}", peer_addr, state);
    let mut path = String::new();
    let mut cookie_header: Option<String> = None;

    let ws_stream = accept_hdr_async(stream, |req: &Request, resp: Response| {
        path = req.uri().path().to_string();
        cookie_header = req
            .headers()
            .get("cookie")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(resp)
    })
    .await?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    state = SessionState::Authenticating;
    debug!("session for {} now {:?}", peer_addr, state);

    let declared = match identity_from_path(&path) {
        Some(identity) => identity,
        None => {
            warn!("rejecting {}: bad endpoint path {}", peer_addr, path);
            close_policy_violation(&mut ws_sender).await;
            return Ok(());
        }
    };

    let identity = match orchestrator.authenticate(&declared, cookie_header.as_deref()) {
        Ok(identity) => identity,
        Err(e) => {
            warn!("rejecting {} as {}: {}", peer_addr, declared, e);
            close_policy_violation(&mut ws_sender).await;
            return Ok(());
        }
    };

    let (ticket, mut events) = orchestrator.attach(identity.clone());
    state = SessionState::Active;
    debug!("session for {} now {:?}", identity, state);

    loop {
        tokio::select! {
            // Inbound chat frames from this connection
            inbound = ws_receiver.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        orchestrator.process_frame(&identity, &text).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("client {} disconnected", identity);
                        break;
                    }
                    Some(Err(e)) => {
                        warn!("error receiving from {}: {}", identity, e);
                        break;
                    }
                    _ => {}
                }
            }

            // Outbound events addressed to this connection
            outbound = events.recv() => {
                match outbound {
                    Some(event) => {
                        let json = serde_json::to_string(&event)?;
                        if let Err(e) = ws_sender.send(Message::Text(json)).await {
                            warn!("error sending to {}: {}", identity, e);
                            break;
                        }
                    }
                    // Channel closed: this registration was superseded.
                    None => break,
                }
            }
        }
    }

    orchestrator.detach(&ticket);
    state = SessionState::Terminated;
    debug!("session for {} now {:?}", identity, state);
    Ok(())
}

async fn close_policy_violation<S>(ws_sender: &mut S)
where
    S: SinkExt<Message> + Unpin,
{
    let frame = CloseFrame {
        code: CloseCode::Policy,
        reason: "policy violation".into(),
    };
    let _ = ws_sender.send(Message::Close(Some(frame))).await;
}
