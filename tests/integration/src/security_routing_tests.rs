//! Strict routing and authentication gating

use crate::test_utils::{drain, RelayFixture};
use sentra_auth::AuthError;
use sentra_domain::{Identity, SecurityEvent, ServerEvent};

#[tokio::test]
async fn test_security_events_never_reach_the_receiver() {
    let relay = RelayFixture::new(&[0.70]);
    let (_alice, mut alice_rx) = relay.connect("alice");
    let (_bob, mut bob_rx) = relay.connect("bob");

    for i in 1..=5 {
        relay.send("alice", "bob", &format!("msg {i}")).await;
    }

    // Bob sees relays and nothing else, even though alice just froze.
    let bob_events = drain(&mut bob_rx);
    assert_eq!(bob_events.len(), 5);
    assert!(bob_events
        .iter()
        .all(|e| matches!(e, ServerEvent::Relay(_))));

    let alice_events = drain(&mut alice_rx);
    let freeze = alice_events
        .iter()
        .find(|e| matches!(e, ServerEvent::Security(SecurityEvent::Freeze { .. })))
        .expect("freeze alert for alice");

    // The alert carries the tagged wire shape dashboards dispatch on.
    let wire = serde_json::to_value(freeze).expect("serialize");
    assert_eq!(wire["type"], "SECURITY_FREEZE");
    assert_eq!(wire["score"], 0.7);
}

#[tokio::test]
async fn test_third_parties_see_no_traffic() {
    let relay = RelayFixture::new(&[0.70]);
    let (_alice, _alice_rx) = relay.connect("alice");
    let (_bob, _bob_rx) = relay.connect("bob");
    let (_carol, mut carol_rx) = relay.connect("carol");

    for i in 1..=5 {
        relay.send("alice", "bob", &format!("private {i}")).await;
    }

    assert!(drain(&mut carol_rx).is_empty());
    assert!(relay
        .orchestrator
        .registry()
        .windows()
        .is_empty(&Identity::new("carol")));
}

#[tokio::test]
async fn test_windows_stay_isolated_under_interleaved_senders() {
    let relay = RelayFixture::new(&[0.97]);
    let (_alice, mut alice_rx) = relay.connect("alice");
    let (_bob, mut bob_rx) = relay.connect("bob");

    // Interleave: alice fills her window while bob chats back.
    for i in 1..=5 {
        relay.send("alice", "bob", &format!("alice {i}")).await;
        relay.send("bob", "alice", &format!("bob {i}")).await;
    }

    // Only alice hit capacity-based scoring with her own texts.
    let batches = relay.oracle.batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(
        batches[0],
        vec!["alice 1", "alice 2", "alice 3", "alice 4", "alice 5"]
    );
    assert_eq!(
        batches[1],
        vec!["bob 1", "bob 2", "bob 3", "bob 4", "bob 5"]
    );

    let alice_updates: Vec<usize> = drain(&mut alice_rx)
        .into_iter()
        .filter_map(|e| match e {
            ServerEvent::Security(SecurityEvent::Update { count, .. }) => Some(count),
            _ => None,
        })
        .collect();
    assert_eq!(alice_updates, vec![1, 2, 3, 4, 5]);

    let bob_updates: Vec<usize> = drain(&mut bob_rx)
        .into_iter()
        .filter_map(|e| match e {
            ServerEvent::Security(SecurityEvent::Update { count, .. }) => Some(count),
            _ => None,
        })
        .collect();
    assert_eq!(bob_updates, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_valid_cookie_authenticates_declared_identity() {
    let relay = RelayFixture::new(&[]);
    let cookie = relay.cookie_for("alice");

    let claimed = relay
        .orchestrator
        .authenticate(&Identity::new("alice"), Some(&cookie))
        .expect("authenticated");
    assert_eq!(claimed, Identity::new("alice"));
}

#[tokio::test]
async fn test_expired_credential_never_reaches_active() {
    let relay = RelayFixture::new(&[]);
    let alice = Identity::new("alice");
    let stale = format!(
        "access_token=Bearer%20{}",
        relay.signer.issue_with_expiry(&alice, 1)
    );

    assert_eq!(
        relay.orchestrator.authenticate(&alice, Some(&stale)),
        Err(AuthError::Expired)
    );
    assert!(!relay.orchestrator.registry().is_connected(&alice));
}

#[tokio::test]
async fn test_spoofed_identity_is_rejected() {
    let relay = RelayFixture::new(&[]);
    // Mallory holds a perfectly valid token, but for the wrong identity.
    let cookie = relay.cookie_for("mallory");

    let result = relay
        .orchestrator
        .authenticate(&Identity::new("alice"), Some(&cookie));
    assert!(matches!(result, Err(AuthError::IdentityMismatch { .. })));
}

#[tokio::test]
async fn test_missing_credential_is_rejected() {
    let relay = RelayFixture::new(&[]);
    let alice = Identity::new("alice");

    assert_eq!(
        relay.orchestrator.authenticate(&alice, None),
        Err(AuthError::Missing)
    );
    assert_eq!(
        relay
            .orchestrator
            .authenticate(&alice, Some("theme=dark; lang=th")),
        Err(AuthError::Missing)
    );
}
