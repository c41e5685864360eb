//! End-to-end frame pipeline scenarios

use crate::test_utils::{drain, RelayFixture};
use sentra_domain::{Identity, SecurityEvent, ServerEvent};
use sentra_store::MessageStore;

#[tokio::test]
async fn test_four_benign_messages_to_offline_peer() {
    let relay = RelayFixture::new(&[]);
    let (_alice, mut alice_rx) = relay.connect("alice");

    for i in 1..=4 {
        relay.send("alice", "bob", &format!("benign {i}")).await;
    }

    let events = drain(&mut alice_rx);
    assert_eq!(events.len(), 4);
    for (i, event) in events.iter().enumerate() {
        assert_eq!(
            event,
            &ServerEvent::Security(SecurityEvent::Update {
                count: i + 1,
                score: None
            })
        );
    }

    // Bob was never connected: nothing relayed, nothing scored.
    assert!(relay.oracle.batches().is_empty());
    assert_eq!(relay.store.len(), 4);
}

#[tokio::test]
async fn test_fifth_message_triggers_scoring_and_freeze() {
    let relay = RelayFixture::new(&[0.80]);
    let (_alice, mut alice_rx) = relay.connect("alice");

    for i in 1..=5 {
        relay.send("alice", "bob", &format!("msg {i}")).await;
    }

    let events = drain(&mut alice_rx);
    assert_eq!(events.len(), 6);
    assert_eq!(
        events[4],
        ServerEvent::Security(SecurityEvent::Freeze { score: 0.80 })
    );
    assert_eq!(
        events[5],
        ServerEvent::Security(SecurityEvent::Update {
            count: 5,
            score: Some(0.80)
        })
    );

    let batches = relay.oracle.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(
        batches[0],
        vec!["msg 1", "msg 2", "msg 3", "msg 4", "msg 5"]
    );
}

#[tokio::test]
async fn test_connected_receiver_gets_relay_with_untouched_window() {
    let relay = RelayFixture::new(&[]);
    let (_alice, mut alice_rx) = relay.connect("alice");
    let (_bob, mut bob_rx) = relay.connect("bob");

    relay.send("alice", "bob", "hello bob").await;

    let bob_events = drain(&mut bob_rx);
    assert_eq!(bob_events.len(), 1);
    match &bob_events[0] {
        ServerEvent::Relay(msg) => {
            assert_eq!(msg.sender, Identity::new("alice"));
            assert_eq!(msg.content, "hello bob");
            assert!(!msg.timestamp.is_empty());
        }
        other => panic!("expected relay message, got {other:?}"),
    }

    let windows = relay.orchestrator.registry().windows();
    assert!(windows.is_empty(&Identity::new("bob")));
    assert_eq!(windows.len(&Identity::new("alice")), 1);

    assert_eq!(drain(&mut alice_rx).len(), 1);
}

#[tokio::test]
async fn test_scoring_continues_every_frame_past_the_fifth() {
    let relay = RelayFixture::new(&[0.97, 0.96, 0.80]);
    let (_alice, mut alice_rx) = relay.connect("alice");

    for i in 1..=7 {
        relay.send("alice", "bob", &format!("msg {i}")).await;
    }

    let batches = relay.oracle.batches();
    assert_eq!(batches.len(), 3);
    assert_eq!(
        batches[2],
        vec!["msg 3", "msg 4", "msg 5", "msg 6", "msg 7"]
    );

    let events = drain(&mut alice_rx);
    // 7 updates + 1 freeze from the 0.80 on the seventh frame.
    assert_eq!(events.len(), 8);
    assert_eq!(
        events[6],
        ServerEvent::Security(SecurityEvent::Freeze { score: 0.80 })
    );
    assert_eq!(
        events[7],
        ServerEvent::Security(SecurityEvent::Update {
            count: 5,
            score: Some(0.80)
        })
    );
}

#[tokio::test]
async fn test_reconnect_resets_window_and_count() {
    let relay = RelayFixture::new(&[]);

    let (alice_ticket, _alice_rx) = relay.connect("alice");
    for i in 1..=3 {
        relay.send("alice", "bob", &format!("before {i}")).await;
    }
    relay.orchestrator.detach(&alice_ticket);

    let (_alice, mut alice_rx) = relay.connect("alice");
    relay.send("alice", "bob", "after reconnect").await;

    assert_eq!(
        drain(&mut alice_rx),
        vec![ServerEvent::Security(SecurityEvent::Update {
            count: 1,
            score: None
        })]
    );
}

#[tokio::test]
async fn test_transcript_survives_sealed_at_rest() {
    let relay = RelayFixture::new(&[]);
    let (_alice, _alice_rx) = relay.connect("alice");
    let (_bob, _bob_rx) = relay.connect("bob");

    relay.send("alice", "bob", "first").await;
    relay.send("bob", "alice", "second").await;

    let transcript = relay
        .store
        .history(&Identity::new("alice"), &Identity::new("bob"))
        .await
        .expect("history");
    let contents: Vec<&str> = transcript.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second"]);
}
