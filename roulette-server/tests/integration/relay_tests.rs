use roulette_core::{ConnectionId, RoomId, ServerMessage, SignalKind};
use roulette_server::{MatchCommand, MatchmakerConfig};
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{
    expect_silence, expect_welcome, pair_two, recv_signal, spawn_matchmaker,
};

#[tokio::test]
async fn test_offer_reaches_partner_verbatim_and_no_one_else() {
    init_tracing();
    let (cmd_tx, signaling, mut rx) = spawn_matchmaker(MatchmakerConfig::default());
    let (x, y, room_id) = pair_two(&cmd_tx, &mut rx).await.unwrap();

    let payload = json!({ "type": "offer", "sdp": "v=0\r\no=- 4611731400 2 IN IP4 127.0.0.1" });
    cmd_tx
        .send(MatchCommand::Relay {
            connection_id: x,
            room_id,
            kind: SignalKind::Offer,
            payload: payload.clone(),
        })
        .await
        .unwrap();

    let (to, msg) = recv_signal(&mut rx).await.unwrap();
    assert_eq!(to, y);
    assert_eq!(msg, ServerMessage::Offer { payload });
    expect_silence(&mut rx).await;

    // the sender never gets its own handshake message back
    assert!(
        !signaling
            .sent_to(x)
            .await
            .iter()
            .any(|m| matches!(m, ServerMessage::Offer { .. }))
    );
}

#[tokio::test]
async fn test_candidates_flow_in_any_order_relative_to_offer() {
    init_tracing();
    let (cmd_tx, _signaling, mut rx) = spawn_matchmaker(MatchmakerConfig::default());
    let (x, y, room_id) = pair_two(&cmd_tx, &mut rx).await.unwrap();

    // candidate from the non-initiator before any offer was relayed
    let early = json!({ "candidate": "candidate:0 1 UDP 2122252543 192.0.2.1 54400 typ host" });
    cmd_tx
        .send(MatchCommand::Relay {
            connection_id: y,
            room_id,
            kind: SignalKind::Candidate,
            payload: early.clone(),
        })
        .await
        .unwrap();

    let (to, msg) = recv_signal(&mut rx).await.unwrap();
    assert_eq!(to, x);
    assert_eq!(msg, ServerMessage::Candidate { payload: early });

    // two more from the initiator, delivered in send order
    for seq in 0..2 {
        let payload = json!({ "candidate": format!("candidate:{seq}") });
        cmd_tx
            .send(MatchCommand::Relay {
                connection_id: x,
                room_id,
                kind: SignalKind::Candidate,
                payload: payload.clone(),
            })
            .await
            .unwrap();

        let (to, msg) = recv_signal(&mut rx).await.unwrap();
        assert_eq!(to, y);
        assert_eq!(msg, ServerMessage::Candidate { payload });
    }
}

#[tokio::test]
async fn test_answer_reaches_initiator() {
    init_tracing();
    let (cmd_tx, _signaling, mut rx) = spawn_matchmaker(MatchmakerConfig::default());
    let (x, y, room_id) = pair_two(&cmd_tx, &mut rx).await.unwrap();

    let payload = json!({ "type": "answer", "sdp": "v=0" });
    cmd_tx
        .send(MatchCommand::Relay {
            connection_id: y,
            room_id,
            kind: SignalKind::Answer,
            payload: payload.clone(),
        })
        .await
        .unwrap();

    let (to, msg) = recv_signal(&mut rx).await.unwrap();
    assert_eq!(to, x);
    assert_eq!(msg, ServerMessage::Answer { payload });
}

#[tokio::test]
async fn test_relay_with_stale_room_id_is_dropped() {
    init_tracing();
    let (cmd_tx, _signaling, mut rx) = spawn_matchmaker(MatchmakerConfig::default());
    let (x, _y, _room_id) = pair_two(&cmd_tx, &mut rx).await.unwrap();

    cmd_tx
        .send(MatchCommand::Relay {
            connection_id: x,
            room_id: RoomId::new(),
            kind: SignalKind::Offer,
            payload: json!({}),
        })
        .await
        .unwrap();

    expect_silence(&mut rx).await;
}

#[tokio::test]
async fn test_relay_from_waiting_connection_is_dropped() {
    init_tracing();
    let (cmd_tx, _signaling, mut rx) = spawn_matchmaker(MatchmakerConfig::default());

    let z = ConnectionId::new();
    cmd_tx
        .send(MatchCommand::Connect { connection_id: z })
        .await
        .unwrap();
    expect_welcome(&mut rx, z).await.unwrap();

    cmd_tx
        .send(MatchCommand::Relay {
            connection_id: z,
            room_id: RoomId::new(),
            kind: SignalKind::Candidate,
            payload: json!({}),
        })
        .await
        .unwrap();

    expect_silence(&mut rx).await;
}

#[tokio::test]
async fn test_in_flight_message_after_teardown_is_dropped() {
    init_tracing();
    let (cmd_tx, _signaling, mut rx) = spawn_matchmaker(MatchmakerConfig::default());
    let (x, y, room_id) = pair_two(&cmd_tx, &mut rx).await.unwrap();

    cmd_tx
        .send(MatchCommand::Disconnect { connection_id: y })
        .await
        .unwrap();
    let (to, msg) = recv_signal(&mut rx).await.unwrap();
    assert_eq!((to, msg), (x, ServerMessage::PartnerLeft));

    // x still had a candidate in flight for the dead room
    cmd_tx
        .send(MatchCommand::Relay {
            connection_id: x,
            room_id,
            kind: SignalKind::Candidate,
            payload: json!({ "candidate": "late" }),
        })
        .await
        .unwrap();

    expect_silence(&mut rx).await;
}
