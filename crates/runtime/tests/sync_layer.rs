mod common;

use battle_core::{Controller, Difficulty, MatchVersion, PlayerAction, SideId};
use battle_runtime::{ErrorKind, MatchEvent, RuntimeError};

use common::{human_setup, runtime, setup};

#[tokio::test]
async fn accepted_submission_advances_version_and_broadcasts() {
    let mut runtime = runtime();
    let handle = runtime.create_match(human_setup(1)).unwrap();
    let mut rx = handle.subscribe().unwrap();

    let before = handle.snapshot().await.unwrap();
    assert_eq!(before.version(), MatchVersion::new(0, 0));

    let skill = before.side(SideId::A).active_unit().def.skills[0].id;
    let accepted = handle
        .submit(before.version(), PlayerAction::use_skill(SideId::A, skill))
        .await
        .unwrap();

    assert_eq!(accepted.version, MatchVersion::new(1, 0));
    assert_eq!(accepted.events.len(), 1);
    assert_eq!(accepted.events[0].result.damage(), 29);
    assert_eq!(accepted.state.turn.owner, SideId::B);

    // Readers of the old snapshot keep their version.
    assert_eq!(before.version(), MatchVersion::new(0, 0));
    assert!(before.event_log.is_empty());

    match rx.recv().await.unwrap() {
        MatchEvent::Update(update) => {
            assert_eq!(update.version, accepted.version);
            assert_eq!(update.events, accepted.events);
            assert_eq!(update.state.version(), accepted.version);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn stale_submission_leaves_state_byte_identical() {
    let mut runtime = runtime();
    let handle = runtime.create_match(human_setup(2)).unwrap();

    let first = handle.snapshot().await.unwrap();
    handle
        .submit(first.version(), PlayerAction::end_turn(SideId::A))
        .await
        .unwrap();

    let current = handle.snapshot().await.unwrap();
    let root_before = hex::encode(current.state_root());

    // Side B acting on the version it saw before side A's turn ended.
    let err = handle
        .submit(first.version(), PlayerAction::end_turn(SideId::B))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StaleSubmission);
    assert!(matches!(
        err,
        RuntimeError::StaleSubmission { expected, current: now }
            if expected == first.version() && now == current.version()
    ));

    let after = handle.snapshot().await.unwrap();
    assert_eq!(hex::encode(after.state_root()), root_before);
    assert_eq!(after.event_log.len(), 1);
}

#[tokio::test]
async fn illegal_action_is_rejected_without_effect() {
    let mut runtime = runtime();
    let handle = runtime.create_match(human_setup(3)).unwrap();
    let version = handle.version().await.unwrap();

    for _ in 0..2 {
        let response = handle
            .respond(version, PlayerAction::end_turn(SideId::B))
            .await;
        assert!(!response.accepted);
        let error = response.error.as_ref().unwrap();
        assert_eq!(error.kind, ErrorKind::IllegalAction);
        assert_eq!(error.code, "ACTION_NOT_TURN_OWNER");

        let json = response.to_json().unwrap();
        assert!(json.contains("\"accepted\":false"));
        assert!(json.contains("\"illegal_action\""));
    }

    let state = handle.snapshot().await.unwrap();
    assert_eq!(state.version(), version);
    assert!(state.event_log.is_empty());
}

#[tokio::test]
async fn forfeit_ends_match_and_publishes_summary_once() {
    let mut runtime = runtime();
    let handle = runtime.create_match(human_setup(4)).unwrap();
    let mut rx = handle.subscribe().unwrap();

    let accepted = handle.forfeit(SideId::A).await.unwrap();
    assert!(accepted.state.is_terminal());
    assert_eq!(accepted.state.winner(), Some(SideId::B));

    assert!(matches!(rx.recv().await.unwrap(), MatchEvent::Update(_)));
    match rx.recv().await.unwrap() {
        MatchEvent::Ended(summary) => {
            assert_eq!(summary.winner, SideId::B);
            assert_eq!(summary.final_event_log.len(), 1);
            assert_eq!(summary.final_event_log[0].action.action_type(), "forfeit");
        }
        other => panic!("unexpected event {other:?}"),
    }

    let err = handle
        .submit(accepted.version, PlayerAction::end_turn(SideId::A))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MatchEnded);
    assert_eq!(handle.forfeit(SideId::B).await.unwrap_err().kind(), ErrorKind::MatchEnded);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn ended_match_rejects_even_stale_versions_as_ended() {
    let mut runtime = runtime();
    let handle = runtime.create_match(human_setup(5)).unwrap();
    handle.forfeit(SideId::B).await.unwrap();

    let err = handle
        .submit(MatchVersion::new(0, 0), PlayerAction::end_turn(SideId::A))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MatchEnded);
}

#[tokio::test]
async fn force_end_turn_hands_the_turn_over() {
    let mut runtime = runtime();
    let handle = runtime.create_match(human_setup(6)).unwrap();

    let accepted = handle.force_end_turn().await.unwrap();
    assert_eq!(accepted.state.turn.owner, SideId::B);
    assert_eq!(accepted.state.turn.number, 1);
    assert_eq!(accepted.events[0].action.action_type(), "forced-end-turn");
}

#[tokio::test]
async fn roster_errors_do_not_register_a_match() {
    let mut runtime = runtime();
    let mut bad = setup(7, Controller::Bot {
        difficulty: Difficulty::Easy,
    });
    bad.side_b.roster.pop();

    let err = runtime.create_match(bad).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RosterMaterialization);
    assert!(matches!(
        runtime.handle(battle_core::MatchId(7)),
        Err(RuntimeError::MatchNotFound(_))
    ));
}

#[tokio::test]
async fn duplicate_match_ids_are_refused() {
    let mut runtime = runtime();
    runtime.create_match(human_setup(8)).unwrap();
    assert!(matches!(
        runtime.create_match(human_setup(8)),
        Err(RuntimeError::MatchAlreadyExists(_))
    ));
}

#[tokio::test]
async fn evict_requires_a_terminal_match() {
    let mut runtime = runtime();
    let handle = runtime.create_match(human_setup(9)).unwrap();
    let id = handle.match_id();

    assert!(matches!(
        runtime.evict(id).await,
        Err(RuntimeError::MatchNotTerminal(_))
    ));
    assert!(runtime.handle(id).is_ok());

    handle.forfeit(SideId::A).await.unwrap();
    let summary = runtime.evict(id).await.unwrap();
    assert_eq!(summary.winner, SideId::B);

    assert!(matches!(runtime.handle(id), Err(RuntimeError::MatchNotFound(_))));
    assert!(matches!(
        handle.snapshot().await,
        Err(RuntimeError::CommandChannelClosed)
    ));
    assert!(handle.subscribe().is_none());
}

#[tokio::test]
async fn matches_are_independent() {
    let mut runtime = runtime();
    let first = runtime.create_match(human_setup(10)).unwrap();
    let second = runtime.create_match(human_setup(11)).unwrap();

    first.forfeit(SideId::A).await.unwrap();

    let other = second.snapshot().await.unwrap();
    assert!(!other.is_terminal());
    assert_eq!(runtime.match_ids().len(), 2);
    second
        .submit(other.version(), PlayerAction::end_turn(SideId::A))
        .await
        .unwrap();
    runtime.shutdown().await.unwrap();
}
