use super::*;

#[tokio::test]
async fn test_move_success_is_final() {
    let service = scenario_service();
    let controller = mounted(&service).await;
    let mut rx = controller.subscribe();

    let outcome = controller.move_assignment("s1", "a1", "z2").await;
    assert_eq!(outcome, DropOutcome::Committed);

    let board = controller.board().await;
    assert!(board.staff_of("z1").is_empty());
    let moved = &board.staff_of("z2")[0];
    assert_eq!(moved.staff.full_name, "Alice");
    assert_eq!(moved.zone_id, "z2");
    assert_eq!(moved.zone, hall());

    let notes = drained(&mut rx);
    assert_eq!(notes, vec![Notification::success("Alice moved to Hall")]);

    // No reload after a move
    let fetches = service
        .calls()
        .iter()
        .filter(|c| **c == Call::GetZones)
        .count();
    assert_eq!(fetches, 1);
}

#[tokio::test]
async fn test_move_sends_ids() {
    let service = scenario_service();
    let controller = mounted(&service).await;

    controller.move_assignment("s1", "a1", "z2").await;

    assert_eq!(
        service.calls().last(),
        Some(&Call::Move {
            assignment_id: "a1".into(),
            staff_id: "s1".into(),
            zone_id: "z2".into(),
        })
    );
}

#[tokio::test]
async fn test_rejected_move_rolls_back() {
    let service = scenario_service();
    service.push_move_result(Err(ServiceError::rejected("locked")));
    let controller = mounted(&service).await;
    let before = controller.board().await;
    let mut rx = controller.subscribe();

    let outcome = controller.move_assignment("s1", "a1", "z2").await;
    assert_eq!(
        outcome,
        DropOutcome::RolledBack {
            message: "locked".into()
        }
    );

    let board = controller.board().await;
    assert_eq!(board, before);
    assert_eq!(board.staff_of("z1"), &[alice_assignment()]);
    assert!(board.staff_of("z2").is_empty());
    assert_eq!(drained(&mut rx), vec![Notification::error("locked")]);
}

#[tokio::test]
async fn test_transport_error_rolls_back_with_fallback_text() {
    let service = crowded_service();
    service.push_move_result(Err(ServiceError::Transport("connection reset".into())));
    let controller = mounted(&service).await;
    let before = controller.board().await;
    let mut rx = controller.subscribe();

    let outcome = controller.move_assignment("s2", "a2", "z2").await;
    assert_eq!(
        outcome,
        DropOutcome::RolledBack {
            message: "Failed to move staff".into()
        }
    );
    assert_eq!(controller.board().await, before);
    assert_eq!(drained(&mut rx)[0].level, crate::notify::NotificationLevel::Error);
}

#[tokio::test]
async fn test_move_to_same_zone_is_noop() {
    let service = scenario_service();
    let controller = mounted(&service).await;
    let before = controller.board().await;

    let outcome = controller.move_assignment("s1", "a1", "z1").await;
    assert_eq!(outcome, DropOutcome::SameZone);
    assert_eq!(controller.board().await, before);
    assert_eq!(service.move_calls(), 0);
}

#[tokio::test]
async fn test_move_to_unknown_zone_is_noop() {
    let service = scenario_service();
    let controller = mounted(&service).await;
    let before = controller.board().await;

    assert_eq!(
        controller.move_assignment("s1", "a1", "z9").await,
        DropOutcome::UnknownZone
    );
    assert_eq!(
        controller.move_assignment("s1", "missing", "z2").await,
        DropOutcome::NotFound
    );
    assert_eq!(controller.board().await, before);
    assert_eq!(service.move_calls(), 0);
}

#[tokio::test]
async fn test_successful_sequence_never_duplicates() {
    let service = crowded_service();
    let controller = mounted(&service).await;

    let moves = [
        ("s1", "a1", "z2"),
        ("s2", "a2", "z2"),
        ("s1", "a1", "z1"),
        ("s3", "a3", "z2"),
        ("s2", "a2", "z1"),
        ("s1", "a1", "z2"),
    ];
    for (staff, assignment, zone) in moves {
        assert_eq!(
            controller.move_assignment(staff, assignment, zone).await,
            DropOutcome::Committed
        );
    }

    let board = controller.board().await;
    for id in ["a1", "a2", "a3"] {
        assert_eq!(board.occurrences(id), 1, "{} duplicated or lost", id);
    }
    assert_eq!(staff_ids(&board, "z1"), vec!["s2"]);
    assert_eq!(staff_ids(&board, "z2"), vec!["s3", "s1"]);
    for zone in board.zones() {
        assert!(zone.staff_zones.iter().all(|a| a.zone_id == zone.zone.id && a.zone == zone.zone));
    }
}

#[tokio::test]
async fn test_concurrent_moves_settle_independently() {
    let service = crowded_service();
    let controller = Arc::new(mounted(&service).await);
    let gate_alice = service.gate_move("a1");
    let gate_bob = service.gate_move("a2");

    let first = tokio::spawn({
        let c = controller.clone();
        async move { c.move_assignment("s1", "a1", "z2").await }
    });
    let second = tokio::spawn({
        let c = controller.clone();
        async move { c.move_assignment("s2", "a2", "z2").await }
    });

    wait_until(|| service.move_calls() == 2).await;

    // Both applied optimistically while the calls are outstanding
    let board = controller.board().await;
    assert_eq!(staff_ids(&board, "z1"), vec!["s3"]);
    assert_eq!(staff_ids(&board, "z2"), vec!["s1", "s2"]);
    assert_eq!(controller.interaction().await.moving, vec!["a1", "a2"]);
    assert!(!controller.can_drag("a1").await);
    assert!(controller.can_drag("a3").await);

    // Same card cannot move twice; other cards still can
    assert_eq!(
        controller.move_assignment("s1", "a1", "z1").await,
        DropOutcome::Busy
    );

    gate_alice.send(Err(ServiceError::rejected("locked"))).unwrap();
    gate_bob.send(Ok(())).unwrap();

    assert_eq!(
        first.await.unwrap(),
        DropOutcome::RolledBack {
            message: "locked".into()
        }
    );
    assert_eq!(second.await.unwrap(), DropOutcome::Committed);

    let board = controller.board().await;
    assert_eq!(staff_ids(&board, "z1"), vec!["s1", "s3"]);
    assert_eq!(staff_ids(&board, "z2"), vec!["s2"]);
    assert_eq!(board.staff_of("z1")[0], alice_assignment());
    assert!(controller.interaction().await.moving.is_empty());
}
