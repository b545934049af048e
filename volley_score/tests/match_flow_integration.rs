/// Integration tests for match flow
///
/// These tests drive the engine through whole sets and matches and check
/// the scoring, rotation and lifecycle rules at the boundaries.
use volley_score::{
    Command, MatchEngine, MatchError, MatchEvent, MatchFormat, MatchPhase, Rotation, SetScore,
    Side,
    game::engine::{ResetMatch, SetTeamName, SwapSides},
};

fn engine(sets_to_win: u8) -> MatchEngine {
    MatchEngine::new(MatchFormat::new(sets_to_win).unwrap())
}

fn points(engine: &mut MatchEngine, side: Side, n: u16) -> Vec<MatchEvent> {
    let mut events = Vec::new();
    for _ in 0..n {
        events.extend(engine.dispatch(Command::add_point(side)).unwrap());
    }
    events
}

/// Plays the current score up to `a`-`b` without closing the set, trading
/// points so neither side pulls ahead by two before the end.
fn play_to(engine: &mut MatchEngine, a: u16, b: u16) {
    let (mut cur_a, mut cur_b) = (engine.state().score_a, engine.state().score_b);
    while cur_a < a || cur_b < b {
        if cur_a < a && (cur_a <= cur_b || cur_b >= b) {
            points(engine, Side::A, 1);
            cur_a += 1;
        } else {
            points(engine, Side::B, 1);
            cur_b += 1;
        }
    }
}

fn win_set(engine: &mut MatchEngine, side: Side) -> Vec<MatchEvent> {
    let target = engine.state().points_to_win();
    points(engine, side, target)
}

#[test]
fn test_deciding_set_ends_at_fifteen() {
    let mut engine = engine(3);
    win_set(&mut engine, Side::A);
    win_set(&mut engine, Side::B);
    win_set(&mut engine, Side::A);
    win_set(&mut engine, Side::B);
    assert_eq!((engine.state().sets_a, engine.state().sets_b), (2, 2));
    assert!(engine.state().is_deciding_set());

    play_to(&mut engine, 14, 13);
    assert_eq!((engine.state().score_a, engine.state().score_b), (14, 13));

    let events = points(&mut engine, Side::A, 1);
    assert_eq!(engine.state().sets_a, 3);
    assert_eq!(engine.state().set_history.last(), Some(&SetScore::new(15, 13)));
    assert!(matches!(
        events.as_slice(),
        [
            MatchEvent::SetCompleted { winner: Side::A, .. },
            MatchEvent::MatchCompleted { winner: Side::A, .. }
        ]
    ));
}

#[test]
fn test_best_of_three_decider_ends_at_fifteen() {
    let mut engine = engine(2);
    win_set(&mut engine, Side::A);
    win_set(&mut engine, Side::B);
    assert_eq!((engine.state().sets_a, engine.state().sets_b), (1, 1));
    assert!(engine.state().is_deciding_set());
    assert_eq!(engine.state().points_to_win(), 15);

    play_to(&mut engine, 14, 13);
    assert_eq!((engine.state().score_a, engine.state().score_b), (14, 13));

    let events = points(&mut engine, Side::A, 1);
    assert_eq!((engine.state().sets_a, engine.state().sets_b), (2, 1));
    assert_eq!(engine.state().phase(), MatchPhase::MatchComplete);
    assert_eq!(engine.state().winner(), Some(Side::A));
    assert!(matches!(
        events.as_slice(),
        [
            MatchEvent::SetCompleted { winner: Side::A, .. },
            MatchEvent::MatchCompleted {
                winner: Side::A,
                sets_a: 2,
                sets_b: 1,
                ..
            }
        ]
    ));
    assert_eq!(
        engine.state().set_history,
        vec![
            SetScore::new(25, 0),
            SetScore::new(0, 25),
            SetScore::new(15, 13)
        ]
    );
}

#[test]
fn test_regular_set_needs_two_point_lead() {
    let mut engine = engine(3);
    play_to(&mut engine, 24, 24);

    let events = points(&mut engine, Side::A, 1);
    assert!(events.is_empty());
    assert_eq!((engine.state().score_a, engine.state().score_b), (25, 24));
    assert_eq!(engine.state().sets_a, 0);

    points(&mut engine, Side::B, 1);
    points(&mut engine, Side::A, 1);
    assert_eq!((engine.state().score_a, engine.state().score_b), (26, 25));
    assert_eq!(engine.state().sets_a, 0);

    let events = points(&mut engine, Side::A, 1);
    assert_eq!(engine.state().sets_a, 1);
    assert_eq!(
        events,
        vec![MatchEvent::SetCompleted {
            winner: Side::A,
            score: SetScore::new(27, 25),
            sets_a: 1,
            sets_b: 0,
        }]
    );
}

#[test]
fn test_rotation_only_changes_on_side_out() {
    let mut engine = engine(3);
    assert_eq!(engine.state().serving_side, Side::A);

    points(&mut engine, Side::A, 1);
    assert_eq!(engine.state().rotation_a, Rotation::identity());
    assert_eq!(engine.state().rotation_b, Rotation::identity());

    points(&mut engine, Side::B, 1);
    assert_eq!(engine.state().serving_side, Side::B);
    assert_eq!(engine.state().rotation_b.positions(), &[6, 1, 2, 3, 4, 5]);
    assert_eq!(engine.state().rotation_a, Rotation::identity());

    points(&mut engine, Side::B, 3);
    assert_eq!(engine.state().rotation_b.positions(), &[6, 1, 2, 3, 4, 5]);

    points(&mut engine, Side::A, 1);
    assert_eq!(engine.state().rotation_a.positions(), &[6, 1, 2, 3, 4, 5]);
}

#[test]
fn test_three_sets_complete_best_of_five() {
    let mut engine = engine(3);
    let mut events = Vec::new();
    for _ in 0..3 {
        events.extend(win_set(&mut engine, Side::A));
    }

    let completions: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, MatchEvent::MatchCompleted { .. }))
        .collect();
    assert_eq!(completions.len(), 1);
    match completions[0] {
        MatchEvent::MatchCompleted {
            winner,
            sets_a,
            sets_b,
            set_history,
        } => {
            assert_eq!(*winner, Side::A);
            assert_eq!((*sets_a, *sets_b), (3, 0));
            assert_eq!(set_history.len(), 3);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(engine.state().set_history.len(), 3);
    assert_eq!(engine.state().phase(), MatchPhase::MatchComplete);
}

#[test]
fn test_final_set_score_stays_on_board() {
    let mut engine = engine(2);
    win_set(&mut engine, Side::B);
    engine.dispatch(Command::request_timeout(Side::A)).unwrap();
    points(&mut engine, Side::A, 3);
    win_set(&mut engine, Side::B);

    let state = engine.state();
    assert_eq!(state.sets_b, 2);
    assert_eq!((state.score_a, state.score_b), (3, 25));
    assert_eq!(state.timeouts_remaining_a, 2);
    assert_eq!(state.rotation_a, Rotation::identity());
    assert_eq!(state.rotation_b, Rotation::identity());
}

#[test]
fn test_completed_match_rejects_points_until_reset() {
    let mut engine = engine(2);
    win_set(&mut engine, Side::A);
    win_set(&mut engine, Side::A);

    let before = engine.state().clone();
    assert_eq!(
        engine.dispatch(Command::add_point(Side::B)),
        Err(MatchError::MatchAlreadyComplete)
    );
    assert_eq!(
        engine.dispatch(Command::remove_point(Side::A)),
        Err(MatchError::MatchAlreadyComplete)
    );
    assert_eq!(engine.state(), &before);

    engine
        .dispatch(
            ResetMatch {
                sets_to_win: None,
                keep_names: true,
            }
            .into(),
        )
        .unwrap();
    assert_eq!(engine.state().phase(), MatchPhase::NotStarted);
    assert_eq!(engine.state().sets_to_win, 2);
    engine.dispatch(Command::add_point(Side::B)).unwrap();
}

#[test]
fn test_remove_point_never_below_zero() {
    let mut engine = engine(3);
    points(&mut engine, Side::B, 2);
    for _ in 0..5 {
        engine.dispatch(Command::remove_point(Side::B)).unwrap();
    }
    assert_eq!(engine.state().score_b, 0);
    assert_eq!(engine.state().score_a, 0);
}

#[test]
fn test_swap_sides_twice_is_identity() {
    let mut engine = engine(3);
    engine
        .dispatch(
            SetTeamName {
                side: Side::A,
                name: "Home".to_string(),
            }
            .into(),
        )
        .unwrap();
    win_set(&mut engine, Side::A);
    points(&mut engine, Side::B, 4);
    engine.dispatch(Command::request_timeout(Side::A)).unwrap();
    let before = engine.state().clone();

    engine.dispatch(SwapSides.into()).unwrap();
    let swapped = engine.state().clone();
    assert_eq!(swapped.score_a, before.score_b);
    assert_eq!(swapped.sets_b, before.sets_a);
    assert_eq!(swapped.team_name_b.as_str(), "Home");
    assert_eq!(swapped.timeouts_remaining_b, before.timeouts_remaining_a);
    assert_eq!(swapped.rotation_a, before.rotation_b);
    assert_eq!(swapped.serving_side, before.serving_side.other());

    engine.dispatch(SwapSides.into()).unwrap();
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_reset_keeping_names() {
    let mut engine = engine(3);
    engine
        .dispatch(
            SetTeamName {
                side: Side::B,
                name: "Visitors".to_string(),
            }
            .into(),
        )
        .unwrap();
    win_set(&mut engine, Side::B);
    points(&mut engine, Side::A, 7);
    engine.dispatch(Command::request_timeout(Side::B)).unwrap();

    let events = engine
        .dispatch(
            ResetMatch {
                sets_to_win: Some(2),
                keep_names: true,
            }
            .into(),
        )
        .unwrap();
    assert_eq!(events, vec![MatchEvent::MatchReset { sets_to_win: 2 }]);

    let state = engine.state();
    assert_eq!(state.team_name_b.as_str(), "Visitors");
    assert_eq!((state.score_a, state.score_b), (0, 0));
    assert_eq!((state.sets_a, state.sets_b), (0, 0));
    assert_eq!(state.timeouts_remaining_b, 2);
    assert_eq!(state.rotation_a, Rotation::identity());
    assert!(state.set_history.is_empty());
    assert_eq!(state.sets_to_win, 2);
}

#[test]
fn test_reset_without_names() {
    let mut engine = engine(3);
    engine
        .dispatch(
            SetTeamName {
                side: Side::A,
                name: "Home".to_string(),
            }
            .into(),
        )
        .unwrap();
    engine
        .dispatch(
            ResetMatch {
                sets_to_win: None,
                keep_names: false,
            }
            .into(),
        )
        .unwrap();
    assert_eq!(engine.state().team_name_a.as_str(), "TEAM A");
    assert_eq!(engine.state().sets_to_win, 3);
}
