//! Match session tests: full games for 1-4 competitors, network intents,
//! replay, snapshots and bot play.

use proptest::prelude::*;

use chain_reaction::{
    find_best_move, Cell, CompetitorId, Coord, EngineError, GameRng, HeuristicPolicy, Match,
    MatchConfig, MatchSnapshot, MoveIntent, MovePolicy, Phase, RandomPolicy, Roster,
    SelectorConfig, Verdict,
};

fn id(n: u8) -> CompetitorId {
    CompetitorId::new(n)
}

fn config(count: usize) -> MatchConfig {
    MatchConfig::new(Roster::sequential(count).unwrap())
}

/// Play `policy` for everyone until a winner or `max_turns`.
fn play_out(game: &mut Match, policy: &dyn MovePolicy, max_turns: usize) {
    for _ in 0..max_turns {
        if game.is_finished() {
            break;
        }
        if game.play_policy_turn(policy).unwrap().is_none() {
            break;
        }
    }
}

// =============================================================================
// Full games
// =============================================================================

/// Random play terminates with a winner for every roster size.
#[test]
fn test_random_games_finish() {
    for count in 1..=4 {
        for seed in 0..5 {
            let mut game = Match::new(config(count).with_seed(seed)).unwrap();
            play_out(&mut game, &RandomPolicy, 5_000);

            assert!(game.is_finished(), "{count} competitors, seed {seed}");
            let winner = game.winner().unwrap();
            assert_eq!(game.alive().as_slice(), &[winner]);
            assert!(game.phase() == Phase::SteadyState);
            assert_eq!(game.history().len() as u64, game.moves_made());
        }
    }
}

/// Heuristic bots against each other also reach a verdict.
#[test]
fn test_heuristic_games_finish() {
    let policy = HeuristicPolicy::default();
    for count in 2..=4 {
        let mut game = Match::new(config(count).with_seed(7)).unwrap();
        play_out(&mut game, &policy, 5_000);
        assert!(game.is_finished(), "{count} competitors");
    }
}

/// Unit mass equals the number of moves until someone is eliminated.
#[test]
fn test_total_units_track_moves() {
    let mut game = Match::new(config(3).with_seed(3)).unwrap();
    for _ in 0..40 {
        if game.is_finished() {
            break;
        }
        game.play_policy_turn(&RandomPolicy).unwrap();
        assert_eq!(game.grid().total_units(), game.moves_made());
    }
}

/// A cascade cut short by the step bound is reported and play continues.
#[test]
fn test_cascade_anomaly_keeps_match_running() {
    let config = config(2).with_grid(2, 2).with_max_cascade_steps(50);
    let mut snapshot = Match::new(config).unwrap().snapshot();
    // Every cell at capacity: one more unit can never settle.
    for (row, col, who) in [(0, 0, 1), (0, 1, 1), (1, 0, 2), (1, 1, 2)] {
        snapshot.grid.set_cell(Coord::new(row, col), Cell::owned(id(who), 1)).unwrap();
    }
    let mut game = Match::restore(snapshot).unwrap();

    let report = game.apply_placement(Coord::new(0, 0), id(1)).unwrap();
    let anomaly = report.outcome.anomaly.as_ref().unwrap();
    assert_eq!(anomaly.steps, 50);
    assert_eq!(report.outcome.explosion_count(), 50);
    assert_eq!(report.winner(), None);
    assert_eq!(report.next_actor, Some(id(2)));
    assert!(!game.grid().is_settled());
    assert_eq!(game.moves_made(), 1);
    assert_eq!(game.grid().total_units(), 5);

    // The partial grid leaves (0, 1) empty for competitor 2.
    assert_eq!(game.grid().cell_at(Coord::new(0, 1)).unwrap(), &Cell::empty());
    let report = game.apply_placement(Coord::new(0, 1), id(2)).unwrap();
    assert_eq!(report.sequence, 1);
    assert_eq!(game.moves_made(), 2);
    assert_eq!(game.grid().total_units(), 6);
}

/// A finished match refuses further moves.
#[test]
fn test_finished_match_rejects_moves() {
    let mut game = Match::new(config(1)).unwrap();
    let report = game.apply_placement(Coord::new(4, 3), id(1)).unwrap();
    assert_eq!(report.verdict, Verdict::Survivor(id(1)));
    assert_eq!(report.next_actor, None);

    let err = game.apply_placement(Coord::new(4, 3), id(1)).unwrap_err();
    assert_eq!(err, EngineError::MatchFinished { winner: id(1) });
    assert!(matches!(
        game.play_policy_turn(&RandomPolicy),
        Err(EngineError::MatchFinished { .. })
    ));
    assert_eq!(game.suggest_move(&RandomPolicy, &mut GameRng::new(0)), None);
}

// =============================================================================
// Network intents
// =============================================================================

/// Intents apply in sequence; duplicates and gaps are rejected.
#[test]
fn test_intent_sequencing() {
    let mut game = Match::new(config(2)).unwrap();
    let first = MoveIntent { sequence: 0, coord: Coord::new(0, 0), competitor: id(1) };

    game.apply_intent(first).unwrap();
    assert_eq!(
        game.apply_intent(first).unwrap_err(),
        EngineError::SequenceMismatch { expected: 1, got: 0 }
    );

    let skipped = MoveIntent { sequence: 2, coord: Coord::new(8, 5), competitor: id(2) };
    assert_eq!(
        game.apply_intent(skipped).unwrap_err(),
        EngineError::SequenceMismatch { expected: 1, got: 2 }
    );

    let second = MoveIntent { sequence: 1, ..skipped };
    let report = game.apply_intent(second).unwrap();
    assert_eq!(report.sequence, 1);
    assert_eq!(game.moves_made(), 2);
}

/// Placing on an opponent's cell is rejected and the turn does not pass.
#[test]
fn test_illegal_owner_keeps_turn() {
    let mut game = Match::new(config(2)).unwrap();
    game.apply_placement(Coord::new(2, 2), id(1)).unwrap();
    let hash = game.state_hash();

    assert!(!game.validate_placement(Coord::new(2, 2), id(2)));
    let err = game.apply_placement(Coord::new(2, 2), id(2)).unwrap_err();
    assert!(matches!(err, EngineError::IllegalOwner { .. }));
    assert_eq!(game.current_actor(), id(2));
    assert_eq!(game.state_hash(), hash);
}

// =============================================================================
// Replay and snapshots
// =============================================================================

/// Peers replaying the same log end in the same state.
#[test]
fn test_replay_matches_live_game() {
    let mut live = Match::new(config(4).with_seed(11)).unwrap();
    play_out(&mut live, &RandomPolicy, 60);

    let replayed = Match::replay(live.config().clone(), live.history().iter()).unwrap();
    assert_eq!(replayed.grid(), live.grid());
    assert_eq!(replayed.turn(), live.turn());
    assert_eq!(replayed.state_hash(), live.state_hash());
}

/// A snapshot survives a bincode round trip and resumes identically.
#[test]
fn test_snapshot_resume_continues_identically() {
    let mut game = Match::new(config(3).with_seed(5)).unwrap();
    play_out(&mut game, &RandomPolicy, 20);

    let bytes = game.snapshot().to_bytes().unwrap();
    let mut resumed = Match::restore(MatchSnapshot::from_bytes(&bytes).unwrap()).unwrap();
    assert_eq!(resumed.state_hash(), game.state_hash());

    play_out(&mut game, &RandomPolicy, 30);
    play_out(&mut resumed, &RandomPolicy, 30);
    assert_eq!(resumed.grid(), game.grid());
    assert_eq!(resumed.turn(), game.turn());
    assert_eq!(resumed.history(), game.history());
}

/// A snapshot with a tampered move count is refused.
#[test]
fn test_inconsistent_snapshot_rejected() {
    let mut game = Match::new(config(2)).unwrap();
    game.apply_placement(Coord::new(0, 0), id(1)).unwrap();

    let mut snapshot = game.snapshot();
    snapshot.turn.moves_made = 5;
    assert!(matches!(Match::restore(snapshot), Err(EngineError::Snapshot(_))));

    assert!(matches!(
        MatchSnapshot::from_bytes(&[1, 2, 3]),
        Err(EngineError::Snapshot(_))
    ));
}

/// Snapshots also serialize through any serde backend.
#[test]
fn test_snapshot_json() {
    let mut game = Match::new(config(2)).unwrap();
    game.apply_placement(Coord::new(1, 1), id(1)).unwrap();

    let json = serde_json::to_string(&game.snapshot()).unwrap();
    let back: MatchSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, game.snapshot());
}

/// Reset clears the board but keeps the config.
#[test]
fn test_reset_round() {
    let mut game = Match::new(config(2)).unwrap();
    play_out(&mut game, &RandomPolicy, 10);
    game.reset().unwrap();

    assert_eq!(game.moves_made(), 0);
    assert_eq!(game.current_actor(), id(1));
    assert_eq!(game.grid().total_units(), 0);
    assert!(game.history().is_empty());
    assert!(!game.is_finished());
}

// =============================================================================
// Move selection
// =============================================================================

/// Suggestions are legal, reproducible for a seed and never mutate the match.
#[test]
fn test_suggest_move_is_pure_and_legal() {
    let mut game = Match::new(config(2).with_seed(9)).unwrap();
    play_out(&mut game, &RandomPolicy, 12);
    let hash = game.state_hash();
    let policy = HeuristicPolicy::default();

    let a = game.suggest_move(&policy, &mut GameRng::new(1));
    let b = game.suggest_move(&policy, &mut GameRng::new(1));
    assert_eq!(a, b);
    if let Some(coord) = a {
        assert!(game.validate_placement(coord, game.current_actor()));
    }
    assert_eq!(game.state_hash(), hash);
}

/// With top-1 and no jitter the bot takes a winning capture.
#[test]
fn test_selector_takes_ready_cell_next_to_opponent() {
    let mut game = Match::new(config(2)).unwrap();
    // P1 builds (0,0) to capacity, P2 sits next to it.
    game.apply_placement(Coord::new(0, 0), id(1)).unwrap();
    game.apply_placement(Coord::new(0, 1), id(2)).unwrap();

    let mut greedy = SelectorConfig::default().with_top_k(1);
    greedy.weights = greedy.weights.without_jitter();

    let pick = find_best_move(game.grid(), id(1), &greedy, &mut GameRng::new(0));
    assert_eq!(pick, Some(Coord::new(0, 0)));

    let report = game.apply_placement(Coord::new(0, 0), id(1)).unwrap();
    assert_eq!(report.winner(), Some(id(1)));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Replaying any random game's log reproduces its final state.
    #[test]
    fn prop_replay_is_deterministic(seed in any::<u64>(), count in 1usize..=4, turns in 0usize..80) {
        let mut live = Match::new(config(count).with_seed(seed)).unwrap();
        play_out(&mut live, &RandomPolicy, turns);

        let replayed = Match::replay(live.config().clone(), live.history().iter()).unwrap();
        prop_assert_eq!(replayed.state_hash(), live.state_hash());
        prop_assert_eq!(replayed.grid(), live.grid());
    }

    /// The same seed always produces the same game.
    #[test]
    fn prop_seeded_games_are_reproducible(seed in any::<u64>()) {
        let mut a = Match::new(config(3).with_seed(seed)).unwrap();
        let mut b = Match::new(config(3).with_seed(seed)).unwrap();
        play_out(&mut a, &RandomPolicy, 50);
        play_out(&mut b, &RandomPolicy, 50);
        prop_assert_eq!(a.history(), b.history());
    }
}
