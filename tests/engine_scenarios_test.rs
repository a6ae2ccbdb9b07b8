//! End-to-end scoring scenarios against the engine.

use bowls_scorer::core::{MatchState, Mode};
use bowls_scorer::types::{EndRecord, GameVariant, ScoreEvent, Side};

fn records(state: &MatchState) -> Vec<(u32, u8, u8)> {
    state
        .history()
        .iter()
        .map(|r| (r.end, r.up, r.down))
        .collect()
}

fn assert_totals_match_history(state: &MatchState) {
    let up: u32 = state.history().iter().map(|r| u32::from(r.up)).sum();
    let down: u32 = state.history().iter().map(|r| u32::from(r.down)).sum();
    assert_eq!(state.up_total(), up);
    assert_eq!(state.down_total(), down);
}

#[test]
fn test_dead_end_then_scoring_end() {
    let mut state = MatchState::new(GameVariant::Singles);

    assert!(state.confirm_dead_end());
    assert_eq!(records(&state), vec![(1, 0, 0)]);
    assert_eq!(state.end_number(), 2);
    assert_eq!(state.up_total(), 0);

    assert!(state.register_bowl(Side::Up));
    assert!(state.register_bowl(Side::Up));
    assert_eq!(state.in_progress().up(), 2);
    assert!(state.commit_end());

    assert_eq!(records(&state), vec![(1, 0, 0), (2, 2, 0)]);
    assert_eq!(state.up_total(), 2);
    assert_eq!(state.end_number(), 3);
    assert_eq!(state.mode(), Mode::Idle);
}

#[test]
fn test_edit_recomputes_totals() {
    let mut state = MatchState::from_history(
        GameVariant::Singles,
        [EndRecord::new(1, 2, 0), EndRecord::new(2, 0, 1)],
    );
    assert_eq!((state.up_total(), state.down_total()), (2, 1));

    assert!(state.start_edit(1));
    assert!(state.set_scratch(0, 0));
    assert!(state.save_edit());

    assert_eq!(records(&state), vec![(1, 0, 0), (2, 0, 1)]);
    assert_eq!((state.up_total(), state.down_total()), (0, 1));
    assert_eq!(state.mode(), Mode::Idle);
}

#[test]
fn test_reaching_21_ends_the_game_and_freezes_taps() {
    // 4+4+4+4+3 puts Up on 19.
    let mut history: Vec<EndRecord> = (1..=4).map(|n| EndRecord::new(n, 4, 0)).collect();
    history.push(EndRecord::new(5, 3, 0));
    let mut state = MatchState::from_history(GameVariant::Doubles, history);
    assert_eq!(state.up_total(), 19);
    assert_eq!(state.mode(), Mode::Idle);

    assert!(state.register_bowl(Side::Up));
    assert!(state.register_bowl(Side::Up));
    assert!(state.commit_end());

    assert_eq!(state.up_total(), 21);
    assert_eq!(state.mode(), Mode::GameOver);
    assert_eq!(state.winner(), Some(Side::Up));

    let before = state.clone();
    assert!(!state.register_bowl(Side::Up));
    assert!(!state.register_bowl(Side::Down));
    assert!(!state.apply(ScoreEvent::CommitEnd));
    assert_eq!(state, before);
}

#[test]
fn test_insert_renumbers_following_ends() {
    let mut state = MatchState::from_history(
        GameVariant::Singles,
        [
            EndRecord::new(1, 2, 0),
            EndRecord::new(2, 0, 1),
            EndRecord::new(3, 1, 0),
        ],
    );

    assert!(state.start_add(2));
    assert_eq!(state.mode(), Mode::AddingEnd(2));
    assert!(state.register_bowl(Side::Down));
    assert!(state.save_add());

    assert_eq!(
        records(&state),
        vec![(1, 2, 0), (2, 0, 1), (3, 0, 1), (4, 1, 0)]
    );
    assert_eq!(state.end_number(), 5);
    assert!(state.history().is_dense());
    assert_totals_match_history(&state);
}

#[test]
fn test_insert_scratch_pair_set_directly() {
    let mut state = MatchState::from_history(
        GameVariant::Singles,
        [
            EndRecord::new(1, 2, 0),
            EndRecord::new(2, 0, 1),
            EndRecord::new(3, 1, 0),
        ],
    );
    assert!(state.apply(ScoreEvent::StartAdd(2)));
    assert!(state.set_scratch(1, 1));
    assert!(state.apply(ScoreEvent::SaveAdd));

    assert_eq!(
        records(&state),
        vec![(1, 2, 0), (2, 1, 1), (3, 0, 1), (4, 1, 0)]
    );
    assert_eq!(state.end_number(), 5);
    assert!(state.history().is_dense());
    assert_totals_match_history(&state);
}

#[test]
fn test_cancelled_insert_leaves_history_dense() {
    let mut state = MatchState::from_history(
        GameVariant::Singles,
        [EndRecord::new(1, 2, 0), EndRecord::new(2, 0, 1)],
    );
    assert!(state.start_add(1));
    assert!(state.cancel_add());
    assert_eq!(records(&state), vec![(1, 2, 0), (2, 0, 1)]);

    // 0-0 save counts as cancel.
    assert!(state.start_add(2));
    assert!(state.save_add());
    assert_eq!(records(&state), vec![(1, 2, 0), (2, 0, 1)]);
    assert_eq!(state.end_number(), 3);
}

#[test]
fn test_caps_hold_for_any_tap_sequence() {
    for variant in [GameVariant::Singles, GameVariant::Doubles] {
        for pattern in 0u32..256 {
            let mut state = MatchState::new(variant);
            for bit in 0..12 {
                let side = if pattern & (1 << (bit % 8)) == 0 {
                    Side::Up
                } else {
                    Side::Down
                };
                state.register_bowl(side);
                let tally = state.in_progress();
                assert!(tally.up() <= variant.max_score_per_side());
                assert!(tally.down() <= variant.max_score_per_side());
                assert!(tally.bowls() <= variant.max_bowls_per_end());
                assert!(tally.up() == 0 || tally.down() == 0);
            }
        }
    }
}

#[test]
fn test_opposite_side_rejected_until_reset() {
    let mut state = MatchState::new(GameVariant::Singles);
    assert!(state.register_bowl(Side::Down));
    assert!(!state.register_bowl(Side::Up));
    assert_eq!(state.in_progress().up(), 0);

    assert!(state.reset_current_end());
    assert!(state.register_bowl(Side::Up));
}

#[test]
fn test_reset_current_end_is_idempotent() {
    let mut state = MatchState::new(GameVariant::Doubles);
    state.register_bowl(Side::Up);
    state.register_bowl(Side::Up);

    state.reset_current_end();
    let once = state.clone();
    state.reset_current_end();
    assert_eq!(state, once);
}

#[test]
fn test_long_press_backs_out_of_scoring() {
    let mut state = MatchState::new(GameVariant::Singles);
    state.apply(ScoreEvent::Tap(Side::Up));
    assert_eq!(state.mode(), Mode::ScoringEnd);

    assert!(state.apply(ScoreEvent::LongPress(Side::Up)));
    assert_eq!(state.mode(), Mode::Idle);
    assert!(!state.apply(ScoreEvent::LongPress(Side::Up)));

    // The end is unclaimed again.
    assert!(state.apply(ScoreEvent::Tap(Side::Down)));
}

#[test]
fn test_totals_track_history_through_mixed_operations() {
    let mut state = MatchState::new(GameVariant::Doubles);
    let script = [
        ScoreEvent::Tap(Side::Up),
        ScoreEvent::Tap(Side::Up),
        ScoreEvent::CommitEnd,
        ScoreEvent::Tap(Side::Down),
        ScoreEvent::CommitEnd,
        ScoreEvent::ConfirmDeadEnd,
        ScoreEvent::StartEdit(2),
        ScoreEvent::Tap(Side::Down),
        ScoreEvent::Tap(Side::Down),
        ScoreEvent::SaveEdit,
        ScoreEvent::StartAdd(1),
        ScoreEvent::Tap(Side::Up),
        ScoreEvent::SaveAdd,
    ];
    for event in script {
        state.apply(event);
        assert_totals_match_history(&state);
    }
    assert_eq!(
        records(&state),
        vec![(1, 1, 0), (2, 2, 0), (3, 0, 3), (4, 0, 0)]
    );
    assert!(state.history().is_dense());
}

#[test]
fn test_early_finish_and_new_game() {
    let mut state = MatchState::from_history(
        GameVariant::Singles,
        [EndRecord::new(1, 0, 2), EndRecord::new(2, 1, 0)],
    );
    assert!(state.apply(ScoreEvent::Finish));
    assert_eq!(state.mode(), Mode::GameOver);
    assert_eq!(state.winner(), Some(Side::Down));

    let fresh = state.transition(ScoreEvent::NewGame);
    assert_eq!(fresh, MatchState::new(GameVariant::Singles));
}

#[test]
fn test_snapshot_reflects_live_end() {
    let mut state = MatchState::from_history(GameVariant::Singles, [EndRecord::new(1, 2, 0)]);
    state.register_bowl(Side::Down);

    let snap = state.snapshot();
    assert_eq!(snap.mode, Mode::ScoringEnd);
    assert_eq!(snap.end_number, 2);
    assert_eq!(snap.in_progress_down, 1);
    assert_eq!(snap.bowls, 1);
    assert_eq!(snap.projected_total(Side::Down), 1);
    assert_eq!(snap.history, vec![EndRecord::new(1, 2, 0)]);
    assert_eq!(snap.winner, None);
}
