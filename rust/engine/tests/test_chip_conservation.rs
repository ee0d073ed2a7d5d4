mod helpers;

use helpers::{fold_out, rules, start, table};
use ledger_engine::betting::ActionKind;
use ledger_engine::invariants::check_invariants;
use ledger_engine::request::{reduce, Request};
use ledger_engine::state::{GamePhase, GameState};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Fold,
    Call,
    /// Raise sized as a fraction (in percent) between the minimum legal
    /// target and the actor's all-in total
    Raise(u8),
    /// A raise target that may well be illegal
    WildRaise(u32),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => Just(Step::Fold),
        5 => Just(Step::Call),
        3 => (0u8..=100).prop_map(Step::Raise),
        1 => (0u32..3_000).prop_map(Step::WildRaise),
    ]
}

fn to_request(state: &GameState, step: &Step) -> Request {
    let raise_to = |target: u32| Request::PlayerAction {
        action: ActionKind::Raise,
        amount: Some(target),
    };
    match step {
        Step::Fold => Request::PlayerAction {
            action: ActionKind::Fold,
            amount: None,
        },
        Step::Call => Request::PlayerAction {
            action: ActionKind::Call,
            amount: None,
        },
        Step::Raise(pct) => {
            let Some(seat) = state.current_seat() else {
                return raise_to(0);
            };
            let max = seat.all_in_total();
            let min = (state.current_bet_to_call + state.min_raise_amount).min(max);
            raise_to(min + (max - min) * u32::from(*pct) / 100)
        }
        Step::WildRaise(target) => raise_to(*target),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn random_play_conserves_chips_and_invariants(
        stacks in prop::collection::vec(1u32..2_000, 2..=6),
        steps in prop::collection::vec(step_strategy(), 1..120),
    ) {
        let rules = rules();
        let mut state = table(&stacks);
        let total = state.total_chips();

        for step in &steps {
            let request = if state.game_phase == GamePhase::Betting && !state.betting_is_stalled() {
                to_request(&state, step)
            } else {
                Request::StartHand
            };
            match reduce(&rules, &state, request) {
                Ok(next) => state = next,
                // rejected requests leave the snapshot alone; nothing to check
                Err(_) => continue,
            }
            prop_assert_eq!(check_invariants(&state, total), Ok(()));
            if state.game_phase == GamePhase::Betting {
                for seat in state.seats.iter().filter(|s| s.can_act()) {
                    prop_assert!(seat.current_bet <= state.current_bet_to_call);
                }
                let contributed: u32 = state.seats.iter().map(|s| s.hand_contribution).sum();
                prop_assert_eq!(contributed, state.pot + state.committed());
            }
        }
    }

    #[test]
    fn dealer_advances_one_seat_per_hand(seat_count in 2usize..=8, hands in 1usize..=12) {
        let mut state = table(&vec![1_000; seat_count]);
        let mut previous: Option<usize> = None;

        for _ in 0..hands {
            state = start(&state);
            let dealer = state.dealer_index();
            prop_assert!(dealer.is_some());
            if let (Some(prev), Some(now)) = (previous, dealer) {
                prop_assert_eq!(now, (prev + 1) % seat_count);
            } else {
                prop_assert_eq!(dealer, Some(0));
            }
            previous = dealer;
            state = fold_out(state);
        }
    }
}
