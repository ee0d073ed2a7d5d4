mod helpers;

use helpers::{act, rules, start, table};
use ledger_engine::betting::PlayerAction;
use ledger_engine::errors::GameError;
use ledger_engine::request::{reduce, Request};
use ledger_engine::state::GamePhase;

#[test]
fn unraised_round_closes_when_action_reaches_big_blind() {
    let dealt = start(&table(&[1_000, 1_000, 1_000]));

    let after_dealer = act(&dealt, PlayerAction::Call);
    assert_eq!(after_dealer.current_player_index, Some(1));
    assert_eq!(after_dealer.seats[0].current_bet, 20);

    let closed = act(&after_dealer, PlayerAction::Call);
    assert_eq!(closed.game_phase, GamePhase::Betting);
    assert_eq!(closed.pot, 60);
    assert!(closed.seats.iter().all(|s| s.current_bet == 0));
    assert_eq!(closed.current_bet_to_call, 0);
    assert_eq!(closed.last_raiser_index, None);
    // first seat after the dealer opens the new round
    assert_eq!(closed.current_player_index, Some(1));
    assert_eq!(
        closed.hand_history.last().map(String::as_str),
        Some("Betting round ended. New round begins.")
    );
}

#[test]
fn raised_round_closes_when_action_returns_to_raiser() {
    let dealt = start(&table(&[1_000, 1_000, 1_000]));

    let raised = act(&dealt, PlayerAction::Raise(60));
    assert_eq!(raised.current_bet_to_call, 60);
    assert_eq!(raised.min_raise_amount, 40);
    assert_eq!(raised.last_raiser_index, Some(0));

    let small_called = act(&raised, PlayerAction::Call);
    assert_eq!(small_called.seats[1].current_bet, 60);
    // the big blind is no longer the closing seat
    assert_eq!(small_called.current_player_index, Some(2));

    let closed = act(&small_called, PlayerAction::Call);
    assert_eq!(closed.pot, 180);
    assert_eq!(closed.current_player_index, Some(1));
}

#[test]
fn fresh_round_closes_when_check_reaches_big_blind() {
    let dealt = start(&table(&[1_000, 1_000, 1_000]));
    let round_two = act(&act(&dealt, PlayerAction::Call), PlayerAction::Call);
    assert_eq!(round_two.last_raiser_index, None);

    // with no raiser the big blind (seat 2) is the closing seat again
    let checked = act(&round_two, PlayerAction::Call);
    let tail: Vec<&str> = checked
        .hand_history
        .iter()
        .rev()
        .take(2)
        .map(String::as_str)
        .collect();
    assert_eq!(tail, ["Betting round ended. New round begins.", "P1 checks."]);
    assert_eq!(checked.pot, 60);
    assert_eq!(checked.current_player_index, Some(1));
}

#[test]
fn all_in_raiser_still_closes_the_round() {
    let dealt = start(&table(&[100, 1_000, 1_000]));

    let shoved = act(&dealt, PlayerAction::Raise(100));
    assert!(shoved.seats[0].is_all_in);
    let called = act(&shoved, PlayerAction::Call);
    assert_eq!(called.current_player_index, Some(2));

    // seat 0 can no longer act, so the walk from 2 steps over it to 1
    let closed = act(&called, PlayerAction::Call);
    assert_eq!(closed.pot, 300);
    assert_eq!(closed.current_player_index, Some(1));
    assert_eq!(closed.total_chips(), 2_100);
}

#[test]
fn heads_up_small_blind_call_closes_the_round() {
    let dealt = start(&table(&[1_000, 1_000]));
    assert_eq!(dealt.current_player_index, Some(1));

    let closed = act(&dealt, PlayerAction::Call);
    assert_eq!(closed.pot, 40);
    assert_eq!(closed.current_player_index, Some(1));
}

#[test]
fn heads_up_shove_and_call_stalls_until_next_hand() {
    let dealt = start(&table(&[1_000, 1_000]));
    let shoved = act(&dealt, PlayerAction::Raise(1_000));
    let called = act(&shoved, PlayerAction::Call);

    assert_eq!(called.game_phase, GamePhase::Betting);
    assert_eq!(called.current_player_index, None);
    assert_eq!(called.pot, 2_000);
    assert!(called.betting_is_stalled());
    assert!(called.can_start_hand());
    assert_eq!(
        reduce(&rules(), &called, Request::player_action(PlayerAction::Call)),
        Err(GameError::NoSeatToAct)
    );

    let next = start(&called);
    assert!(next
        .hand_history
        .iter()
        .any(|e| e == "Betting cannot continue. 2000 chips returned to their owners."));
    assert_eq!(next.game_phase, GamePhase::Betting);
    assert_eq!(next.dealer_index(), Some(1));
    // seat 1 deals and posts the big blind; seat 0 posts the small blind
    assert_eq!(next.seats[0].stack, 990);
    assert_eq!(next.seats[1].stack, 980);
    assert_eq!(next.pot, 0);
    assert_eq!(next.current_player_index, Some(0));
    assert_eq!(next.total_chips(), 2_000);
}

#[test]
fn lone_seat_facing_all_ins_can_restart_the_hand() {
    let dealt = start(&table(&[1_000, 1_000, 100]));
    let folded = act(&dealt, PlayerAction::Fold);
    let first_round = act(&folded, PlayerAction::Call);
    assert_eq!(first_round.pot, 40);

    let raised = act(&first_round, PlayerAction::Raise(40));
    let shoved = act(&raised, PlayerAction::Raise(80));
    assert!(shoved.seats[2].is_all_in);
    // seat 1 still owes 40, so betting is live
    assert!(!shoved.betting_is_stalled());

    let closed = act(&shoved, PlayerAction::Call);
    assert_eq!(closed.pot, 200);
    assert_eq!(closed.current_player_index, Some(1));
    assert!(closed.betting_is_stalled());

    let next = start(&closed);
    assert_eq!(next.game_phase, GamePhase::Betting);
    assert_eq!(next.dealer_index(), Some(1));
    assert_eq!(next.seats[1].stack, 1_000);
    assert_eq!(next.seats[2].stack, 90);
    assert_eq!(next.seats[0].stack, 980);
    assert_eq!(next.total_chips(), 2_100);
}
