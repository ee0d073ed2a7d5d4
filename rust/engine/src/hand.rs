//! Hand starter: dealer rotation, blind posting and the first turn.

use crate::errors::GameError;
use crate::rules::TableRules;
use crate::state::{GamePhase, GameState};
use crate::turn::first_active_after;

/// Deals a fresh hand from `state`.
///
/// The dealer button moves one seat to the left of the previous dealer (seat
/// 0 on the first hand), the next two seats post the blinds, and the seat
/// after the big blind acts first. Blind contributions stay in `current_bet`
/// until the round closes, so the pot starts at zero.
///
/// A hand whose betting has stalled (see [`GameState::betting_is_stalled`])
/// is abandoned first: every seat gets back what it put into the hand.
///
/// Fewer than two seats with chips is a no-op returning the snapshot
/// unchanged, apart from any returned bets.
///
/// # Errors
///
/// [`GameError::HandInProgress`] while betting is still live: dealing again
/// would drop the chips already committed this hand.
pub fn start_hand(rules: &TableRules, state: &GameState) -> Result<GameState, GameError> {
    if state.game_phase == GamePhase::Betting && !state.betting_is_stalled() {
        return Err(GameError::HandInProgress);
    }
    let mut next = state.clone();
    if next.game_phase == GamePhase::Betting {
        return_hand_bets(&mut next);
    }
    if !next.can_start_hand() {
        tracing::debug!(
            seats = next.seats.len(),
            "not enough funded seats to start a hand"
        );
        return Ok(next);
    }

    let n = next.seats.len();
    let dealer = next.dealer_index().map_or(0, |d| (d + 1) % n);
    let small_blind = (dealer + 1) % n;
    let big_blind = (small_blind + 1) % n;

    for seat in &mut next.seats {
        seat.reset_for_hand();
    }
    next.seats[dealer].is_dealer = true;
    let dealer_name = next.seats[dealer].name.clone();
    next.log(format!("Hand started. {dealer_name} is the dealer."));

    post_blind(&mut next, small_blind, rules.small_blind, BlindKind::Small);
    post_blind(&mut next, big_blind, rules.big_blind, BlindKind::Big);

    next.pot = 0;
    next.game_phase = GamePhase::Betting;
    next.current_bet_to_call = rules.big_blind;
    next.min_raise_amount = rules.big_blind;
    next.last_raiser_index = Some(big_blind);
    next.current_player_index = first_active_after(&next.seats, big_blind);

    tracing::debug!(
        dealer,
        small_blind,
        big_blind,
        first_to_act = ?next.current_player_index,
        "hand started"
    );
    Ok(next)
}

/// Gives every seat back the chips it committed to the current hand and ends
/// the hand.
///
/// Chips in the pot that no seat is recorded as contributing, as in a
/// snapshot from a peer that does not track contributions, go to the first
/// seat still in the hand.
fn return_hand_bets(state: &mut GameState) {
    let outstanding = state.pot + state.committed();
    let mut returned = 0;
    for seat in &mut state.seats {
        let back = seat.hand_contribution.min(outstanding - returned);
        seat.stack += back;
        returned += back;
        seat.current_bet = 0;
        seat.hand_contribution = 0;
    }
    let unclaimed = outstanding - returned;
    let recipient = state
        .seats
        .iter()
        .position(|s| !s.is_folded)
        .or_else(|| (!state.seats.is_empty()).then_some(0));
    match recipient {
        Some(index) => {
            state.seats[index].stack += unclaimed;
            state.pot = 0;
        }
        None => state.pot = unclaimed,
    }
    state.current_bet_to_call = 0;
    state.current_player_index = None;
    state.last_raiser_index = None;
    state.game_phase = GamePhase::EndOfHand;
    state.log(format!(
        "Betting cannot continue. {returned} chips returned to their owners."
    ));
    tracing::debug!(returned, unclaimed, "stalled hand abandoned");
}

#[derive(Clone, Copy)]
enum BlindKind {
    Small,
    Big,
}

fn post_blind(state: &mut GameState, index: usize, amount: u32, kind: BlindKind) {
    let seat = &mut state.seats[index];
    match kind {
        BlindKind::Small => seat.is_small_blind = true,
        BlindKind::Big => seat.is_big_blind = true,
    }
    // dealt-out seats hold the position but post nothing
    if seat.is_folded {
        return;
    }
    let posted = seat.commit(amount);
    let entry = match kind {
        BlindKind::Small => format!("{} posts small blind {posted}.", seat.name),
        BlindKind::Big => format!("{} posts big blind {posted}.", seat.name),
    };
    state.log(entry);
}
