//! Action processor and betting round closer.

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::rules::validate_raise;
use crate::state::{GamePhase, GameState};
use crate::turn::{first_active_after, next_active, reaches};

/// Kind of a player action as it appears in a `PLAYER_ACTION` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Call,
    Raise,
}

/// A player action with its payload resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Give up the hand; no chips move
    Fold,
    /// Match the bet to call, or check when already matched
    Call,
    /// Raise to an absolute total bet (not a delta)
    Raise(u32),
}

impl PlayerAction {
    /// Builds an action from the request's `action`/`amount` pair.
    pub fn from_parts(kind: ActionKind, amount: Option<u32>) -> Result<Self, GameError> {
        match kind {
            ActionKind::Fold => Ok(PlayerAction::Fold),
            ActionKind::Call => Ok(PlayerAction::Call),
            ActionKind::Raise => amount
                .map(PlayerAction::Raise)
                .ok_or(GameError::MissingRaiseAmount),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Raise(_) => ActionKind::Raise,
        }
    }

    pub fn amount(&self) -> Option<u32> {
        match self {
            PlayerAction::Raise(target) => Some(*target),
            _ => None,
        }
    }
}

/// Applies `action` for the seat at `current_player_index`.
///
/// After the action, a hand with one contender left is paid out and ends.
/// Otherwise the turn moves to the next seat able to act, unless that walk
/// reaches the closing seat (the last raiser, or the big blind when nobody
/// has raised this round), in which case the round is closed with
/// [`close_betting_round`].
///
/// # Errors
///
/// - [`GameError::HandNotInProgress`] - phase is not `Betting`
/// - [`GameError::NoSeatToAct`] - no current seat, or it cannot act
/// - raise sizing errors from [`validate_raise`]
pub fn apply_action(state: &GameState, action: PlayerAction) -> Result<GameState, GameError> {
    if state.game_phase != GamePhase::Betting {
        return Err(GameError::HandNotInProgress);
    }
    let actor = state
        .current_player_index
        .filter(|&i| state.seats.get(i).is_some_and(|s| s.can_act()))
        .ok_or(GameError::NoSeatToAct)?;
    if let PlayerAction::Raise(target) = action {
        validate_raise(
            &state.seats[actor],
            state.current_bet_to_call,
            state.min_raise_amount,
            target,
        )?;
    }

    let mut next = state.clone();
    let to_call = next.current_bet_to_call;
    let seat = &mut next.seats[actor];
    let entry = match action {
        PlayerAction::Fold => {
            seat.is_folded = true;
            format!("{} folds.", seat.name)
        }
        PlayerAction::Call => {
            let paid = seat.commit(seat.owes(to_call));
            if paid == 0 {
                format!("{} checks.", seat.name)
            } else {
                format!("{} calls {paid}.", seat.name)
            }
        }
        PlayerAction::Raise(target) => {
            seat.commit(target - seat.current_bet);
            let entry = format!("{} raises to {target}.", seat.name);
            let increment = target - to_call;
            // a short all-in does not shrink the next legal raise
            if increment >= next.min_raise_amount {
                next.min_raise_amount = increment;
            }
            next.current_bet_to_call = target;
            next.last_raiser_index = Some(actor);
            entry
        }
    };
    next.log(entry);

    if next.active_count() <= 1 {
        return Ok(award_pot(next));
    }

    let closing_seat = next.last_raiser_index.or_else(|| next.big_blind_index());
    match next_active(&next.seats, actor) {
        None => Ok(close_betting_round(next)),
        Some(to) if closing_seat.is_some_and(|c| reaches(next.seats.len(), actor, to, c)) => {
            Ok(close_betting_round(next))
        }
        Some(to) => {
            next.current_player_index = Some(to);
            Ok(next)
        }
    }
}

/// Sweeps every current bet into the pot and restarts betting.
///
/// The next round opens with no bet to call, no raiser, and the first seat
/// after the dealer to act. The phase stays `Betting`.
pub fn close_betting_round(mut state: GameState) -> GameState {
    let swept = state.committed();
    state.pot += swept;
    for seat in &mut state.seats {
        seat.current_bet = 0;
    }
    state.current_bet_to_call = 0;
    state.last_raiser_index = None;
    state.current_player_index = state
        .dealer_index()
        .and_then(|d| first_active_after(&state.seats, d));
    state.log("Betting round ended. New round begins.");
    tracing::debug!(swept, pot = state.pot, "betting round closed");
    state
}

/// Pays the pot and every outstanding bet, folded seats' included, to the
/// sole remaining seat.
///
/// With no seat left in the hand, which only a hand-edited snapshot can
/// produce, the chips are cleared without a winner.
fn award_pot(mut state: GameState) -> GameState {
    let total = state.pot + state.committed();
    let entry = match state.seats.iter().position(|s| !s.is_folded) {
        Some(index) => {
            let winner = &mut state.seats[index];
            winner.stack += total;
            tracing::debug!(winner = %winner.id, total, "pot awarded");
            format!("{} wins the pot of {total}.", winner.name)
        }
        None => {
            tracing::warn!(total, "hand ended with every seat folded");
            format!("Hand ended with no winner. {total} chips cleared.")
        }
    };

    state.pot = 0;
    for seat in &mut state.seats {
        seat.current_bet = 0;
    }
    state.current_bet_to_call = 0;
    state.current_player_index = None;
    state.last_raiser_index = None;
    state.game_phase = GamePhase::EndOfHand;
    state.log(entry);
    state
}
