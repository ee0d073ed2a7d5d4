//! Executable snapshot invariants.
//!
//! Replays, simulations and tests run [`check_invariants`] after every
//! transition.

use thiserror::Error;

use crate::state::{GamePhase, GameState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("chip total changed from {expected} to {actual}")]
    ChipsNotConserved { expected: u64, actual: u64 },
    #[error("seat {seat} records seat index {recorded}")]
    SeatIndexMismatch { seat: usize, recorded: usize },
    #[error("seat {seat} has bet {bet}, above the bet to call of {to_call}")]
    BetAboveCall { seat: usize, bet: u32, to_call: u32 },
    #[error("expected exactly one dealer, found {found}")]
    DealerCount { found: usize },
    #[error("seat {seat} is to act but is folded, all-in or missing")]
    IneligibleActor { seat: usize },
    #[error("no seat is to act although seat {seat} can")]
    MissingActor { seat: usize },
}

/// Checks `state` against the snapshot invariants.
///
/// `expected_total` is the chip total recorded when the last seat joined.
pub fn check_invariants(state: &GameState, expected_total: u64) -> Result<(), InvariantViolation> {
    let actual = state.total_chips();
    if actual != expected_total {
        return Err(InvariantViolation::ChipsNotConserved {
            expected: expected_total,
            actual,
        });
    }

    for (i, seat) in state.seats.iter().enumerate() {
        if seat.seat_index != i {
            return Err(InvariantViolation::SeatIndexMismatch {
                seat: i,
                recorded: seat.seat_index,
            });
        }
        if seat.can_act() && seat.current_bet > state.current_bet_to_call {
            return Err(InvariantViolation::BetAboveCall {
                seat: i,
                bet: seat.current_bet,
                to_call: state.current_bet_to_call,
            });
        }
    }

    if state.game_phase != GamePhase::Waiting {
        let found = state.seats.iter().filter(|s| s.is_dealer).count();
        if found != 1 {
            return Err(InvariantViolation::DealerCount { found });
        }
    }

    if state.game_phase == GamePhase::Betting {
        match state.current_player_index {
            Some(i) if !state.seats.get(i).is_some_and(|s| s.can_act()) => {
                return Err(InvariantViolation::IneligibleActor { seat: i });
            }
            None => {
                if let Some(seat) = state.seats.iter().position(|s| s.can_act()) {
                    return Err(InvariantViolation::MissingActor { seat });
                }
            }
            _ => {}
        }
    }
    Ok(())
}
