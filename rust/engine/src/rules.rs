use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::seat::{Seat, STARTING_STACK};

pub const SMALL_BLIND_AMOUNT: u32 = 10;
pub const BIG_BLIND_AMOUNT: u32 = 20;

/// Stakes applied when seats join and hands start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRules {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            starting_stack: STARTING_STACK,
            small_blind: SMALL_BLIND_AMOUNT,
            big_blind: BIG_BLIND_AMOUNT,
        }
    }
}

/// Checks a raise to the absolute total `target` for `seat`.
///
/// A legal target is above the bet to call, no more than the seat's all-in
/// total, and at least `to_call + min_raise`. The last bound is waived when
/// the target is exactly the seat's all-in total.
///
/// # Errors
///
/// - [`GameError::RaiseNotAboveCall`] - target does not exceed `to_call`
/// - [`GameError::RaiseAboveStack`] - target needs more chips than the seat has
/// - [`GameError::RaiseBelowMinimum`] - increment smaller than `min_raise`
///
/// # Examples
///
/// ```
/// use ledger_engine::errors::GameError;
/// use ledger_engine::rules::validate_raise;
/// use ledger_engine::seat::Seat;
///
/// let seat = Seat::new("p1", "Ann", 990, 0);
/// assert!(validate_raise(&seat, 20, 20, 40).is_ok());
/// assert_eq!(
///     validate_raise(&seat, 20, 20, 30),
///     Err(GameError::RaiseBelowMinimum { target: 30, minimum: 40 })
/// );
/// ```
pub fn validate_raise(
    seat: &Seat,
    to_call: u32,
    min_raise: u32,
    target: u32,
) -> Result<(), GameError> {
    if target <= to_call {
        return Err(GameError::RaiseNotAboveCall { target, to_call });
    }
    let maximum = seat.all_in_total();
    if target > maximum {
        return Err(GameError::RaiseAboveStack { target, maximum });
    }
    let minimum = to_call.saturating_add(min_raise);
    if target < minimum && target != maximum {
        return Err(GameError::RaiseBelowMinimum { target, minimum });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_house_stakes() {
        let rules = TableRules::default();
        assert_eq!(rules.starting_stack, 1_000);
        assert_eq!(rules.small_blind, 10);
        assert_eq!(rules.big_blind, 20);
    }

    #[test]
    fn short_all_in_raise_is_allowed() {
        let mut seat = Seat::new("p1", "Ann", 25, 0);
        seat.current_bet = 10;
        // to call 20, min raise 20 -> minimum 40, but 35 is everything
        assert!(validate_raise(&seat, 20, 20, 35).is_ok());
    }

    #[test]
    fn raise_must_clear_the_call() {
        let seat = Seat::new("p1", "Ann", 500, 0);
        assert_eq!(
            validate_raise(&seat, 20, 20, 20),
            Err(GameError::RaiseNotAboveCall {
                target: 20,
                to_call: 20
            })
        );
    }

    #[test]
    fn raise_cannot_exceed_stack() {
        let mut seat = Seat::new("p1", "Ann", 100, 0);
        seat.current_bet = 20;
        assert_eq!(
            validate_raise(&seat, 20, 20, 121),
            Err(GameError::RaiseAboveStack {
                target: 121,
                maximum: 120
            })
        );
    }
}
