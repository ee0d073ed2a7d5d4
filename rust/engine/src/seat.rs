use serde::{Deserialize, Serialize};

/// Default starting stack for a newly seated player, in chips.
pub const STARTING_STACK: u32 = 1_000;

/// A participant slot at the table.
///
/// The seat's position in [`crate::state::GameState::seats`] is its turn
/// order; `seat_index` records that position and never changes once the seat
/// has been appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    /// Stable player identity (survives reconnects)
    pub id: String,
    /// Display name used in the hand history
    pub name: String,
    /// Chips not committed this street
    pub stack: u32,
    /// Chips committed this street, not yet swept into the pot
    pub current_bet: u32,
    /// Chips committed over the whole hand, blinds included
    #[serde(default)]
    pub hand_contribution: u32,
    pub is_folded: bool,
    pub is_all_in: bool,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
    pub seat_index: usize,
}

impl Seat {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        stack: u32,
        seat_index: usize,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stack,
            current_bet: 0,
            hand_contribution: 0,
            is_folded: false,
            is_all_in: false,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
            seat_index,
        }
    }

    /// Whether the turn may land on this seat.
    pub fn can_act(&self) -> bool {
        !self.is_folded && !self.is_all_in
    }

    /// Chips this seat still needs to put in to match `to_call`.
    pub fn owes(&self, to_call: u32) -> u32 {
        to_call.saturating_sub(self.current_bet)
    }

    /// The largest total bet this seat can make this street.
    pub fn all_in_total(&self) -> u32 {
        self.stack + self.current_bet
    }

    /// Moves up to `amount` chips from the stack into the current bet.
    ///
    /// Returns the chips actually moved. A seat left with an empty stack is
    /// marked all-in.
    pub fn commit(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.stack);
        self.stack -= moved;
        self.current_bet += moved;
        self.hand_contribution += moved;
        if self.stack == 0 {
            self.is_all_in = true;
        }
        moved
    }

    /// Clears every per-hand flag. Seats without chips are dealt out.
    pub(crate) fn reset_for_hand(&mut self) {
        self.current_bet = 0;
        self.hand_contribution = 0;
        self.is_folded = self.stack == 0;
        self.is_all_in = false;
        self.is_dealer = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
    }
}
