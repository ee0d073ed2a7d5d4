use serde::{Deserialize, Serialize};

use crate::rules::TableRules;
use crate::seat::Seat;

/// Phase of the hand lifecycle.
///
/// `Waiting → Betting → EndOfHand → Betting → …`. `Showdown` is part of the
/// published snapshot format but no transition enters it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Waiting,
    Betting,
    Showdown,
    EndOfHand,
}

/// The full game snapshot shared between every session of one game.
///
/// Snapshots are never edited in place by the transition functions: each
/// transition reads one snapshot and returns a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub game_id: Option<String>,
    /// Seats in turn order; traversal wraps around.
    #[serde(rename = "players")]
    pub seats: Vec<Seat>,
    /// Chips swept from completed betting rounds
    pub pot: u32,
    /// Seat to act, if any
    pub current_player_index: Option<usize>,
    /// Seat whose return to action closes the round; `None` means the big blind
    pub last_raiser_index: Option<usize>,
    /// Highest `current_bet` this round
    pub current_bet_to_call: u32,
    pub game_phase: GamePhase,
    /// Append-only, human-readable event log
    pub hand_history: Vec<String>,
    /// Smallest legal raise increment
    pub min_raise_amount: u32,
}

impl GameState {
    /// An empty table with no game id and no seats.
    pub fn initial(rules: &TableRules) -> Self {
        Self {
            game_id: None,
            seats: Vec::new(),
            pot: 0,
            current_player_index: None,
            last_raiser_index: None,
            current_bet_to_call: 0,
            game_phase: GamePhase::Waiting,
            hand_history: Vec::new(),
            min_raise_amount: rules.big_blind,
        }
    }

    /// `Σstack + ΣcurrentBet + pot`; constant between seat joins.
    pub fn total_chips(&self) -> u64 {
        let seated: u64 = self
            .seats
            .iter()
            .map(|s| u64::from(s.stack) + u64::from(s.current_bet))
            .sum();
        seated + u64::from(self.pot)
    }

    /// Chips committed this street and not yet in the pot.
    pub fn committed(&self) -> u32 {
        self.seats.iter().map(|s| s.current_bet).sum()
    }

    pub fn dealer_index(&self) -> Option<usize> {
        self.seats.iter().position(|s| s.is_dealer)
    }

    pub fn big_blind_index(&self) -> Option<usize> {
        self.seats.iter().position(|s| s.is_big_blind)
    }

    pub fn seat_by_id(&self, player_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == player_id)
    }

    pub fn current_seat(&self) -> Option<&Seat> {
        self.current_player_index.and_then(|i| self.seats.get(i))
    }

    /// Number of seats still contesting the hand.
    pub fn active_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_folded).count()
    }

    /// Whether betting can no longer decide the hand.
    ///
    /// True during `Betting` when no seat can act, or when a single seat can
    /// act and owes nothing: every other contender is all-in, so nobody can
    /// fold to end the hand.
    pub fn betting_is_stalled(&self) -> bool {
        if self.game_phase != GamePhase::Betting {
            return false;
        }
        let mut actors = self.seats.iter().filter(|s| s.can_act());
        match (actors.next(), actors.next()) {
            (None, _) => true,
            (Some(seat), None) => seat.owes(self.current_bet_to_call) == 0,
            _ => false,
        }
    }

    /// Whether `START_HAND` would deal a hand: no live betting, and two or
    /// more seats with chips once a stalled hand's bets are returned.
    pub fn can_start_hand(&self) -> bool {
        let returning = self.betting_is_stalled();
        if self.game_phase == GamePhase::Betting && !returning {
            return false;
        }
        self.seats
            .iter()
            .filter(|s| s.stack > 0 || (returning && s.hand_contribution > 0))
            .count()
            >= 2
    }

    pub(crate) fn log(&mut self, entry: impl Into<String>) {
        self.hand_history.push(entry.into());
    }
}
