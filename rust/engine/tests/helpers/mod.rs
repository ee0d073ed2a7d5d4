#![allow(dead_code)]

use ledger_engine::betting::PlayerAction;
use ledger_engine::request::{create_game, join_game, reduce, Request};
use ledger_engine::rules::TableRules;
use ledger_engine::state::{GamePhase, GameState};

pub fn rules() -> TableRules {
    TableRules::default()
}

/// A waiting table with one seat per stack, named `P0`, `P1`, ... with ids `p0`, `p1`, ...
pub fn table(stacks: &[u32]) -> GameState {
    let rules = rules();
    let mut state = create_game(&rules, "TEST01", "P0", "p0");
    for i in 1..stacks.len() {
        state = join_game(&rules, &state, format!("P{i}"), format!("p{i}"));
    }
    for (seat, &stack) in state.seats.iter_mut().zip(stacks) {
        seat.stack = stack;
    }
    state
}

pub fn start(state: &GameState) -> GameState {
    reduce(&rules(), state, Request::StartHand).expect("hand starts")
}

pub fn act(state: &GameState, action: PlayerAction) -> GameState {
    reduce(&rules(), state, Request::player_action(action)).expect("action accepted")
}

/// Folds the seat to act until the hand ends.
pub fn fold_out(mut state: GameState) -> GameState {
    while state.game_phase == GamePhase::Betting {
        state = act(&state, PlayerAction::Fold);
    }
    state
}
