//! Simulation command handler.
//!
//! Seats `K` players and plays random legal actions with a seeded
//! ChaCha20 RNG, checking the snapshot invariants after every step. The same
//! seed always plays the same hands.
//!
//! Hands never reach a showdown: once betting stalls behind all-in seats the
//! next `START_HAND` returns every bet and the hand counts as abandoned.

use crate::error::{BatchValidationError, CliError};
use crate::ui;
use ledger_engine::betting::PlayerAction;
use ledger_engine::invariants::check_invariants;
use ledger_engine::request::{create_game, join_game, reduce, Request};
use ledger_engine::rules::TableRules;
use ledger_engine::state::{GamePhase, GameState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::io::Write;

pub const MAX_SEATS: usize = 10;
const MAX_ACTIONS_PER_HAND: usize = 500;
const SIM_GAME_ID: &str = "SIM000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimReport {
    pub seed: u64,
    /// Hands dealt, abandoned ones included
    pub hands_played: u32,
    /// Hands whose bets were returned because betting stalled
    pub abandoned_hands: u32,
    pub final_state: GameState,
}

pub fn handle_sim_command(
    rules: TableRules,
    seats: usize,
    hands: u32,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if !(2..=MAX_SEATS).contains(&seats) {
        return Err(CliError::InvalidInput(format!(
            "seats must be between 2 and {}",
            MAX_SEATS
        )));
    }
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let seed = seed.unwrap_or_else(rand::random);
    let report = simulate(rules, seats, hands, seed)?;

    if report.hands_played < hands {
        ui::display_warning(
            err,
            &format!("Stopped after {} of {} hands.", report.hands_played, hands),
        )?;
    }

    writeln!(out, "Seed: {}", report.seed)?;
    writeln!(out, "Hands played: {}", report.hands_played)?;
    writeln!(out, "Hands abandoned: {}", report.abandoned_hands)?;
    writeln!(out, "Chips in play: {}", report.final_state.total_chips())?;
    for seat in &report.final_state.seats {
        writeln!(out, "{}: {}", seat.name, seat.stack)?;
    }
    Ok(())
}

/// Plays up to `hands` hands and returns where the table ended up.
pub fn simulate(
    rules: TableRules,
    seats: usize,
    hands: u32,
    seed: u64,
) -> Result<SimReport, CliError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut state = create_game(&rules, SIM_GAME_ID, "Seat 1", "seat_1");
    for i in 2..=seats {
        state = join_game(&rules, &state, format!("Seat {}", i), format!("seat_{}", i));
    }
    let chips = state.total_chips();
    let mut step = 0usize;
    let mut hands_played = 0;
    let mut abandoned_hands = 0;

    'hands: for _ in 0..hands {
        if !state.can_start_hand() {
            break;
        }
        state = advance(&rules, &state, Request::StartHand, chips, &mut step)?;
        hands_played += 1;
        let mut actions = 0;
        while state.game_phase == GamePhase::Betting {
            if state.betting_is_stalled() {
                abandoned_hands += 1;
                break;
            }
            if actions == MAX_ACTIONS_PER_HAND {
                tracing::warn!(seed, hand = hands_played, "hand did not finish, stopping");
                break 'hands;
            }
            let action = choose_action(&mut rng, &state);
            let request = Request::player_action(action);
            state = advance(&rules, &state, request, chips, &mut step)?;
            actions += 1;
        }
    }

    tracing::info!(
        seed,
        hands_played,
        abandoned_hands,
        steps = step,
        "simulation finished"
    );
    Ok(SimReport {
        seed,
        hands_played,
        abandoned_hands,
        final_state: state,
    })
}

fn advance(
    rules: &TableRules,
    state: &GameState,
    request: Request,
    chips: u64,
    step: &mut usize,
) -> Result<GameState, CliError> {
    *step += 1;
    let name = request.name();
    let next = reduce(rules, state, request).map_err(|e| {
        CliError::Invariant(BatchValidationError {
            item_context: *step,
            message: format!("legal {} was rejected: {}", name, e),
        })
    })?;
    check_invariants(&next, chips).map_err(|v| {
        CliError::Invariant(BatchValidationError {
            item_context: *step,
            message: v.to_string(),
        })
    })?;
    Ok(next)
}

/// A random action that the rules accept for the seat to act.
///
/// Folding is only chosen when there is something to call, and raises are
/// sized between the minimum legal target and a few big blinds above it,
/// capped at the seat's all-in total.
fn choose_action<R: Rng + ?Sized>(rng: &mut R, state: &GameState) -> PlayerAction {
    let Some(seat) = state.current_seat() else {
        return PlayerAction::Call;
    };
    let to_call = state.current_bet_to_call;
    let max = seat.all_in_total();
    let min = (to_call + state.min_raise_amount).min(max);

    match rng.random_range(0..10u8) {
        0 | 1 if seat.owes(to_call) > 0 => PlayerAction::Fold,
        8 | 9 if max > to_call => {
            let spread = state.min_raise_amount.saturating_mul(3);
            let top = min.saturating_add(spread).min(max);
            PlayerAction::Raise(rng.random_range(min..=top))
        }
        _ => PlayerAction::Call,
    }
}
