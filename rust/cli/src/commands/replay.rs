//! Replay command handler.
//!
//! Folds a JSONL log of requests (one `{"type": ..., "payload": ...}` object
//! per line) through the engine, starting from an empty snapshot, and checks
//! the snapshot invariants after every step. The first unreadable line,
//! rejected request or violation stops the replay.

use crate::error::{BatchValidationError, CliError};
use crate::formatters::{format_phase, format_table};
use ledger_engine::invariants::check_invariants;
use ledger_engine::request::{reduce, Request};
use ledger_engine::rules::TableRules;
use ledger_engine::state::{GamePhase, GameState};
use std::fs;
use std::io::Write;

pub fn handle_replay_command(
    input: &str,
    rules: TableRules,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let content = fs::read_to_string(input)
        .map_err(|e| CliError::InvalidInput(format!("Failed to read {}: {}", input, e)))?;

    let mut state = GameState::initial(&rules);
    let mut chips = state.total_chips();
    let mut requests = 0usize;
    let mut hands = 0usize;

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let request: Request = serde_json::from_str(line).map_err(|e| {
            CliError::InvalidInput(format!("line {}: not a request: {}", line_no, e))
        })?;
        let name = request.name();
        // seats entering (or a whole snapshot arriving) legitimately change the total
        let resets_total = matches!(
            request,
            Request::CreateGame { .. } | Request::JoinGame { .. } | Request::SyncState(_)
        );
        let was_betting = state.game_phase == GamePhase::Betting;

        state = reduce(&rules, &state, request).map_err(|e| {
            CliError::InvalidInput(format!("line {}: {} rejected: {}", line_no, name, e))
        })?;
        requests += 1;
        if name == "START_HAND" && !was_betting && state.game_phase == GamePhase::Betting {
            hands += 1;
        }
        if resets_total {
            chips = state.total_chips();
        }
        check_invariants(&state, chips).map_err(|v| {
            CliError::Invariant(BatchValidationError {
                item_context: line_no,
                message: v.to_string(),
            })
        })?;
        tracing::debug!(line = line_no, request = name, "replayed");
    }

    writeln!(out, "Replayed {} requests", requests)?;
    writeln!(out, "Hands dealt: {}", hands)?;
    writeln!(out, "Phase: {}", format_phase(state.game_phase))?;
    writeln!(out, "Chips in play: {}", state.total_chips())?;
    if !state.seats.is_empty() {
        writeln!(out, "{}", format_table(&state))?;
    }
    Ok(())
}
