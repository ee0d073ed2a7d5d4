use super::Ledger;
use crate::error::CliError;
use crate::formatters::format_table;
use crate::ui;
use ledger_engine::state::GamePhase;
use ledger_sync::Replica;
use std::io::Write;

pub fn handle_start_command(
    ledger: &Ledger,
    game: &str,
    player: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut replica = Replica::attach(ledger.store.clone(), ledger.rules, game, player)?;
    let state = replica.start_hand()?;
    if state.game_phase != GamePhase::Betting {
        ui::display_warning(err, "A hand needs at least two seats with chips.")?;
        return Ok(());
    }
    if let Some(entry) = state.hand_history.iter().rev().find(|e| e.starts_with("Hand started.")) {
        writeln!(out, "{}", entry)?;
    }
    writeln!(out, "{}", format_table(state))?;
    Ok(())
}
