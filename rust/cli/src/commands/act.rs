use super::Ledger;
use crate::cli::ActionArg;
use crate::error::CliError;
use crate::formatters::format_table;
use ledger_sync::Replica;
use std::io::Write;

/// Submits one action for `player`, then prints what it caused.
pub fn handle_act_command(
    ledger: &Ledger,
    game: &str,
    player: &str,
    action: ActionArg,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut replica = Replica::attach(ledger.store.clone(), ledger.rules, game, player)?;
    let seen = replica.state().hand_history.len();
    let state = replica.act(action.into())?;
    for entry in &state.hand_history[seen..] {
        writeln!(out, "{}", entry)?;
    }
    writeln!(out, "{}", format_table(state))?;
    Ok(())
}
