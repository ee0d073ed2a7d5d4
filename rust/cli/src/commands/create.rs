use super::Ledger;
use crate::error::CliError;
use ledger_sync::Replica;
use std::io::Write;

/// Creates a game under a fresh id and seats `name` in it.
pub fn handle_create_command(
    ledger: &Ledger,
    name: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let name = super::join::validate_name(name)?;
    let replica = Replica::create(ledger.store.clone(), ledger.rules, name)?;
    writeln!(out, "Game ID: {}", replica.game_id())?;
    writeln!(out, "Player ID: {}", replica.player_id())?;
    Ok(())
}
