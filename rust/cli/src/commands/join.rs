use super::Ledger;
use crate::error::CliError;
use ledger_sync::Replica;
use std::io::Write;

const MAX_NAME_LEN: usize = 24;

pub fn handle_join_command(
    ledger: &Ledger,
    game: &str,
    name: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let name = validate_name(name)?;
    let replica = Replica::join(ledger.store.clone(), ledger.rules, game, name)?;
    let seat = replica
        .state()
        .seat_by_id(replica.player_id())
        .map_or(0, |s| s.seat_index);
    writeln!(out, "Joined game {} in seat {}", replica.game_id(), seat)?;
    writeln!(out, "Player ID: {}", replica.player_id())?;
    Ok(())
}

pub(crate) fn validate_name(raw: &str) -> Result<&str, CliError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CliError::InvalidInput("name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CliError::InvalidInput(format!(
            "name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name)
}
