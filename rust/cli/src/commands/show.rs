use super::Ledger;
use crate::error::CliError;
use crate::formatters::{format_table, recent_history};
use ledger_sync::ids::normalize_game_id;
use ledger_sync::{SnapshotStore, SyncError};
use std::io::Write;

const HISTORY_LINES: usize = 10;

pub fn handle_show_command(
    ledger: &Ledger,
    game: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let game_id = normalize_game_id(game);
    let published = ledger
        .store
        .load(&game_id)?
        .ok_or(SyncError::GameNotFound(game_id))?;

    if json {
        let text = serde_json::to_string_pretty(&published).map_err(std::io::Error::other)?;
        writeln!(out, "{}", text)?;
        return Ok(());
    }

    writeln!(out, "{}", format_table(&published.state))?;
    writeln!(out, "(version {})", published.version)?;
    writeln!(out)?;
    for entry in recent_history(&published.state, HISTORY_LINES) {
        writeln!(out, "  {}", entry)?;
    }
    Ok(())
}
