//! # Poker Ledger CLI
//!
//! Command-line front end for the shared chip ledger. Games live as JSON
//! slots under a data directory, so several terminals (or machines sharing a
//! directory) can sit at the same table.
//!
//! The entry point is [`run`], which parses arguments and dispatches to one
//! of the command handlers.
//!
//! ```no_run
//! use std::io;
//! let args = ["poker-ledger", "create", "--name", "Ann"];
//! let code = ledger_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `create`: Create a game and take its first seat
//! - `join`: Take a seat in an existing game
//! - `start`: Deal the next hand
//! - `act`: Fold, call or raise for the seat to act
//! - `show`: Print the table or the stored JSON slot
//! - `replay`: Check a JSONL request log
//! - `sim`: Play seeded random hands and check every snapshot
//! - `cfg`: Display configuration settings and their sources

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod ui;

use cli::{Commands, LedgerCli};
use commands::{
    handle_act_command, handle_cfg_command, handle_create_command, handle_join_command,
    handle_replay_command, handle_show_command, handle_sim_command, handle_start_command, Ledger,
};

pub use commands::sim::{simulate, SimReport};
pub use error::{BatchValidationError, CliError};

/// Parses `args` and runs the selected command.
///
/// Normal output goes to `out`, warnings and errors to `err`.
///
/// # Returns
///
/// Exit code: [`exit_code::SUCCESS`] or [`exit_code::ERROR`]
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &[
        "create", "join", "start", "act", "show", "replay", "sim", "cfg",
    ];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match LedgerCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                return match write!(out, "{}", e) {
                    Ok(()) => exit_code::SUCCESS,
                    Err(_) => exit_code::ERROR,
                };
            }
            let _ = writeln!(err, "{}", e);
            let _ = writeln!(err, "Usage: poker-ledger <command> [options]\n");
            let _ = writeln!(err, "Commands:");
            for c in COMMANDS {
                let _ = writeln!(err, "  {}", c);
            }
            let _ = writeln!(err, "\nFor full help, run: poker-ledger --help");
            return exit_code::ERROR;
        }
    };

    match dispatch(cli, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn dispatch(cli: LedgerCli, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()
        .map_err(|e| CliError::Config(e.to_string()))?
        .with_data_dir(cli.data_dir);
    let config = &resolved.config;

    match cli.cmd {
        Commands::Cfg => handle_cfg_command(&resolved, out),
        Commands::Replay { input } => handle_replay_command(&input, config.rules(), out),
        Commands::Sim { seats, hands, seed } => {
            handle_sim_command(config.rules(), seats, hands, seed, out, err)
        }
        Commands::Create { name } => handle_create_command(&Ledger::open(config)?, &name, out),
        Commands::Join { game, name } => {
            handle_join_command(&Ledger::open(config)?, &game, &name, out)
        }
        Commands::Start { game, player } => {
            handle_start_command(&Ledger::open(config)?, &game, &player, out, err)
        }
        Commands::Act {
            game,
            player,
            action,
        } => handle_act_command(&Ledger::open(config)?, &game, &player, action, out),
        Commands::Show { game, json } => {
            handle_show_command(&Ledger::open(config)?, &game, json, out)
        }
    }
}
