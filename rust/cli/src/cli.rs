use clap::{Parser, Subcommand};
use ledger_engine::betting::PlayerAction;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "poker-ledger",
    version,
    about = "Shared chip ledger for a table of poker players"
)]
pub struct LedgerCli {
    /// Directory holding the shared game slots
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a game and take its first seat
    Create {
        #[arg(long)]
        name: String,
    },
    /// Take a seat in an existing game
    Join {
        #[arg(long)]
        game: String,
        #[arg(long)]
        name: String,
    },
    /// Deal the next hand
    Start {
        #[arg(long)]
        game: String,
        #[arg(long)]
        player: String,
    },
    /// Fold, call or raise for the seat to act
    Act {
        #[arg(long)]
        game: String,
        #[arg(long)]
        player: String,
        #[command(subcommand)]
        action: ActionArg,
    },
    /// Print the table
    Show {
        #[arg(long)]
        game: String,
        /// Print the stored slot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fold a JSONL request log through the engine and check every snapshot
    Replay {
        #[arg(long)]
        input: String,
    },
    /// Play random legal actions and check every snapshot
    Sim {
        #[arg(long, default_value_t = 3)]
        seats: usize,
        #[arg(long, default_value_t = 10)]
        hands: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionArg {
    Fold,
    /// Match the bet to call (a check when nothing is owed)
    Call,
    Raise {
        /// Total bet to raise to, not the increment
        #[arg(long)]
        to: u32,
    },
}

impl From<ActionArg> for PlayerAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Fold => PlayerAction::Fold,
            ActionArg::Call => PlayerAction::Call,
            ActionArg::Raise { to } => PlayerAction::Raise(to),
        }
    }
}
