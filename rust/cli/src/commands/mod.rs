//! Command handler modules.
//!
//! Each command lives in its own file and exposes
//! `handle_COMMAND_command(...) -> Result<(), CliError>`, writing to the
//! streams it is handed. Error reporting and exit codes stay in [`crate::run`].

pub mod act;
pub mod cfg;
pub mod create;
pub mod join;
pub mod replay;
pub mod show;
pub mod sim;
pub mod start;

pub use act::handle_act_command;
pub use cfg::handle_cfg_command;
pub use create::handle_create_command;
pub use join::handle_join_command;
pub use replay::handle_replay_command;
pub use show::handle_show_command;
pub use sim::handle_sim_command;
pub use start::handle_start_command;

use crate::config::Config;
use crate::error::CliError;
use ledger_engine::rules::TableRules;
use ledger_sync::dir_store::DirStore;
use std::sync::Arc;

/// The slot directory and table rules every game command works against.
pub struct Ledger {
    pub rules: TableRules,
    pub store: Arc<DirStore>,
}

impl Ledger {
    pub fn open(config: &Config) -> Result<Self, CliError> {
        let store = DirStore::open(&config.data_dir, config.conflict_policy)?;
        Ok(Self {
            rules: config.rules(),
            store: Arc::new(store),
        })
    }
}
