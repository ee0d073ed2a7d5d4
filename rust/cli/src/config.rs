//! Layered configuration: defaults, then a TOML file named by
//! `POKER_LEDGER_CONFIG`, then individual `POKER_LEDGER_*` variables.

use ledger_engine::rules::TableRules;
use ledger_sync::ConflictPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const CONFIG_ENV: &str = "POKER_LEDGER_CONFIG";
pub const STARTING_STACK_ENV: &str = "POKER_LEDGER_STARTING_STACK";
pub const SMALL_BLIND_ENV: &str = "POKER_LEDGER_SMALL_BLIND";
pub const BIG_BLIND_ENV: &str = "POKER_LEDGER_BIG_BLIND";
pub const DATA_DIR_ENV: &str = "POKER_LEDGER_DATA_DIR";
pub const CONFLICT_POLICY_ENV: &str = "POKER_LEDGER_CONFLICT_POLICY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub data_dir: PathBuf,
    pub conflict_policy: ConflictPolicy,
}

impl Default for Config {
    fn default() -> Self {
        let rules = TableRules::default();
        Self {
            starting_stack: rules.starting_stack,
            small_blind: rules.small_blind,
            big_blind: rules.big_blind,
            data_dir: PathBuf::from(".poker-ledger"),
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

impl Config {
    pub fn rules(&self) -> TableRules {
        TableRules {
            starting_stack: self.starting_stack,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub data_dir: ValueSource,
    pub conflict_policy: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            data_dir: ValueSource::Default,
            conflict_policy: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl ConfigResolved {
    /// Applies the global `--data-dir` flag over every other layer.
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.config.data_dir = dir;
            self.sources.data_dir = ValueSource::Cli;
        }
        self
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

/// Resolves the configuration from the process environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Resolves the configuration, reading variables through `var`.
pub fn load_from<F>(lookup: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.data_dir {
            cfg.data_dir = v;
            sources.data_dir = ValueSource::File;
        }
        if let Some(v) = f.conflict_policy {
            cfg.conflict_policy = v;
            sources.conflict_policy = ValueSource::File;
        }
    }

    if let Some(v) = var(STARTING_STACK_ENV) {
        cfg.starting_stack = parse_chips(&v, "starting stack")?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(v) = var(SMALL_BLIND_ENV) {
        cfg.small_blind = parse_chips(&v, "small blind")?;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = var(BIG_BLIND_ENV) {
        cfg.big_blind = parse_chips(&v, "big blind")?;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(v) = var(DATA_DIR_ENV) {
        cfg.data_dir = PathBuf::from(v);
        sources.data_dir = ValueSource::Env;
    }
    if let Some(v) = var(CONFLICT_POLICY_ENV) {
        cfg.conflict_policy = v.parse().map_err(ConfigError::Invalid)?;
        sources.conflict_policy = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    data_dir: Option<PathBuf>,
    #[serde(default)]
    conflict_policy: Option<ConflictPolicy>,
}

fn parse_chips(raw: &str, what: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", what, raw)))
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if cfg.small_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: small_blind must be >0".into(),
        ));
    }
    if cfg.big_blind < cfg.small_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: big_blind must be >= small_blind".into(),
        ));
    }
    Ok(())
}
