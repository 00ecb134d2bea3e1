//! Table configuration with per-value source tracking.
//!
//! Values resolve in order: built-in defaults, then a TOML file named by
//! `HOLDEM_CONFIG`, then `HOLDEM_*` environment variables. Command-line flags
//! are applied on top by each command.

use std::fs;

use holdem_engine::engine::EngineConfig;
use holdem_engine::game::MAX_PLAYERS;
use holdem_engine::player::STARTING_STACK;
use holdem_engine::pot::PotMode;
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    pub players: usize,
    pub seed: Option<u64>,
    pub pot_mode: PotMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub starting_stack: ValueSource,
    pub players: ValueSource,
    pub seed: ValueSource,
    pub pot_mode: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            starting_stack: ValueSource::Default,
            players: ValueSource::Default,
            seed: ValueSource::Default,
            pot_mode: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            small_blind: engine.small_blind,
            big_blind: engine.big_blind,
            starting_stack: STARTING_STACK,
            players: 4,
            seed: None,
            pot_mode: PotMode::default(),
        }
    }
}

impl Config {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            pot_mode: self.pot_mode,
            seed: self.seed,
            ..EngineConfig::default()
        }
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

/// Resolves the configuration through `lookup` instead of the process
/// environment.
pub fn load_from<F>(lookup: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(path) = var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.pot_mode {
            cfg.pot_mode = v;
            sources.pot_mode = ValueSource::File;
        }
    }

    if let Some(v) = var("HOLDEM_SMALL_BLIND") {
        cfg.small_blind = parse_num(&v, "small_blind")?;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = var("HOLDEM_BIG_BLIND") {
        cfg.big_blind = parse_num(&v, "big_blind")?;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(v) = var("HOLDEM_STARTING_STACK") {
        cfg.starting_stack = parse_num(&v, "starting_stack")?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(v) = var("HOLDEM_PLAYERS") {
        cfg.players = parse_num(&v, "players")?;
        sources.players = ValueSource::Env;
    }
    if let Some(v) = var("HOLDEM_SEED") {
        cfg.seed = Some(parse_num(&v, "seed")?);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = var("HOLDEM_POT_MODE") {
        cfg.pot_mode = parse_pot_mode(&v)
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid pot_mode '{}'", v)))?;
        sources.pot_mode = ValueSource::Env;
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
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    pot_mode: Option<PotMode>,
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.engine_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if cfg.players < 2 || cfg.players > MAX_PLAYERS {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: players must be between 2 and {}",
            MAX_PLAYERS
        )));
    }
    Ok(())
}

fn parse_num<T: std::str::FromStr>(s: &str, name: &str) -> Result<T, ConfigError> {
    s.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {} '{}'", name, s)))
}

pub fn parse_pot_mode(s: &str) -> Option<PotMode> {
    match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "single" | "single_pool" => Some(PotMode::SinglePool),
        "side" | "side_pots" => Some(PotMode::SidePots),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let resolved = load_from(env(&[])).unwrap();
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.sources.seed, ValueSource::Default);
        assert_eq!(resolved.config.small_blind, 5);
        assert_eq!(resolved.config.big_blind, 10);
        assert_eq!(resolved.config.starting_stack, 1_000);
    }

    #[test]
    fn env_overrides_file_overrides_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 456\nplayers = 6\npot_mode = \"side_pots\"").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let resolved = load_from(env(&[(CONFIG_ENV, &path), ("HOLDEM_SEED", "7")])).unwrap();
        assert_eq!(resolved.config.seed, Some(7));
        assert_eq!(resolved.sources.seed, ValueSource::Env);
        assert_eq!(resolved.config.players, 6);
        assert_eq!(resolved.sources.players, ValueSource::File);
        assert_eq!(resolved.config.pot_mode, PotMode::SidePots);
        assert_eq!(resolved.sources.pot_mode, ValueSource::File);
        assert_eq!(resolved.sources.small_blind, ValueSource::Default);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let resolved = load_from(env(&[("HOLDEM_SEED", "")])).unwrap();
        assert_eq!(resolved.config.seed, None);
        assert_eq!(resolved.sources.seed, ValueSource::Default);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            load_from(env(&[("HOLDEM_SEED", "abc")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_from(env(&[("HOLDEM_BIG_BLIND", "7")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_from(env(&[("HOLDEM_PLAYERS", "23")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_from(env(&[("HOLDEM_POT_MODE", "split")])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let missing = env(&[(CONFIG_ENV, "/nonexistent/holdem.toml")]);
        assert!(matches!(load_from(missing), Err(ConfigError::Io(_))));
    }

    #[test]
    fn pot_mode_aliases() {
        assert_eq!(parse_pot_mode("side-pots"), Some(PotMode::SidePots));
        assert_eq!(parse_pot_mode("SINGLE"), Some(PotMode::SinglePool));
        assert_eq!(parse_pot_mode("none"), None);
    }
}
