use std::path::PathBuf;
use std::time::Duration;

pub const BANK_VAR: &str = "GRAMMAR_GARDEN_BANK";
pub const LOG_VAR: &str = "GRAMMAR_GARDEN_LOG";
pub const SHUFFLE_VAR: &str = "GRAMMAR_GARDEN_SHUFFLE";
pub const TICK_VAR: &str = "GRAMMAR_GARDEN_TICK_MS";

const DEFAULT_LOG_FILE: &str = "grammar_garden.log";
const DEFAULT_TICK_MS: u64 = 50;

/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Custom question bank; the built-in one is used when unset.
    pub bank_path: Option<PathBuf>,
    /// None disables logging.
    pub log_path: Option<PathBuf>,
    pub shuffle: bool,
    pub tick_rate: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bank_path: None,
            log_path: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            shuffle: true,
            tick_rate: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bank_path = lookup(BANK_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let log_path = match lookup(LOG_VAR) {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(PathBuf::from(v)),
            None => defaults.log_path,
        };

        let shuffle = lookup(SHUFFLE_VAR)
            .map(|v| {
                !matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "0" | "false" | "off" | "no"
                )
            })
            .unwrap_or(defaults.shuffle);

        let tick_rate = lookup(TICK_VAR)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|ms| Duration::from_millis(ms.clamp(10, 1000)))
            .unwrap_or(defaults.tick_rate);

        Self {
            bank_path,
            log_path,
            shuffle,
            tick_rate,
        }
    }
}
