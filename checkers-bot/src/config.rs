use std::env;
use std::str::FromStr;

use bot_core::{BotError, Result};

/// Checkers bot configuration, loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub log_file: String,
    /// Seeds the AI so games can be replayed; random when unset.
    pub ai_seed: Option<u64>,
    /// Upper bound on games live at the same time.
    pub max_games: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_file: "logs/checkers-bot.log".to_string(),
            ai_seed: None,
            max_games: 1000,
        }
    }
}

impl BotConfig {
    /// Reads `CHECKERS_LOG_FILE`, `CHECKERS_AI_SEED` and `CHECKERS_MAX_GAMES`.
    /// Load `.env` before calling.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let log_file = env::var("CHECKERS_LOG_FILE").unwrap_or(defaults.log_file);
        let ai_seed = parse_var("CHECKERS_AI_SEED")?;
        let max_games = parse_var("CHECKERS_MAX_GAMES")?.unwrap_or(defaults.max_games);

        if max_games == 0 {
            return Err(BotError::Config("CHECKERS_MAX_GAMES must be at least 1".to_string()));
        }

        Ok(Self {
            log_file,
            ai_seed,
            max_games,
        })
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| BotError::Config(format!("{} is not a valid number: {}", name, raw))),
        _ => Ok(None),
    }
}
