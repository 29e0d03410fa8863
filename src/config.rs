use std::env;

use crate::error::ConfigError;

pub const DEFAULT_RANK_LIMIT: usize = 10;

/// Runtime settings for the command-line tool. Flags passed on the command
/// line take precedence over these values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    pub rank_limit: usize,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let log_level = env::var("SCHOLARSHIP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let rank_limit = match env::var("SCHOLARSHIP_RANK_LIMIT") {
            Ok(value) => parse_rank_limit(&value)?,
            Err(_) => DEFAULT_RANK_LIMIT,
        };

        Ok(Self {
            log_level,
            rank_limit,
        })
    }
}

fn parse_rank_limit(value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|limit| *limit > 0)
        .ok_or_else(|| ConfigError::InvalidRankLimit(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("SCHOLARSHIP_LOG_LEVEL");
        env::remove_var("SCHOLARSHIP_RANK_LIMIT");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.rank_limit, DEFAULT_RANK_LIMIT);
    }

    #[test]
    fn reads_overrides_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SCHOLARSHIP_LOG_LEVEL", "debug");
        env::set_var("SCHOLARSHIP_RANK_LIMIT", "25");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.rank_limit, 25);
        reset_env();
    }

    #[test]
    fn rejects_zero_or_garbage_rank_limit() {
        assert!(matches!(
            parse_rank_limit("0"),
            Err(ConfigError::InvalidRankLimit(_))
        ));
        assert!(matches!(
            parse_rank_limit("ten"),
            Err(ConfigError::InvalidRankLimit(_))
        ));
        assert_eq!(parse_rank_limit(" 5 ").expect("trimmed value parses"), 5);
    }
}
