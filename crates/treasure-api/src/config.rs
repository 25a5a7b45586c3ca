//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// JSON file backing the player record.
    pub player_record_path: PathBuf,
    /// Cap on puzzle answers per run; `None` for unlimited.
    pub puzzle_max_attempts: Option<u32>,
    /// Percentage applied to every stage timer.
    pub timer_scale_percent: u32,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let player_record_path = lookup("PLAYER_RECORD_PATH")
            .map_or_else(|| PathBuf::from("player_record.json"), PathBuf::from);

        let puzzle_max_attempts = match lookup("PUZZLE_MAX_ATTEMPTS") {
            None => None,
            Some(raw) => {
                let attempts: u32 = raw.parse().map_err(|e| {
                    AppError::Config(format!("PUZZLE_MAX_ATTEMPTS must be a valid u32: {e}"))
                })?;
                if attempts == 0 {
                    return Err(AppError::Config(
                        "PUZZLE_MAX_ATTEMPTS must be at least 1".to_string(),
                    ));
                }
                Some(attempts)
            }
        };

        let timer_scale_percent: u32 = lookup("TIMER_SCALE_PERCENT")
            .unwrap_or_else(|| "100".to_string())
            .parse()
            .map_err(|e| {
                AppError::Config(format!("TIMER_SCALE_PERCENT must be a valid u32: {e}"))
            })?;

        Ok(Self {
            host,
            port,
            player_record_path,
            puzzle_max_attempts,
            timer_scale_percent,
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn bind_address(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.player_record_path, PathBuf::from("player_record.json"));
        assert_eq!(config.puzzle_max_attempts, None);
        assert_eq!(config.timer_scale_percent, 100);
    }

    #[test]
    fn test_values_are_read_from_environment() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("PLAYER_RECORD_PATH", "/tmp/hunt/player.json"),
            ("PUZZLE_MAX_ATTEMPTS", "3"),
            ("TIMER_SCALE_PERCENT", "0"),
        ])
        .unwrap();

        assert_eq!(config.bind_address().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.player_record_path, PathBuf::from("/tmp/hunt/player.json"));
        assert_eq!(config.puzzle_max_attempts, Some(3));
        assert_eq!(config.timer_scale_percent, 0);
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let result = config_from(&[("PORT", "99999")]);

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_zero_puzzle_attempts_is_config_error() {
        let result = config_from(&[("PUZZLE_MAX_ATTEMPTS", "0")]);

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_host_fails_bind_address() {
        let config = config_from(&[("HOST", "not a host")]).unwrap();

        assert!(matches!(config.bind_address(), Err(AppError::Config(_))));
    }
}
