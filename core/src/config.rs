//! Client configuration.
//!
//! Defaults are `http://localhost:3000` and a reload after a failed delete.
//! Each value can be overridden through the environment; unparsable values
//! are logged and ignored.

use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REFRESH_DEBOUNCE: Duration = Duration::from_millis(300);

pub const ENV_BASE_URL: &str = "TODO_API_URL";
pub const ENV_DELETE_RECOVERY: &str = "TODO_DELETE_RECOVERY";
pub const ENV_REFRESH_DEBOUNCE_MS: &str = "TODO_REFRESH_DEBOUNCE_MS";

/// What the store does when a delete request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteRecovery {
    /// Re-fetch the whole list from the server.
    #[default]
    Reload,
    /// Put the removed item back where it was.
    Restore,
}

impl FromStr for DeleteRecovery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reload" => Ok(DeleteRecovery::Reload),
            "restore" => Ok(DeleteRecovery::Restore),
            other => Err(format!("unknown delete recovery `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub delete_recovery: DeleteRecovery,
    pub refresh_debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            delete_recovery: DeleteRecovery::default(),
            refresh_debounce: DEFAULT_REFRESH_DEBOUNCE,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_DELETE_RECOVERY) {
            match raw.parse() {
                Ok(recovery) => config.delete_recovery = recovery,
                Err(e) => warn!(key = ENV_DELETE_RECOVERY, "{e}, using default"),
            }
        }

        if let Some(raw) = lookup(ENV_REFRESH_DEBOUNCE_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.refresh_debounce = Duration::from_millis(ms),
                Err(e) => warn!(key = ENV_REFRESH_DEBOUNCE_MS, value = %raw, "invalid value: {e}, using default"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.delete_recovery, DeleteRecovery::Reload);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://todo.internal:8080/"),
            (ENV_DELETE_RECOVERY, "Restore"),
            (ENV_REFRESH_DEBOUNCE_MS, "50"),
        ]));
        assert_eq!(config.base_url, "http://todo.internal:8080/");
        assert_eq!(config.delete_recovery, DeleteRecovery::Restore);
        assert_eq!(config.refresh_debounce, Duration::from_millis(50));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "  "),
            (ENV_DELETE_RECOVERY, "undo"),
            (ENV_REFRESH_DEBOUNCE_MS, "soon"),
        ]));
        assert_eq!(config, ClientConfig::default());
    }
}
