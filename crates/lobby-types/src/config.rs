//! Configuration types for Lobby.
//!
//! `LobbyConfig` represents `lobby.toml`: listen address, database URL and
//! the presence timing (staleness threshold and sweep period).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration. All fields have defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LobbyConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub presence: PresenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_database_url() -> String {
    "sqlite://lobby.db?mode=rwc".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

/// Presence timing.
///
/// The threshold is shorter than the sweep period, so a participant can
/// stay listed for up to one extra period after going stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// Seconds without a status refresh before a participant is stale.
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,
    /// Seconds between sweep ticks.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_stale_after_secs() -> u64 {
    10
}

fn default_sweep_interval_secs() -> u64 {
    15
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            stale_after_secs: default_stale_after_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl PresenceConfig {
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Both durations must lie in `1..=MAX_PRESENCE_SECS`.
    pub fn validate(&self) -> Result<(), String> {
        check_range("presence.stale_after_secs", self.stale_after_secs)?;
        check_range("presence.sweep_interval_secs", self.sweep_interval_secs)
    }
}

/// Upper bound for the presence durations (one week).
pub const MAX_PRESENCE_SECS: u64 = 7 * 24 * 60 * 60;

fn check_range(key: &str, secs: u64) -> Result<(), String> {
    if secs == 0 {
        return Err(format!("{key} must be at least 1"));
    }
    if secs > MAX_PRESENCE_SECS {
        return Err(format!("{key} must be at most {MAX_PRESENCE_SECS}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = LobbyConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.presence.stale_after(), Duration::from_secs(10));
        assert_eq!(config.presence.sweep_interval(), Duration::from_secs(15));
        assert!(config.database.url.starts_with("sqlite://"));
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: LobbyConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.presence.stale_after_secs, 10);
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let toml_str = r#"
[server]
port = 8080

[presence]
sweep_interval_secs = 30
"#;
        let config: LobbyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.presence.sweep_interval_secs, 30);
        assert_eq!(config.presence.stale_after_secs, 10);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let presence = PresenceConfig {
            stale_after_secs: 0,
            sweep_interval_secs: 15,
        };
        assert!(presence.validate().is_err());

        let presence = PresenceConfig {
            stale_after_secs: 10,
            sweep_interval_secs: 0,
        };
        assert!(presence.validate().is_err());
        assert!(PresenceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized() {
        let presence = PresenceConfig {
            stale_after_secs: 10,
            sweep_interval_secs: u64::MAX,
        };
        let err = presence.validate().unwrap_err();
        assert!(err.contains("sweep_interval_secs"), "got {err}");

        let presence = PresenceConfig {
            stale_after_secs: MAX_PRESENCE_SECS + 1,
            sweep_interval_secs: 15,
        };
        assert!(presence.validate().is_err());

        let presence = PresenceConfig {
            stale_after_secs: MAX_PRESENCE_SECS,
            sweep_interval_secs: MAX_PRESENCE_SECS,
        };
        assert!(presence.validate().is_ok());
    }
}
