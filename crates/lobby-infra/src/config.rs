//! Configuration loader for Lobby.
//!
//! Reads a TOML file into [`LobbyConfig`]. Falls back to defaults when the
//! file is missing or malformed, so a bare `lobby serve` always starts.

use std::path::Path;

use lobby_types::config::LobbyConfig;

/// Load configuration from `path`.
///
/// - Missing file: returns [`LobbyConfig::default()`] and logs at debug.
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(path: &Path) -> LobbyConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return LobbyConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return LobbyConfig::default();
        }
    };

    match toml::from_str::<LobbyConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            LobbyConfig::default()
        }
    }
}
