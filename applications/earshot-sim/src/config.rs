/// Simulator configuration
use crate::error::{Result, SimError};
use earshot_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "earshot.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimConfig {
    /// Virtual seconds that pass between two position ticks
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: f64,

    /// Upper bound on ticks per session (looping sessions never end)
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Fixed shuffle seed; random when unset
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub player: PlayerConfig,
}

impl SimConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `earshot.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (EARSHOT_MAX_TICKS,
        // EARSHOT_PLAYER__AUTOPLAY, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("EARSHOT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| SimError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| SimError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.tick_seconds.is_finite() || self.tick_seconds <= 0.0 {
            return Err(SimError::Config(format!(
                "tick_seconds must be positive, got {}",
                self.tick_seconds
            )));
        }

        if self.max_ticks == 0 {
            return Err(SimError::Config(
                "max_ticks must be at least 1".to_string(),
            ));
        }

        self.player.validate()?;
        Ok(())
    }
}

// Default values
fn default_tick_seconds() -> f64 {
    1.0
}

fn default_max_ticks() -> u64 {
    100_000
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_seconds: default_tick_seconds(),
            max_ticks: default_max_ticks(),
            seed: None,
            player: PlayerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        assert_eq!(config.tick_seconds, 1.0);
        assert_eq!(config.max_ticks, 100_000);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_tick_is_rejected() {
        for tick_seconds in [0.0, -1.0, f64::NAN] {
            let config = SimConfig {
                tick_seconds,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(SimError::Config(_))));
        }
    }

    #[test]
    fn player_config_is_validated() {
        let mut config = SimConfig::default();
        config.player.history_size = 0;
        assert!(matches!(config.validate(), Err(SimError::Playback(_))));
    }
}
