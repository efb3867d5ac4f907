//! Core types for playback control

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};

/// A single playable audio item
///
/// Field names match the listing page's JSON so items can be handed over
/// as-is from the page (or from JavaScript through the wasm bindings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayableItem {
    /// Display title
    pub title: String,

    /// Attribution line (hosts, guests, authors)
    pub members: String,

    /// Media resource locator handed to the media backend
    pub url: String,

    /// Artwork locator
    #[serde(default)]
    pub thumbnail: String,

    /// Length in whole seconds
    pub duration: u32,
}

/// End-of-track state machine phase
///
/// `Playing` means an item is selected (whether or not audio is currently
/// audible); `Idle` means the queue is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerPhase {
    /// No item selected
    Idle,

    /// An item is selected and bound to a media source
    Playing,
}

/// Configuration for the player controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Whether the control panel starts open (default: true)
    pub panel_open: bool,

    /// Start playback as soon as an item is selected (default: true)
    pub autoplay: bool,

    /// Shuffle history length used by "previous" (default: 50)
    pub history_size: usize,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial loop flag (default: false)
    pub looping: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            panel_open: true,
            autoplay: true,
            history_size: 50,
            shuffle: false,
            looping: false,
        }
    }
}

impl PlayerConfig {
    /// Reject values the controller cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.history_size == 0 {
            return Err(PlaybackError::InvalidConfig(
                "history_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Snapshot of everything the rendered surface needs
///
/// The `can_*` flags say which buttons to enable. Apart from play/pause,
/// which is disabled while nothing is selected, they match the preconditions
/// the controller checks itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub item: Option<PlayableItem>,
    pub current_index: Option<usize>,
    pub queue_len: usize,
    pub phase: PlayerPhase,
    pub elapsed_seconds: u32,
    pub duration_seconds: u32,
    pub elapsed_label: String,
    pub duration_label: String,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffling: bool,
    pub is_panel_open: bool,
    pub can_shuffle: bool,
    pub can_previous: bool,
    pub can_toggle_play: bool,
    pub can_next: bool,
    pub can_loop: bool,
    pub can_seek: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert!(config.panel_open);
        assert!(config.autoplay);
        assert_eq!(config.history_size, 50);
        assert!(!config.shuffle);
        assert!(!config.looping);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_history_is_rejected() {
        let config = PlayerConfig {
            history_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlaybackError::InvalidConfig(_))
        ));
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: PlayerConfig = serde_json::from_str(r#"{ "panel_open": false }"#).unwrap();
        assert!(!config.panel_open);
        assert!(config.autoplay);
        assert_eq!(config.history_size, 50);
    }

    #[test]
    fn item_deserializes_from_listing_json() {
        let item: PlayableItem = serde_json::from_str(
            r#"{
                "title": "Episode 1",
                "members": "Ana, Bruno",
                "url": "https://cdn.example.com/ep1.m4a",
                "thumbnail": "https://cdn.example.com/ep1.jpg",
                "duration": 3720
            }"#,
        )
        .unwrap();

        assert_eq!(item.title, "Episode 1");
        assert_eq!(item.duration, 3720);
    }

    #[test]
    fn missing_thumbnail_defaults_to_empty() {
        let item: PlayableItem = serde_json::from_str(
            r#"{ "title": "t", "members": "m", "url": "u", "duration": 1 }"#,
        )
        .unwrap();
        assert!(item.thumbnail.is_empty());
    }
}
