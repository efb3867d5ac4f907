/// Simulator error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid playlist: {0}")]
    Playlist(#[from] serde_json::Error),

    #[error("Playback error: {0}")]
    Playback(#[from] earshot_playback::PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
