//! Error types for playback control
//!
//! Transport actions never fail: a disabled action is a no-op. These errors
//! only surface from selection and configuration APIs.

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// A list was selected without any items in it
    #[error("Queue is empty")]
    EmptyQueue,

    /// Start index outside the selected list
    #[error("Index out of bounds: {index} (queue length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Item or view could not be converted across the host boundary
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
