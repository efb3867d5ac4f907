//! Earshot - Playback Control
//!
//! Playback synchronization and transport control for the Earshot web
//! player.
//!
//! This crate provides:
//! - A queue store with sequential and shuffled navigation
//! - A synchronizer keeping elapsed time and play/pause in step with the
//!   bound media source
//! - A transport control surface (play/pause, seek, next, previous,
//!   shuffle, loop, panel toggle) that ignores disabled actions
//! - An end-of-track policy (advance, or reset to idle)
//! - Display formatting for elapsed time and durations
//!
//! # Architecture
//!
//! `earshot-playback` does not know about the DOM. The platform playback
//! primitive is supplied through the [`MediaBackend`] and [`MediaSource`]
//! traits; the browser implementation lives behind the `wasm` feature, and
//! [`simulated`] provides a deterministic one for tests and tooling.
//!
//! Everything runs on one event loop. The host calls transport methods for
//! user input and [`PlayerController::handle_media_event`] for media
//! callbacks, then drains [`PlayerEvent`]s to re-render.
//!
//! # Example
//!
//! ```rust
//! use earshot_playback::simulated::SimulatedBackend;
//! use earshot_playback::{PlayableItem, PlayerConfig, PlayerController};
//!
//! let backend = SimulatedBackend::new();
//! let mut player = PlayerController::new(PlayerConfig::default(), Box::new(backend.clone()))?;
//!
//! player.play(PlayableItem {
//!     title: "Episode 1".to_string(),
//!     members: "Ana, Bruno".to_string(),
//!     url: "https://cdn.example.com/ep1.mp3".to_string(),
//!     thumbnail: String::new(),
//!     duration: 225,
//! })?;
//!
//! let source = backend.latest().unwrap();
//! player.handle_media_event(source.load_metadata());
//! for event in source.advance(61.5) {
//!     player.handle_media_event(event);
//! }
//!
//! assert_eq!(player.elapsed_seconds(), 61);
//! assert_eq!(player.view().elapsed_label, "01:01");
//! # Ok::<(), earshot_playback::PlaybackError>(())
//! ```

mod controller;
pub mod end_of_track;
mod error;
mod events;
mod format;
mod history;
pub mod queue;
mod shuffle;
pub mod simulated;
mod source;
mod sync;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use controller::PlayerController;
pub use end_of_track::EndOfTrackAction;
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use format::format_seconds;
pub use queue::{PlayerQueue, QueueStore};
pub use source::{MediaBackend, MediaEvent, MediaEventKind, MediaSource, SourceId};
pub use sync::Synchronizer;
pub use types::{PlayableItem, PlayerConfig, PlayerPhase, PlayerView};
