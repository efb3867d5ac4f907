//! Media source abstraction
//!
//! Abstracts the platform playback primitive (an `<audio>` element in the
//! browser, a simulated clock in tests and in the CLI harness).

use crate::types::PlayableItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one media source binding
///
/// Every source opened by the controller gets a fresh id. Events carry the
/// id of the source that raised them, so events from a superseded source
/// can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(u64);

impl SourceId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

/// Lifecycle signals raised by a media source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaEventKind {
    /// Duration and seekability are known; position may now be set
    MetadataLoaded,

    /// Playback position moved (periodic while playing, and after seeks)
    PositionTick,

    /// Playback reached the end without looping
    Ended,

    /// The source started playing on its own (autoplay, OS media keys)
    Played,

    /// The source paused on its own
    Paused,
}

/// A signal addressed with the id of the source that raised it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEvent {
    pub source: SourceId,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(source: SourceId, kind: MediaEventKind) -> Self {
        Self { source, kind }
    }
}

/// Platform playback primitive for a single item
///
/// Commands are fire-and-forget: the platform reports the outcome later as
/// [`MediaEvent`]s. Dropping a source must stop it from raising events (or
/// at least make sure they can no longer reach the controller).
pub trait MediaSource {
    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Current playback position in seconds
    fn position(&self) -> f64;

    /// Jump to a position in seconds
    fn set_position(&mut self, seconds: f64);

    /// Enable or disable native single-item repeat
    ///
    /// While enabled the source restarts itself at the end and never
    /// raises [`MediaEventKind::Ended`].
    fn set_looping(&mut self, looping: bool);
}

/// Factory for media sources
///
/// The controller asks the backend for a new source every time the current
/// item changes.
pub trait MediaBackend {
    /// Open a source for `item`, tagging its events with `id`
    fn open(&mut self, id: SourceId, item: &PlayableItem) -> Box<dyn MediaSource>;
}
