//! Playback synchronizer
//!
//! Keeps the displayed elapsed time in step with the bound media source and
//! keeps the source's play/pause state in step with the playing intent.
//! Only ever touches the one bound source, never queue state.

use crate::source::{MediaBackend, MediaSource, SourceId};
use crate::types::PlayableItem;
use tracing::{debug, trace};

/// The live association with one media source
struct Binding {
    id: SourceId,
    source: Box<dyn MediaSource>,

    /// Position ticks are only honoured once metadata has loaded
    subscribed: bool,

    /// Last play/pause state the source is known to be in
    applied_playing: bool,
}

/// Binds a media source to the elapsed-time display
pub struct Synchronizer {
    binding: Option<Binding>,
    last_id: SourceId,
    elapsed_seconds: u32,

    /// Seek requested before metadata loaded; replaces the reset-to-0
    pending_seek: Option<u32>,
}

impl Synchronizer {
    pub fn new() -> Self {
        Self {
            binding: None,
            last_id: SourceId::new(0),
            elapsed_seconds: 0,
            pending_seek: None,
        }
    }

    /// Id of the currently bound source
    pub fn bound_source(&self) -> Option<SourceId> {
        self.binding.as_ref().map(|b| b.id)
    }

    /// Whether `id` names the currently bound source
    pub fn is_current(&self, id: SourceId) -> bool {
        self.bound_source() == Some(id)
    }

    /// Whether position ticks are currently being applied
    pub fn is_subscribed(&self) -> bool {
        self.binding.as_ref().is_some_and(|b| b.subscribed)
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Open a source for `item`, superseding any previous binding
    ///
    /// The new source gets the current loop flag and play intent right away;
    /// its position subscription waits for metadata.
    pub fn bind(
        &mut self,
        backend: &mut dyn MediaBackend,
        item: &PlayableItem,
        playing: bool,
        looping: bool,
    ) -> SourceId {
        self.unbind();

        let id = self.last_id.next();
        self.last_id = id;

        let mut source = backend.open(id, item);
        source.set_looping(looping);

        debug!("Bound {} to {}", id, item.url);
        self.binding = Some(Binding {
            id,
            source,
            subscribed: false,
            applied_playing: false,
        });
        self.apply_playing(playing);
        id
    }

    /// Drop the current binding, if any
    ///
    /// The dropped source's subscription goes with it; later events from it
    /// fail [`is_current`](Self::is_current).
    pub fn unbind(&mut self) -> Option<SourceId> {
        self.elapsed_seconds = 0;
        self.pending_seek = None;
        let binding = self.binding.take()?;
        debug!("Unbound {}", binding.id);
        Some(binding.id)
    }

    /// Command the source to match `playing`
    ///
    /// Returns true if a command was issued. A source already known to be in
    /// the requested state is left alone.
    pub fn apply_playing(&mut self, playing: bool) -> bool {
        let Some(binding) = self.binding.as_mut() else {
            return false;
        };
        if binding.applied_playing == playing {
            return false;
        }

        if playing {
            binding.source.play();
        } else {
            binding.source.pause();
        }
        binding.applied_playing = playing;
        true
    }

    /// Record a play/pause the source performed on its own
    pub fn note_source_playing(&mut self, playing: bool) {
        if let Some(binding) = self.binding.as_mut() {
            binding.applied_playing = playing;
        }
    }

    pub fn set_looping(&mut self, looping: bool) {
        if let Some(binding) = self.binding.as_mut() {
            binding.source.set_looping(looping);
        }
    }

    /// Jump to `seconds` and show it immediately
    ///
    /// Returns false if no source is bound (the seek is dropped).
    pub fn seek(&mut self, seconds: u32) -> bool {
        let Some(binding) = self.binding.as_mut() else {
            return false;
        };

        if binding.subscribed {
            binding.source.set_position(f64::from(seconds));
        } else {
            self.pending_seek = Some(seconds);
        }
        self.elapsed_seconds = seconds;
        true
    }

    /// Metadata arrived for the bound source: reset position and subscribe
    pub fn on_metadata_loaded(&mut self) {
        let Some(binding) = self.binding.as_mut() else {
            return;
        };

        let start = self.pending_seek.take().unwrap_or(0);
        binding.source.set_position(f64::from(start));
        binding.subscribed = true;
        self.elapsed_seconds = start;
        trace!("{} subscribed at {}s", binding.id, start);
    }

    /// Position tick from the bound source
    ///
    /// Returns true if the displayed elapsed time changed.
    pub fn on_position_tick(&mut self) -> bool {
        let Some(binding) = self.binding.as_ref() else {
            return false;
        };
        if !binding.subscribed {
            trace!("{} ticked before metadata; ignored", binding.id);
            return false;
        }

        let elapsed = whole_seconds(binding.source.position());
        if elapsed == self.elapsed_seconds {
            return false;
        }
        self.elapsed_seconds = elapsed;
        true
    }
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Synchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synchronizer")
            .field("bound_source", &self.bound_source())
            .field("subscribed", &self.is_subscribed())
            .field("elapsed_seconds", &self.elapsed_seconds)
            .field("pending_seek", &self.pending_seek)
            .finish()
    }
}

/// Floor a position in seconds; negative and NaN positions count as 0
fn whole_seconds(position: f64) -> u32 {
    if position.is_nan() || position <= 0.0 {
        0
    } else {
        position.floor() as u32
    }
}
