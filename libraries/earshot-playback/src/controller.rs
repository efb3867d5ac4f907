//! Player controller - transport control surface
//!
//! Translates user intents and media callbacks into queue mutations and
//! media source commands. Every transport action checks its own
//! precondition and quietly does nothing when it fails, so a control that
//! the UI forgot to disable can never corrupt state.

use crate::{
    end_of_track::{self, EndOfTrackAction},
    error::Result,
    events::PlayerEvent,
    format::format_seconds,
    queue::{PlayerQueue, QueueStore},
    source::{MediaBackend, MediaEvent, MediaEventKind, SourceId},
    sync::Synchronizer,
    types::{PlayableItem, PlayerConfig, PlayerPhase, PlayerView},
};
use tracing::{debug, info, trace};

/// Central playback controller
///
/// Owns the queue store, the synchronizer with its single media binding,
/// and the panel visibility flag. All state changes happen inside method
/// calls on this type, one event at a time.
pub struct PlayerController<Q: QueueStore = PlayerQueue> {
    queue: Q,
    backend: Box<dyn MediaBackend>,
    sync: Synchronizer,
    panel_open: bool,
    autoplay: bool,
    pending_events: Vec<PlayerEvent>,
}

impl PlayerController<PlayerQueue> {
    /// Create a controller with the default queue store
    pub fn new(config: PlayerConfig, backend: Box<dyn MediaBackend>) -> Result<Self> {
        config.validate()?;
        let queue = PlayerQueue::from_config(&config);
        Ok(Self::with_queue(&config, queue, backend))
    }
}

impl<Q: QueueStore> PlayerController<Q> {
    /// Create a controller around a custom queue store
    pub fn with_queue(config: &PlayerConfig, queue: Q, backend: Box<dyn MediaBackend>) -> Self {
        let mut controller = Self {
            queue,
            backend,
            sync: Synchronizer::new(),
            panel_open: config.panel_open,
            autoplay: config.autoplay,
            pending_events: Vec::new(),
        };
        // A pre-populated store gets its source right away
        if controller.queue.current_item().is_some() {
            controller.rebind();
        }
        controller
    }

    // ===== Selection =====

    /// Play a single item, replacing the queue
    pub fn play(&mut self, item: PlayableItem) -> Result<()> {
        self.play_list(vec![item], 0)
    }

    /// Replace the queue with `items` and start at `index`
    pub fn play_list(&mut self, items: Vec<PlayableItem>, index: usize) -> Result<()> {
        self.queue.replace(items, index)?;
        info!(
            "Selected item {} of {}",
            index + 1,
            self.queue.items().len()
        );
        self.set_playing_intent(self.autoplay);
        self.rebind();
        Ok(())
    }

    // ===== Transport =====

    /// Flip the playing intent
    pub fn toggle_play(&mut self) -> bool {
        let playing = !self.queue.is_playing();
        self.set_playing(playing);
        true
    }

    /// Flip native single-item repeat; needs a current item
    pub fn toggle_loop(&mut self) -> bool {
        if self.queue.current_item().is_none() {
            debug!("toggle_loop ignored: no current item");
            return false;
        }

        self.queue.toggle_loop();
        let looping = self.queue.is_looping();
        self.sync.set_looping(looping);
        self.emit(PlayerEvent::LoopChanged {
            is_looping: looping,
        });
        true
    }

    /// Flip shuffle mode; needs more than one queued item
    pub fn toggle_shuffle(&mut self) -> bool {
        if self.queue.items().len() <= 1 {
            debug!("toggle_shuffle ignored: fewer than two items queued");
            return false;
        }

        self.queue.toggle_shuffle();
        self.emit(PlayerEvent::ShuffleChanged {
            is_shuffling: self.queue.is_shuffling(),
        });
        true
    }

    /// Jump to `seconds` within the current item
    ///
    /// The target is clamped to the item's duration when the duration is
    /// known. Elapsed time updates immediately.
    pub fn seek(&mut self, seconds: u32) -> bool {
        let Some(item) = self.queue.current_item() else {
            debug!("seek ignored: no current item");
            return false;
        };

        let target = if item.duration > 0 {
            seconds.min(item.duration)
        } else {
            seconds
        };

        let before = self.sync.elapsed_seconds();
        if !self.sync.seek(target) {
            debug!("seek to {}s dropped: no source bound", target);
            return false;
        }
        if before != target {
            self.emit(PlayerEvent::ElapsedChanged { seconds: target });
        }
        true
    }

    /// Move to the next item; needs `has_next`
    pub fn play_next(&mut self) -> bool {
        if !self.queue.has_next() {
            debug!("play_next ignored: no next item");
            return false;
        }
        if !self.queue.advance() {
            return false;
        }
        self.rebind();
        true
    }

    /// Move to the previous item; needs `has_previous`
    pub fn play_previous(&mut self) -> bool {
        if !self.queue.has_previous() {
            debug!("play_previous ignored: no previous item");
            return false;
        }
        if !self.queue.retreat() {
            return false;
        }
        self.rebind();
        true
    }

    /// Show or hide the control panel; no effect on playback
    pub fn toggle_panel(&mut self) -> bool {
        self.panel_open = !self.panel_open;
        self.emit(PlayerEvent::PanelToggled {
            is_open: self.panel_open,
        });
        true
    }

    // ===== Media callbacks =====

    /// Apply a signal raised by a media source
    ///
    /// Signals from any source other than the bound one are dropped.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if !self.sync.is_current(event.source) {
            trace!(
                "Dropped stale {:?} from {} (bound: {:?})",
                event.kind,
                event.source,
                self.sync.bound_source()
            );
            return;
        }

        match event.kind {
            MediaEventKind::MetadataLoaded => {
                let before = self.sync.elapsed_seconds();
                self.sync.on_metadata_loaded();
                self.emit_elapsed_if_changed(before);
            }
            MediaEventKind::PositionTick => {
                if self.sync.on_position_tick() {
                    self.emit(PlayerEvent::ElapsedChanged {
                        seconds: self.sync.elapsed_seconds(),
                    });
                }
            }
            MediaEventKind::Ended => self.handle_track_ended(),
            MediaEventKind::Played => self.note_source_playing(true),
            MediaEventKind::Paused => self.note_source_playing(false),
        }
    }

    // ===== State Queries =====

    /// End-of-track state machine phase
    pub fn phase(&self) -> PlayerPhase {
        if self.queue.current_index().is_some() {
            PlayerPhase::Playing
        } else {
            PlayerPhase::Idle
        }
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.sync.elapsed_seconds()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Read access to the queue store
    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub fn current_item(&self) -> Option<&PlayableItem> {
        self.queue.current_item()
    }

    /// Id of the source currently bound to the display
    pub fn bound_source(&self) -> Option<SourceId> {
        self.sync.bound_source()
    }

    /// Snapshot for rendering
    pub fn view(&self) -> PlayerView {
        let item = self.queue.current_item().cloned();
        let has_item = item.is_some();
        let elapsed_seconds = self.sync.elapsed_seconds();
        let duration_seconds = item.as_ref().map_or(0, |i| i.duration);

        PlayerView {
            current_index: self.queue.current_index(),
            queue_len: self.queue.items().len(),
            phase: self.phase(),
            elapsed_seconds,
            duration_seconds,
            elapsed_label: format_seconds(elapsed_seconds),
            duration_label: format_seconds(duration_seconds),
            is_playing: self.queue.is_playing(),
            is_looping: self.queue.is_looping(),
            is_shuffling: self.queue.is_shuffling(),
            is_panel_open: self.panel_open,
            can_shuffle: has_item && self.queue.items().len() > 1,
            can_previous: has_item && self.queue.has_previous(),
            can_toggle_play: has_item,
            can_next: has_item && self.queue.has_next(),
            can_loop: has_item,
            can_seek: has_item,
            item,
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns every event emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn handle_track_ended(&mut self) {
        let phase = self.phase();
        let action = end_of_track::decide(&self.queue);
        debug!(
            "Track ended: {:?} ({:?} -> {:?})",
            action,
            phase,
            action.next_phase(phase)
        );

        match action {
            EndOfTrackAction::Advance => {
                // The finished source is about to be dropped; only the new
                // one needs the play command
                self.set_playing_intent(true);
                self.play_next();
            }
            EndOfTrackAction::Reset => self.reset(),
            EndOfTrackAction::Ignore => {}
        }
    }

    /// Drop the queue and the binding
    fn reset(&mut self) {
        let was_playing = self.queue.is_playing();
        let before = self.sync.elapsed_seconds();

        self.queue.clear();
        self.sync.unbind();
        info!("Queue finished; player idle");

        self.emit(PlayerEvent::QueueCleared);
        if was_playing {
            self.emit(PlayerEvent::PlayingChanged { is_playing: false });
        }
        self.emit_elapsed_if_changed(before);
    }

    /// Bind a fresh source for the current item
    fn rebind(&mut self) {
        let before = self.sync.elapsed_seconds();
        let playing = self.queue.is_playing();
        let looping = self.queue.is_looping();

        let (Some(index), Some(item)) = (self.queue.current_index(), self.queue.current_item())
        else {
            self.sync.unbind();
            self.emit_elapsed_if_changed(before);
            return;
        };

        let source = self
            .sync
            .bind(self.backend.as_mut(), item, playing, looping);
        info!("Now playing {:?} ({})", item.title, source);

        self.emit(PlayerEvent::ItemChanged { index, source });
        self.emit_elapsed_if_changed(before);
    }

    fn set_playing(&mut self, playing: bool) {
        self.set_playing_intent(playing);
        self.sync.apply_playing(playing);
    }

    fn set_playing_intent(&mut self, playing: bool) {
        if self.queue.is_playing() != playing {
            self.queue.set_playing(playing);
            self.emit(PlayerEvent::PlayingChanged {
                is_playing: playing,
            });
        }
    }

    /// Fold a play/pause the source performed on its own into the intent
    fn note_source_playing(&mut self, playing: bool) {
        self.sync.note_source_playing(playing);
        self.set_playing_intent(playing);
    }

    fn emit_elapsed_if_changed(&mut self, before: u32) {
        let now = self.sync.elapsed_seconds();
        if now != before {
            self.emit(PlayerEvent::ElapsedChanged { seconds: now });
        }
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }
}

impl<Q: QueueStore + std::fmt::Debug> std::fmt::Debug for PlayerController<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerController")
            .field("queue", &self.queue)
            .field("sync", &self.sync)
            .field("panel_open", &self.panel_open)
            .field("autoplay", &self.autoplay)
            .field("pending_events", &self.pending_events.len())
            .finish()
    }
}
