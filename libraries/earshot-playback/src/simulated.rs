//! Simulated media backend
//!
//! A deterministic stand-in for the browser `<audio>` element. Sources keep
//! a virtual position that only moves when the host calls
//! [`SimulatedHandle::advance`], and every source can be inspected after
//! the controller has dropped it. Used by the CLI harness and by tests.

use crate::source::{MediaBackend, MediaEvent, MediaEventKind, MediaSource, SourceId};
use crate::types::PlayableItem;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug)]
struct SimulatedState {
    id: SourceId,
    url: String,
    duration: f64,
    position: f64,
    playing: bool,
    looping: bool,
    play_calls: usize,
    pause_calls: usize,
    dropped: bool,
}

/// Shared view of one simulated source
///
/// Stays valid after the controller drops the source, so late (stale)
/// events can still be raised from it.
#[derive(Debug, Clone)]
pub struct SimulatedHandle(Rc<RefCell<SimulatedState>>);

impl SimulatedHandle {
    pub fn id(&self) -> SourceId {
        self.0.borrow().id
    }

    pub fn url(&self) -> String {
        self.0.borrow().url.clone()
    }

    pub fn duration(&self) -> f64 {
        self.0.borrow().duration
    }

    pub fn position(&self) -> f64 {
        self.0.borrow().position
    }

    pub fn is_playing(&self) -> bool {
        self.0.borrow().playing
    }

    pub fn is_looping(&self) -> bool {
        self.0.borrow().looping
    }

    /// Number of `play()` commands received
    pub fn play_calls(&self) -> usize {
        self.0.borrow().play_calls
    }

    /// Number of `pause()` commands received
    pub fn pause_calls(&self) -> usize {
        self.0.borrow().pause_calls
    }

    /// Whether the controller has let go of this source
    pub fn is_dropped(&self) -> bool {
        self.0.borrow().dropped
    }

    /// Raise an arbitrary event from this source
    pub fn raise(&self, kind: MediaEventKind) -> MediaEvent {
        MediaEvent::new(self.id(), kind)
    }

    /// Finish loading metadata
    pub fn load_metadata(&self) -> MediaEvent {
        self.raise(MediaEventKind::MetadataLoaded)
    }

    /// Pause from outside the controller (OS media key, headphones unplugged)
    pub fn external_pause(&self) -> MediaEvent {
        self.0.borrow_mut().playing = false;
        self.raise(MediaEventKind::Paused)
    }

    /// Resume from outside the controller
    pub fn external_play(&self) -> MediaEvent {
        self.0.borrow_mut().playing = true;
        self.raise(MediaEventKind::Played)
    }

    /// Let `seconds` of wall time pass
    ///
    /// A playing source moves forward and reports a position tick. At the end
    /// a looping source wraps around to the start; any other source stops
    /// and reports completion.
    pub fn advance(&self, seconds: f64) -> Vec<MediaEvent> {
        let mut state = self.0.borrow_mut();
        if !state.playing || seconds <= 0.0 {
            return Vec::new();
        }

        state.position += seconds;
        let mut kinds = vec![MediaEventKind::PositionTick];

        if state.position >= state.duration {
            if state.looping && state.duration > 0.0 {
                state.position %= state.duration;
            } else {
                state.position = state.duration;
                state.playing = false;
                kinds.push(MediaEventKind::Ended);
            }
        }

        let id = state.id;
        kinds
            .into_iter()
            .map(|kind| MediaEvent::new(id, kind))
            .collect()
    }
}

struct SimulatedSource(SimulatedHandle);

impl MediaSource for SimulatedSource {
    fn play(&mut self) {
        let mut state = self.0 .0.borrow_mut();
        state.play_calls += 1;
        // Playing a finished element restarts it, as browsers do
        if !state.looping && state.position >= state.duration {
            state.position = 0.0;
        }
        state.playing = true;
    }

    fn pause(&mut self) {
        let mut state = self.0 .0.borrow_mut();
        state.pause_calls += 1;
        state.playing = false;
    }

    fn position(&self) -> f64 {
        self.0.position()
    }

    fn set_position(&mut self, seconds: f64) {
        let mut state = self.0 .0.borrow_mut();
        state.position = seconds.clamp(0.0, state.duration.max(0.0));
    }

    fn set_looping(&mut self, looping: bool) {
        self.0 .0.borrow_mut().looping = looping;
    }
}

impl Drop for SimulatedSource {
    fn drop(&mut self) {
        let mut state = self.0 .0.borrow_mut();
        state.dropped = true;
        state.playing = false;
    }
}

/// Backend that opens [`SimulatedHandle`]-backed sources
///
/// Clones share the same record of opened sources: hand one clone to the
/// controller and keep another to drive and inspect playback.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    opened: Rc<RefCell<Vec<SimulatedHandle>>>,
}

impl SimulatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every source opened so far, oldest first
    pub fn opened(&self) -> Vec<SimulatedHandle> {
        self.opened.borrow().clone()
    }

    /// Most recently opened source
    pub fn latest(&self) -> Option<SimulatedHandle> {
        self.opened.borrow().last().cloned()
    }

    pub fn handle(&self, id: SourceId) -> Option<SimulatedHandle> {
        self.opened.borrow().iter().find(|h| h.id() == id).cloned()
    }
}

impl MediaBackend for SimulatedBackend {
    fn open(&mut self, id: SourceId, item: &PlayableItem) -> Box<dyn MediaSource> {
        let handle = SimulatedHandle(Rc::new(RefCell::new(SimulatedState {
            id,
            url: item.url.clone(),
            duration: f64::from(item.duration),
            position: 0.0,
            playing: false,
            looping: false,
            play_calls: 0,
            pause_calls: 0,
            dropped: false,
        })));
        self.opened.borrow_mut().push(handle.clone());
        Box::new(SimulatedSource(handle))
    }
}
