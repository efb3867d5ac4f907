//! Queue store
//!
//! Owns the ordered list of playable items, the cursor into it, and the
//! playing/looping/shuffling flags. The controller reads and mutates this
//! state only through [`QueueStore`]; nothing else writes its fields.

use crate::error::{PlaybackError, Result};
use crate::history::History;
use crate::shuffle::pick_next_index;
use crate::types::{PlayableItem, PlayerConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Shared playback state with validated mutations
///
/// Implementations own the navigation policy: `has_next`/`has_previous`
/// and what `advance`/`retreat` pick, sequential or shuffled.
pub trait QueueStore {
    /// All queued items in play order
    fn items(&self) -> &[PlayableItem];

    /// Cursor into [`items`](Self::items), `None` when nothing is selected
    fn current_index(&self) -> Option<usize>;

    /// Item under the cursor
    fn current_item(&self) -> Option<&PlayableItem> {
        self.current_index().and_then(|index| self.items().get(index))
    }

    fn is_playing(&self) -> bool;
    fn is_looping(&self) -> bool;
    fn is_shuffling(&self) -> bool;

    /// Whether [`advance`](Self::advance) would move the cursor
    fn has_next(&self) -> bool;

    /// Whether [`retreat`](Self::retreat) would move the cursor
    fn has_previous(&self) -> bool;

    /// Move the cursor forward; returns false (and does nothing) if `!has_next()`
    fn advance(&mut self) -> bool;

    /// Move the cursor back; returns false (and does nothing) if `!has_previous()`
    fn retreat(&mut self) -> bool;

    fn set_playing(&mut self, playing: bool);
    fn toggle_loop(&mut self);
    fn toggle_shuffle(&mut self);

    /// Replace the queue and point the cursor at `index`
    fn replace(&mut self, items: Vec<PlayableItem>, index: usize) -> Result<()>;

    /// Empty the queue, unset the cursor and stop playing
    fn clear(&mut self);
}

/// Default in-memory queue store
///
/// Sequential mode steps the cursor by one and never wraps. Shuffle mode
/// jumps to a random other item and remembers where it came from, so
/// "previous" retraces the shuffled path before falling back to stepping
/// back by one.
#[derive(Debug, Clone)]
pub struct PlayerQueue {
    items: Vec<PlayableItem>,
    current: Option<usize>,
    playing: bool,
    looping: bool,
    shuffling: bool,
    history: History,
    rng: StdRng,
}

impl PlayerQueue {
    /// Create an empty queue with default settings
    pub fn new() -> Self {
        Self::from_config(&PlayerConfig::default())
    }

    /// Create an empty queue using the configured history size and flags
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            items: Vec::new(),
            current: None,
            playing: false,
            looping: config.looping,
            shuffling: config.shuffle,
            history: History::new(config.history_size),
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed seed for shuffle selection
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Number of shuffle jumps "previous" can still retrace
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for PlayerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueStore for PlayerQueue {
    fn items(&self) -> &[PlayableItem] {
        &self.items
    }

    fn current_index(&self) -> Option<usize> {
        self.current
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn is_looping(&self) -> bool {
        self.looping
    }

    fn is_shuffling(&self) -> bool {
        self.shuffling
    }

    fn has_next(&self) -> bool {
        let Some(index) = self.current else {
            return false;
        };

        if self.shuffling {
            self.items.len() > 1
        } else {
            index + 1 < self.items.len()
        }
    }

    fn has_previous(&self) -> bool {
        let Some(index) = self.current else {
            return false;
        };

        index > 0 || (self.shuffling && !self.history.is_empty())
    }

    fn advance(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        let Some(index) = self.current else {
            return false;
        };

        let next = if self.shuffling {
            match pick_next_index(&mut self.rng, self.items.len(), index) {
                Some(next) => {
                    self.history.push(index);
                    next
                }
                None => return false,
            }
        } else {
            index + 1
        };

        self.current = Some(next);
        true
    }

    fn retreat(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        let Some(index) = self.current else {
            return false;
        };

        let shuffled_back = if self.shuffling {
            // History may point past the end if the queue shrank since
            std::iter::from_fn(|| self.history.pop()).find(|&i| i < self.items.len())
        } else {
            None
        };

        match shuffled_back {
            Some(previous) => self.current = Some(previous),
            None if index > 0 => self.current = Some(index - 1),
            None => return false,
        }
        true
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    fn toggle_loop(&mut self) {
        self.looping = !self.looping;
    }

    fn toggle_shuffle(&mut self) {
        self.shuffling = !self.shuffling;
        if !self.shuffling {
            self.history.clear();
        }
    }

    fn replace(&mut self, items: Vec<PlayableItem>, index: usize) -> Result<()> {
        if items.is_empty() {
            return Err(PlaybackError::EmptyQueue);
        }
        if index >= items.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: items.len(),
            });
        }

        self.items = items;
        self.current = Some(index);
        self.history.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.items.clear();
        self.current = None;
        self.playing = false;
        self.history.clear();
    }
}
