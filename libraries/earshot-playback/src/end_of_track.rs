//! End-of-track policy
//!
//! Two-state machine over [`PlayerPhase`]: on a completion event the player
//! either moves on to the next item (Playing → Playing) or drops the whole
//! queue (Playing → Idle).
//!
//! Looping never reaches this policy. A looping source restarts itself and
//! does not report completion.

use crate::queue::QueueStore;
use crate::types::PlayerPhase;

/// What to do when the current item finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfTrackAction {
    /// Play the next item, exactly like a user-initiated "next"
    Advance,

    /// Empty the queue, unset the cursor, stop playing
    Reset,

    /// Nothing is selected; there is nothing to finish
    Ignore,
}

impl EndOfTrackAction {
    /// Phase the player lands in after carrying out this action
    pub fn next_phase(self, current: PlayerPhase) -> PlayerPhase {
        match self {
            EndOfTrackAction::Advance => PlayerPhase::Playing,
            EndOfTrackAction::Reset => PlayerPhase::Idle,
            EndOfTrackAction::Ignore => current,
        }
    }
}

/// Decide how to handle completion of the current item
pub fn decide<Q: QueueStore + ?Sized>(queue: &Q) -> EndOfTrackAction {
    if queue.current_index().is_none() {
        EndOfTrackAction::Ignore
    } else if queue.has_next() {
        EndOfTrackAction::Advance
    } else {
        EndOfTrackAction::Reset
    }
}
