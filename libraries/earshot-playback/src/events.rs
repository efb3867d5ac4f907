//! Player events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as it changes state; the host drains them after each action or
//! media callback and re-renders whatever changed.

use crate::source::SourceId;
use serde::{Deserialize, Serialize};

/// Events emitted by the player controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerEvent {
    /// Playing intent flipped
    PlayingChanged { is_playing: bool },

    /// A new item became current and was bound to a fresh source
    ItemChanged { index: usize, source: SourceId },

    /// The queue was emptied (end of the last item)
    QueueCleared,

    /// Displayed elapsed time changed
    ElapsedChanged { seconds: u32 },

    LoopChanged { is_looping: bool },

    ShuffleChanged { is_shuffling: bool },

    /// Control panel shown or hidden
    PanelToggled { is_open: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(PlayerEvent::PlayingChanged { is_playing: true }).unwrap();
        assert_eq!(json["type"], "playingChanged");
        assert_eq!(json["is_playing"], true);

        let json = serde_json::to_value(PlayerEvent::QueueCleared).unwrap();
        assert_eq!(json["type"], "queueCleared");
    }

    #[test]
    fn item_changed_carries_source_id() {
        let event = PlayerEvent::ItemChanged {
            index: 2,
            source: SourceId::new(5),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["index"], 2);
        assert_eq!(json["source"], 5);
    }
}
