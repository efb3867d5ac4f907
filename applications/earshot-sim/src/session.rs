//! Simulated listening sessions
//!
//! A session selects a playlist, then lets virtual time pass one tick at a
//! time until the queue runs out or the tick budget is spent. Metadata is
//! delivered as soon as a new source is bound, and every controller event
//! is logged.

use crate::config::SimConfig;
use crate::error::Result;
use earshot_playback::simulated::SimulatedBackend;
use earshot_playback::{
    PlayableItem, PlayerController, PlayerEvent, PlayerPhase, PlayerQueue, QueueStore, SourceId,
};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Per-run overrides from the command line
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Index of the first item to play
    pub start: usize,

    /// Turn shuffle on regardless of configuration
    pub shuffle: bool,

    /// Turn loop on regardless of configuration
    pub looping: bool,
}

/// Outcome of one session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    /// Number of sources bound, counting repeats
    pub items_started: usize,

    pub ticks: u64,

    /// Virtual time that passed
    pub virtual_seconds: f64,

    /// Controller events observed
    pub transitions: usize,

    /// Whether the queue ran out (as opposed to hitting the tick budget or
    /// stalling while paused)
    pub finished: bool,
}

/// Read a playlist: a JSON array of items
pub fn load_playlist(path: &Path) -> Result<Vec<PlayableItem>> {
    let contents = std::fs::read_to_string(path)?;
    let items: Vec<PlayableItem> = serde_json::from_str(&contents)?;
    debug!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

/// Play `items` to the end on a virtual clock
pub fn run_session(
    config: &SimConfig,
    items: Vec<PlayableItem>,
    options: &SessionOptions,
) -> Result<SessionReport> {
    config.validate()?;

    let mut player_config = config.player.clone();
    player_config.shuffle |= options.shuffle;
    player_config.looping |= options.looping;

    let mut queue = PlayerQueue::from_config(&player_config);
    if let Some(seed) = config.seed {
        queue = queue.with_seed(seed);
    }

    let backend = SimulatedBackend::new();
    let mut player =
        PlayerController::with_queue(&player_config, queue, Box::new(backend.clone()));

    player.play_list(items, options.start)?;
    if !player.queue().is_playing() {
        info!("Autoplay is off; pressing play");
        player.toggle_play();
    }

    let mut report = SessionReport {
        items_started: 0,
        ticks: 0,
        virtual_seconds: 0.0,
        transitions: 0,
        finished: false,
    };
    let mut loaded: Option<SourceId> = None;

    report.transitions += log_events(player.drain_events());

    while report.ticks < config.max_ticks {
        if player.phase() == PlayerPhase::Idle {
            report.finished = true;
            break;
        }

        let Some(source) = player.bound_source().and_then(|id| backend.handle(id)) else {
            warn!("No source bound while playing; stopping");
            break;
        };

        if loaded != Some(source.id()) {
            loaded = Some(source.id());
            report.items_started += 1;
            player.handle_media_event(source.load_metadata());
        }

        if !source.is_playing() {
            warn!("{} is paused; nothing left to simulate", source.id());
            break;
        }

        for event in source.advance(config.tick_seconds) {
            player.handle_media_event(event);
        }
        report.ticks += 1;
        report.virtual_seconds += config.tick_seconds;
        report.transitions += log_events(player.drain_events());
    }

    if !report.finished && player.phase() == PlayerPhase::Idle {
        report.finished = true;
    }

    info!(
        "Session over after {} ticks ({} items, finished: {})",
        report.ticks, report.items_started, report.finished
    );
    Ok(report)
}

fn log_events(events: Vec<PlayerEvent>) -> usize {
    for event in &events {
        match event {
            PlayerEvent::ElapsedChanged { .. } => debug!("{:?}", event),
            _ => info!("{:?}", event),
        }
    }
    events.len()
}
