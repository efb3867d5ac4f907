//! Property-based tests for the player controller
//!
//! Uses proptest to verify invariants across many random inputs.

use earshot_playback::simulated::SimulatedBackend;
use earshot_playback::{
    format_seconds, PlayableItem, PlayerConfig, PlayerController, PlayerPhase, PlayerQueue,
    QueueStore,
};
use proptest::prelude::*;

// ===== Helpers =====

fn arbitrary_item() -> impl Strategy<Value = PlayableItem> {
    (
        "[A-Za-z ]{1,30}", // title
        "[A-Za-z ]{1,20}", // members
        "[a-z0-9]{1,10}",  // file name
        1u32..7200,        // duration (up to two hours)
    )
        .prop_map(|(title, members, name, duration)| PlayableItem {
            title,
            members,
            url: format!("https://cdn.example.com/{}.mp3", name),
            thumbnail: String::new(),
            duration,
        })
}

fn arbitrary_items() -> impl Strategy<Value = Vec<PlayableItem>> {
    prop::collection::vec(arbitrary_item(), 1..20)
}

#[derive(Debug, Clone)]
enum Action {
    Next,
    Previous,
    TogglePlay,
    ToggleShuffle,
    ToggleLoop,
    Seek(u32),
    Tick(u32),
    Finish,
}

fn arbitrary_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Next),
        Just(Action::Previous),
        Just(Action::TogglePlay),
        Just(Action::ToggleShuffle),
        Just(Action::ToggleLoop),
        (0u32..8000).prop_map(Action::Seek),
        (1u32..600).prop_map(Action::Tick),
        Just(Action::Finish),
    ]
}

fn create_player(seed: u64) -> (PlayerController, SimulatedBackend) {
    let backend = SimulatedBackend::new();
    let player = PlayerController::with_queue(
        &PlayerConfig::default(),
        PlayerQueue::new().with_seed(seed),
        Box::new(backend.clone()),
    );
    (player, backend)
}

fn apply(player: &mut PlayerController, backend: &SimulatedBackend, action: &Action) {
    match action {
        Action::Next => {
            player.play_next();
        }
        Action::Previous => {
            player.play_previous();
        }
        Action::TogglePlay => {
            player.toggle_play();
        }
        Action::ToggleShuffle => {
            player.toggle_shuffle();
        }
        Action::ToggleLoop => {
            player.toggle_loop();
        }
        Action::Seek(seconds) => {
            player.seek(*seconds);
        }
        Action::Tick(seconds) => {
            if let Some(source) = backend.latest() {
                for event in source.advance(f64::from(*seconds)) {
                    player.handle_media_event(event);
                }
            }
        }
        Action::Finish => {
            if let Some(source) = backend.latest() {
                let remaining = source.duration() - source.position();
                for event in source.advance(remaining.max(0.0) + 0.5) {
                    player.handle_media_event(event);
                }
            }
        }
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: The cursor is either unset or within the queue
    #[test]
    fn cursor_stays_in_bounds(
        items in arbitrary_items(),
        start in 0usize..20,
        seed in any::<u64>(),
        actions in prop::collection::vec(arbitrary_action(), 0..60)
    ) {
        let (mut player, backend) = create_player(seed);
        let start = start % items.len();
        player.play_list(items, start).unwrap();

        for action in &actions {
            let was_playing_phase = player.phase() == PlayerPhase::Playing;
            apply(&mut player, &backend, action);

            let queue = player.queue();
            match queue.current_index() {
                Some(index) => prop_assert!(index < queue.items().len()),
                None => {
                    // toggle_play may still flip the intent while idle
                    prop_assert!(queue.items().is_empty());
                    prop_assert_eq!(player.phase(), PlayerPhase::Idle);
                    if was_playing_phase {
                        prop_assert!(!queue.is_playing());
                    }
                }
            }
        }
    }

    /// Property: Exactly the bound source may be playing
    #[test]
    fn at_most_one_source_plays(
        items in arbitrary_items(),
        seed in any::<u64>(),
        actions in prop::collection::vec(arbitrary_action(), 0..60)
    ) {
        let (mut player, backend) = create_player(seed);
        player.play_list(items, 0).unwrap();

        for action in &actions {
            apply(&mut player, &backend, action);

            let playing: Vec<_> = backend
                .opened()
                .into_iter()
                .filter(|s| s.is_playing())
                .collect();
            prop_assert!(playing.len() <= 1);
            if let Some(source) = playing.first() {
                prop_assert_eq!(player.bound_source(), Some(source.id()));
            }
        }
    }

    /// Property: A successful next/previous always starts the new item at 0
    #[test]
    fn navigation_resets_elapsed(
        items in prop::collection::vec(arbitrary_item(), 2..20),
        seed in any::<u64>(),
        forward in prop::collection::vec(any::<bool>(), 1..40),
        listen in 1u32..600
    ) {
        let (mut player, backend) = create_player(seed);
        player.play_list(items, 0).unwrap();

        for go_next in forward {
            let source = backend.latest().unwrap();
            player.handle_media_event(source.load_metadata());
            apply(&mut player, &backend, &Action::Tick(listen));

            let before = player.bound_source();
            let moved = if go_next {
                player.play_next()
            } else {
                player.play_previous()
            };

            if moved {
                prop_assert_eq!(player.elapsed_seconds(), 0);
                prop_assert_ne!(player.bound_source(), before);
            } else {
                prop_assert_eq!(player.bound_source(), before);
            }
        }
    }

    /// Property: Seeking within the item shows the target immediately
    #[test]
    fn seek_sets_elapsed(
        item in arbitrary_item(),
        fraction in 0.0f64..=1.0,
        metadata_first in any::<bool>()
    ) {
        let (mut player, backend) = create_player(0);
        let duration = item.duration;
        player.play(item).unwrap();
        let source = backend.latest().unwrap();
        if metadata_first {
            player.handle_media_event(source.load_metadata());
        }

        let target = (f64::from(duration) * fraction).floor() as u32;
        prop_assert!(player.seek(target));
        prop_assert_eq!(player.elapsed_seconds(), target);

        if !metadata_first {
            // A seek issued while loading survives the metadata reset
            player.handle_media_event(source.load_metadata());
            prop_assert_eq!(player.elapsed_seconds(), target);
        }
        prop_assert_eq!(source.position(), f64::from(target));
    }

    /// Property: Under loop, completion never clears the queue
    #[test]
    fn looping_never_resets(
        item in arbitrary_item(),
        ticks in prop::collection::vec(1u32..600, 1..30)
    ) {
        let (mut player, backend) = create_player(0);
        let duration = item.duration;
        player.play(item).unwrap();
        player.toggle_loop();
        let source = backend.latest().unwrap();
        player.handle_media_event(source.load_metadata());

        for seconds in ticks {
            apply(&mut player, &backend, &Action::Tick(seconds));
            prop_assert_eq!(player.phase(), PlayerPhase::Playing);
            prop_assert!(player.elapsed_seconds() < duration);
        }
    }

    /// Property: Labels always have two-digit fields
    #[test]
    fn labels_are_zero_padded(seconds in any::<u32>()) {
        let label = format_seconds(seconds);
        let fields: Vec<&str> = label.split(':').collect();

        prop_assert!(fields.len() == 2 || fields.len() == 3);
        for field in &fields[1..] {
            prop_assert_eq!(field.len(), 2);
        }
        prop_assert!(fields[0].len() >= 2);
        prop_assert_eq!(fields.len() == 3, seconds >= 3600);
    }
}
