//! Session tests driven from files on disk

use earshot_sim::{load_playlist, run_session, SessionOptions, SimConfig, SimError};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn write_playlist(dir: &TempDir, durations: &[u32]) -> std::path::PathBuf {
    let items: Vec<_> = durations
        .iter()
        .enumerate()
        .map(|(i, duration)| {
            json!({
                "title": format!("Episode {}", i),
                "members": "Ana, Bruno",
                "url": format!("https://cdn.example.com/{}.m4a", i),
                "thumbnail": format!("https://cdn.example.com/{}.jpg", i),
                "duration": duration,
            })
        })
        .collect();

    let path = dir.path().join("playlist.json");
    fs::write(&path, serde_json::to_string(&items).unwrap()).unwrap();
    path
}

#[test]
fn playlist_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = write_playlist(&dir, &[30, 3720]);

    let items = load_playlist(&path).unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[1].duration, 3720);
    assert_eq!(items[0].members, "Ana, Bruno");
}

#[test]
fn malformed_playlist_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("playlist.json");
    fs::write(&path, r#"[{ "title": "missing fields" }]"#).unwrap();

    assert!(matches!(load_playlist(&path), Err(SimError::Playlist(_))));
}

#[test]
fn missing_playlist_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_playlist(&dir.path().join("nope.json"));
    assert!(matches!(result, Err(SimError::Io(_))));
}

#[test]
fn config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("earshot.toml");
    fs::write(
        &path,
        r#"
tick_seconds = 0.5
max_ticks = 40
seed = 9

[player]
panel_open = false
autoplay = false
"#,
    )
    .unwrap();

    let config = SimConfig::load(Some(&path)).unwrap();

    assert_eq!(config.tick_seconds, 0.5);
    assert_eq!(config.max_ticks, 40);
    assert_eq!(config.seed, Some(9));
    assert!(!config.player.panel_open);
    assert!(!config.player.autoplay);
    assert_eq!(config.player.history_size, 50);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = SimConfig::load(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(SimError::Config(_))));
}

#[test]
fn session_from_files_plays_through() {
    let dir = TempDir::new().unwrap();
    let playlist = write_playlist(&dir, &[4, 6]);
    let config_path = dir.path().join("earshot.toml");
    fs::write(&config_path, "tick_seconds = 2.0\n").unwrap();

    let config = SimConfig::load(Some(&config_path)).unwrap();
    let items = load_playlist(&playlist).unwrap();
    let report = run_session(&config, items, &SessionOptions::default()).unwrap();

    assert!(report.finished);
    assert_eq!(report.items_started, 2);
    assert_eq!(report.ticks, 5);
    assert_eq!(report.virtual_seconds, 10.0);
}

#[test]
fn autoplay_off_still_runs() {
    let mut config = SimConfig::default();
    config.player.autoplay = false;

    let dir = TempDir::new().unwrap();
    let items = load_playlist(&write_playlist(&dir, &[3])).unwrap();
    let report = run_session(&config, items, &SessionOptions::default()).unwrap();

    assert!(report.finished);
    assert_eq!(report.ticks, 3);
}

#[test]
fn seeded_shuffle_never_runs_dry() {
    let config = SimConfig {
        max_ticks: 100,
        seed: Some(3),
        ..Default::default()
    };
    let options = SessionOptions {
        shuffle: true,
        ..Default::default()
    };

    let dir = TempDir::new().unwrap();
    let items = load_playlist(&write_playlist(&dir, &[10, 10, 10])).unwrap();
    let report = run_session(&config, items, &options).unwrap();

    assert!(!report.finished);
    assert_eq!(report.ticks, 100);
    assert_eq!(report.items_started, 10);
}
