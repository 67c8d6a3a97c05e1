//! Settings loading and merging through the public API.

use std::fs;
use std::path::PathBuf;

use tui_blockfall::config::GameConfig;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("blockfall-test-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_without_a_file_gives_defaults() {
    let config = GameConfig::load(None).unwrap();
    assert_eq!(config.game_size.x, 10);
    assert_eq!(config.game_size.y, 20);
    assert_eq!(config.tetromino_set.len(), 7);
}

#[test]
fn test_load_merges_the_override_file() {
    let path = temp_file(
        "override.json",
        r#"{
            "gameSizeInBlocks": {"x": 12},
            "delays": {"start": 0.8},
            "clutterOptionSet": {"clutterEnabledDefault": true, "default": 40}
        }"#,
    );
    let config = GameConfig::load(Some(&path)).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config.game_size.x, 12);
    assert_eq!(config.game_size.y, 20);
    assert_eq!(config.delays.start, 0.8);
    assert_eq!(config.delays.decrement, 0.001);
    assert!(config.clutter.enabled_by_default);
    assert_eq!(config.clutter.default_percent, 40);
}

#[test]
fn test_load_ignores_unknown_keys() {
    let path = temp_file(
        "unknown-keys.json",
        r#"{"futureFeature": {"x": 1}, "delays": {"min": 0.2}}"#,
    );
    let config = GameConfig::load(Some(&path)).unwrap();
    fs::remove_file(&path).ok();
    assert_eq!(config.delays.min, 0.2);
}

#[test]
fn test_load_rejects_malformed_json() {
    let path = temp_file("broken.json", "{not json");
    let result = GameConfig::load(Some(&path));
    fs::remove_file(&path).ok();
    assert!(result.is_err());
}

#[test]
fn test_load_rejects_a_missing_file() {
    let path = std::env::temp_dir().join("blockfall-test-does-not-exist.json");
    assert!(GameConfig::load(Some(&path)).is_err());
}

#[test]
fn test_load_rejects_an_unplayable_override() {
    // A 3-wide board cannot host the default 4-wide bar.
    let path = temp_file("too-narrow.json", r#"{"gameSizeInBlocks": {"x": 3}}"#);
    let result = GameConfig::load(Some(&path));
    fs::remove_file(&path).ok();
    assert!(result.is_err());
}

#[test]
fn test_shape_set_override_is_validated() {
    let path = temp_file(
        "shapes.json",
        r#"{"tetrominoSet": [
            {"size": 2, "blocks": [52224, 52224, 52224, 52224], "colorIndex": "O"}
        ]}"#,
    );
    let config = GameConfig::load(Some(&path)).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config.tetromino_set.len(), 1);
    assert_eq!(config.tetromino_set[0].size, 2);
    assert_eq!(config.tetromino_set[0].color, 'O');
}
