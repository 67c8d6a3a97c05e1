//! Game configuration: typed defaults plus an explicit override merge.
//!
//! The engine consumes a fully-resolved [`GameConfig`]. Players may drop a
//! JSON file next to the binary (or pass a path) to override parts of it;
//! the merge recurses only over the known fields below, so unknown keys in
//! the file can never leak into the effective settings.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::core::scoring::ScoreRules;

/// Board dimensions in blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSize {
    pub x: i32,
    pub y: i32,
}

/// Automatic drop timing, in seconds.
///
/// The effective delay is `max(min, start - decrement * rows_cleared)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delays {
    pub start: f64,
    pub decrement: f64,
    pub min: f64,
}

/// Pre-game clutter handicap options. Percentages are of board height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClutterOptions {
    pub enabled_by_default: bool,
    pub min_percent: u8,
    pub max_percent: u8,
    pub step_percent: u8,
    pub default_percent: u8,
}

/// Geometry and color identity of one configured shape.
///
/// `blocks` holds one 16-bit occupancy mask per orientation, row-major over
/// a 4x4 window with the most significant bit at the top-left cell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShapeSpec {
    pub size: u8,
    pub blocks: [u16; 4],
    #[serde(rename = "colorIndex")]
    pub color: char,
}

/// Fully-resolved configuration handed to the engine.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub game_size: GameSize,
    pub delays: Delays,
    pub clutter: ClutterOptions,
    pub tetromino_set: Vec<ShapeSpec>,
    pub tetromino_color: HashMap<char, String>,
    pub score_rules: ScoreRules,
    /// Side of the square upcoming-piece preview window, in blocks.
    pub upcoming_preview_size: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        let tetromino_set = vec![
            ShapeSpec { size: 4, blocks: [0x0F00, 0x2222, 0x00F0, 0x4444], color: 'I' },
            ShapeSpec { size: 3, blocks: [0x0E20, 0x44C0, 0x8E00, 0x6440], color: 'J' },
            ShapeSpec { size: 3, blocks: [0x0E80, 0xC440, 0x2E00, 0x4460], color: 'L' },
            ShapeSpec { size: 2, blocks: [0xCC00, 0xCC00, 0xCC00, 0xCC00], color: 'O' },
            ShapeSpec { size: 3, blocks: [0x06C0, 0x8C40, 0x6C00, 0x4620], color: 'S' },
            ShapeSpec { size: 3, blocks: [0x0E40, 0x4C40, 0x4E00, 0x4640], color: 'T' },
            ShapeSpec { size: 3, blocks: [0x0C60, 0x4C80, 0xC600, 0x2640], color: 'Z' },
        ];
        let tetromino_color = HashMap::from([
            ('I', "orange".to_string()),
            ('O', "red".to_string()),
            ('T', "yellow".to_string()),
            ('J', "orchid".to_string()),
            ('L', "blue".to_string()),
            ('S', "lightskyblue".to_string()),
            ('Z', "lawngreen".to_string()),
        ]);

        Self {
            game_size: GameSize { x: 10, y: 20 },
            delays: Delays {
                start: 0.5,
                decrement: 0.001,
                min: 0.1,
            },
            clutter: ClutterOptions {
                enabled_by_default: false,
                min_percent: 5,
                max_percent: 80,
                step_percent: 1,
                default_percent: 65,
            },
            tetromino_set,
            tetromino_color,
            score_rules: ScoreRules::reference(),
            upcoming_preview_size: 5,
        }
    }
}

impl GameConfig {
    /// Apply a partial override, field by field over the known structure.
    pub fn merge(&mut self, over: ConfigOverride) {
        if let Some(size) = over.game_size_in_blocks {
            if let Some(x) = size.x {
                self.game_size.x = x;
            }
            if let Some(y) = size.y {
                self.game_size.y = y;
            }
        }
        if let Some(delays) = over.delays {
            if let Some(start) = delays.start {
                self.delays.start = start;
            }
            if let Some(decrement) = delays.decrement {
                self.delays.decrement = decrement;
            }
            if let Some(min) = delays.min {
                self.delays.min = min;
            }
        }
        if let Some(clutter) = over.clutter_option_set {
            if let Some(enabled) = clutter.clutter_enabled_default {
                self.clutter.enabled_by_default = enabled;
            }
            if let Some(min) = clutter.min {
                self.clutter.min_percent = min;
            }
            if let Some(max) = clutter.max {
                self.clutter.max_percent = max;
            }
            if let Some(step) = clutter.step {
                self.clutter.step_percent = step;
            }
            if let Some(default) = clutter.default_percent {
                self.clutter.default_percent = default;
            }
        }
        if let Some(shapes) = over.tetromino_set {
            self.tetromino_set = shapes;
        }
        if let Some(colors) = over.tetromino_color {
            // Only recolor ids that exist; a color for an unknown shape id
            // is meaningless and dropped.
            for (id, name) in colors {
                if let Some(slot) = self.tetromino_color.get_mut(&id) {
                    *slot = name;
                }
            }
        }
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.game_size.x > 0 && self.game_size.y > 0,
            "board must be at least 1x1, got {}x{}",
            self.game_size.x,
            self.game_size.y
        );
        ensure!(!self.tetromino_set.is_empty(), "shape set is empty");
        for (index, shape) in self.tetromino_set.iter().enumerate() {
            ensure!(
                (2..=4).contains(&shape.size),
                "shape {index}: size {} outside 2..=4",
                shape.size
            );
            ensure!(
                i32::from(shape.size) <= self.game_size.x,
                "shape {index}: size {} wider than the board",
                shape.size
            );
        }
        ensure!(
            self.delays.min <= self.delays.start,
            "minimum drop delay exceeds the starting delay"
        );
        ensure!(
            self.clutter.min_percent <= self.clutter.max_percent
                && (self.clutter.min_percent..=self.clutter.max_percent)
                    .contains(&self.clutter.default_percent),
            "clutter default outside its min/max range"
        );
        Ok(())
    }

    /// Defaults merged with the optional override file at `path`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = path {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading settings file {}", path.display()))?;
            let over: ConfigOverride = serde_json::from_str(&text)
                .with_context(|| format!("parsing settings file {}", path.display()))?;
            config.merge(over);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Partial settings, deserialized from the override file.
///
/// Every field is optional; absent fields keep their defaults. Key names
/// are camelCase, matching the settings file format.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigOverride {
    pub game_size_in_blocks: Option<SizeOverride>,
    pub delays: Option<DelaysOverride>,
    pub clutter_option_set: Option<ClutterOverride>,
    pub tetromino_set: Option<Vec<ShapeSpec>>,
    pub tetromino_color: Option<HashMap<char, String>>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct SizeOverride {
    pub x: Option<i32>,
    pub y: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct DelaysOverride {
    pub start: Option<f64>,
    pub decrement: Option<f64>,
    pub min: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClutterOverride {
    pub clutter_enabled_default: Option<bool>,
    pub min: Option<u8>,
    pub max: Option<u8>,
    pub step: Option<u8>,
    #[serde(rename = "default")]
    pub default_percent: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_build() {
        let config = GameConfig::default();
        assert_eq!(config.game_size, GameSize { x: 10, y: 20 });
        assert_eq!(config.delays.start, 0.5);
        assert_eq!(config.delays.decrement, 0.001);
        assert_eq!(config.delays.min, 0.1);
        assert_eq!(config.tetromino_set.len(), 7);
        assert!(!config.clutter.enabled_by_default);
        assert_eq!(config.clutter.default_percent, 65);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_touches_only_present_fields() {
        let mut config = GameConfig::default();
        let over: ConfigOverride =
            serde_json::from_str(r#"{"gameSizeInBlocks": {"y": 24}, "delays": {"min": 0.05}}"#)
                .unwrap();
        config.merge(over);

        assert_eq!(config.game_size, GameSize { x: 10, y: 24 });
        assert_eq!(config.delays.min, 0.05);
        // Untouched fields keep their defaults.
        assert_eq!(config.delays.start, 0.5);
        assert_eq!(config.tetromino_set.len(), 7);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let over: ConfigOverride = serde_json::from_str(
            r#"{"no_such_section": {"a": 1}, "clutterOptionSet": {"default": 30, "junk": true}}"#,
        )
        .unwrap();
        let mut config = GameConfig::default();
        config.merge(over);
        assert_eq!(config.clutter.default_percent, 30);
    }

    #[test]
    fn test_shape_override_replaces_the_set() {
        let over: ConfigOverride = serde_json::from_str(
            r#"{"tetrominoSet": [{"size": 2, "blocks": [52224, 52224, 52224, 52224], "colorIndex": "O"}]}"#,
        )
        .unwrap();
        let mut config = GameConfig::default();
        config.merge(over);
        assert_eq!(config.tetromino_set.len(), 1);
        assert_eq!(config.tetromino_set[0].blocks[0], 0xCC00);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_color_override_ignores_unknown_ids() {
        let over: ConfigOverride = serde_json::from_str(
            r#"{"tetrominoColor": {"I": "red", "X": "blue"}}"#,
        )
        .unwrap();
        let mut config = GameConfig::default();
        config.merge(over);
        assert_eq!(config.tetromino_color.get(&'I').unwrap(), "red");
        assert!(!config.tetromino_color.contains_key(&'X'));
    }

    #[test]
    fn test_validate_rejects_degenerate_board() {
        let mut config = GameConfig::default();
        config.game_size = GameSize { x: 0, y: 20 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_shape_wider_than_board() {
        let mut config = GameConfig::default();
        config.game_size = GameSize { x: 3, y: 20 };
        // The I shape is 4 wide.
        assert!(config.validate().is_err());
    }
}
