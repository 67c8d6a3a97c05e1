//! Shared plain types with no dependencies on the rest of the crate.

/// Game lifecycle phase.
///
/// `Cancelled` doubles as the pre-start state and the game-over terminal
/// state; `Playing` is the only phase in which ticking, line clearing and
/// scoring happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Cancelled,
    Paused,
    Playing,
}

/// Discrete player intents, buffered in the action queue and drained one
/// per update tick.
///
/// Start/continue, pause and cancel are deliberately not actions: they are
/// applied to the engine immediately so they take effect even when the
/// queue is backed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
    HardDrop,
}

/// 24-bit color of a settled block or falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BlockColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Resolve a CSS-style color name (case-insensitive).
    ///
    /// Covers the names the default shape set uses plus a few common ones
    /// for custom configurations.
    pub fn from_name(name: &str) -> Option<Self> {
        let rgb = match name.to_ascii_lowercase().as_str() {
            "orange" => (255, 165, 0),
            "red" => (255, 0, 0),
            "yellow" => (255, 255, 0),
            "orchid" => (218, 112, 214),
            "blue" => (0, 0, 255),
            "lightskyblue" => (135, 206, 250),
            "lawngreen" => (124, 252, 0),
            "green" => (0, 128, 0),
            "cyan" => (0, 255, 255),
            "magenta" => (255, 0, 255),
            "purple" => (128, 0, 128),
            "white" => (255, 255, 255),
            "gray" | "grey" => (128, 128, 128),
            _ => return None,
        };
        Some(Self::new(rgb.0, rgb.1, rgb.2))
    }
}

/// One board cell: empty, or the color of the settled block occupying it.
pub type Cell = Option<BlockColor>;
