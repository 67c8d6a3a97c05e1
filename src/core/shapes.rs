//! Shape catalog - piece geometries and their four orientation masks.
//!
//! Each orientation of a shape is a 16-bit occupancy mask over a 4x4 cell
//! window, row-major with the most significant bit at the top-left cell.
//! The catalog is built once at startup from configuration and shared by
//! every piece spawned afterwards.

use std::rc::Rc;

use crate::config::GameConfig;
use crate::types::BlockColor;

/// Immutable geometry and identity of one piece kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDefinition {
    /// Side of the bounding square, 2..=4.
    pub size: u8,
    /// One occupancy mask per orientation.
    pub blocks: [u16; 4],
    /// Identity tag (also selects the display color).
    pub id: char,
    pub color: BlockColor,
}

/// Shared handle to a shape. Pieces reference their geometry, they never
/// own it.
pub type ShapeRef = Rc<ShapeDefinition>;

impl ShapeDefinition {
    /// Iterate the occupied cells of one orientation as relative
    /// `(col, row)` pairs inside the 4x4 window.
    ///
    /// The scan runs from the most to the least significant bit, so cells
    /// come out row-major: top to bottom, left to right. Collision testing
    /// and cell painting both consume this one iterator; the geometry is
    /// never enumerated a second way.
    ///
    /// `orientation` must be in 0..=3 (caller contract; panics otherwise).
    pub fn occupied_cells(&self, orientation: u8) -> OccupiedCells {
        OccupiedCells {
            mask: self.blocks[usize::from(orientation)],
            bit: 0x8000,
            col: 0,
            row: 0,
        }
    }
}

/// Lazy iterator over the set bits of an orientation mask.
#[derive(Debug, Clone)]
pub struct OccupiedCells {
    mask: u16,
    bit: u16,
    col: i32,
    row: i32,
}

impl Iterator for OccupiedCells {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        while self.bit != 0 {
            let cell = (self.col, self.row);
            let occupied = self.mask & self.bit != 0;
            self.bit >>= 1;
            self.col += 1;
            if self.col == 4 {
                self.col = 0;
                self.row += 1;
            }
            if occupied {
                return Some(cell);
            }
        }
        None
    }
}

/// Resolve the configured shape specs and color ids into the catalog the
/// engine draws from.
///
/// A color id without an entry in the color map (or with an unknown color
/// name) falls back to gray rather than failing: a miscolored piece is
/// still playable.
pub fn build_catalog(config: &GameConfig) -> Vec<ShapeRef> {
    const FALLBACK: BlockColor = BlockColor::new(128, 128, 128);

    config
        .tetromino_set
        .iter()
        .map(|spec| {
            let color = config
                .tetromino_color
                .get(&spec.color)
                .and_then(|name| BlockColor::from_name(name))
                .unwrap_or(FALLBACK);
            Rc::new(ShapeDefinition {
                size: spec.size,
                blocks: spec.blocks,
                id: spec.color,
                color,
            })
        })
        .collect()
}
