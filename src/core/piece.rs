//! Piece - a positioned, oriented instance of a catalog shape.

use std::rc::Rc;

use crate::core::rng::SimpleRng;
use crate::core::shapes::{OccupiedCells, ShapeDefinition, ShapeRef};
use crate::types::BlockColor;

/// The falling unit: a shared shape plus an anchor and orientation.
///
/// The anchor is the top-left cell of the shape's 4x4 window; orientation
/// is an index in 0..=3 into the shape's masks.
#[derive(Debug, Clone)]
pub struct Piece {
    shape: ShapeRef,
    x: i32,
    y: i32,
    orientation: u8,
}

impl Piece {
    pub fn new(shape: ShapeRef, x: i32, y: i32, orientation: u8) -> Self {
        debug_assert!(orientation < 4);
        Self {
            shape,
            x,
            y,
            orientation,
        }
    }

    /// Draw a random shape and place it at the top of a `width`-column
    /// field: uniform shape, uniform column in `0..=width - size`,
    /// orientation 0.
    pub fn spawn(catalog: &[ShapeRef], width: i32, rng: &mut SimpleRng) -> Self {
        let shape = Rc::clone(&catalog[rng.next_range(catalog.len() as u32) as usize]);
        let max_x = width - i32::from(shape.size);
        debug_assert!(max_x >= 0, "shape wider than the field");
        let x = rng.next_range((max_x + 1) as u32) as i32;
        Self::new(shape, x, 0, 0)
    }

    pub fn shape(&self) -> &ShapeDefinition {
        &self.shape
    }

    pub fn color(&self) -> BlockColor {
        self.shape.color
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    /// Absolute board cells occupied at the current placement.
    pub fn cells(&self) -> AbsoluteCells {
        self.cells_at(self.x, self.y, self.orientation)
    }

    /// Absolute board cells a hypothetical placement would occupy.
    ///
    /// This is what collision testing enumerates, so the hypothetical and
    /// the committed geometry can never disagree.
    pub fn cells_at(&self, x: i32, y: i32, orientation: u8) -> AbsoluteCells {
        AbsoluteCells {
            relative: self.shape.occupied_cells(orientation),
            x,
            y,
        }
    }

    pub(crate) fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub(crate) fn set_orientation(&mut self, orientation: u8) {
        debug_assert!(orientation < 4);
        self.orientation = orientation;
    }
}

/// Iterator over absolute occupied cells: the shape's relative cells
/// shifted by an anchor.
#[derive(Debug, Clone)]
pub struct AbsoluteCells {
    relative: OccupiedCells,
    x: i32,
    y: i32,
}

impl Iterator for AbsoluteCells {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        self.relative
            .next()
            .map(|(col, row)| (self.x + col, self.y + row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> ShapeRef {
        Rc::new(ShapeDefinition {
            size: 2,
            blocks: [0xCC00; 4],
            id: 'O',
            color: BlockColor::new(255, 0, 0),
        })
    }

    #[test]
    fn test_cells_are_anchor_plus_relative() {
        let piece = Piece::new(square(), 4, 7, 0);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(4, 7), (5, 7), (4, 8), (5, 8)]);
    }

    #[test]
    fn test_cells_at_does_not_move_the_piece() {
        let piece = Piece::new(square(), 4, 7, 0);
        let hypothetical: Vec<_> = piece.cells_at(0, 0, 0).collect();
        assert_eq!(hypothetical, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(piece.x(), 4);
        assert_eq!(piece.y(), 7);
    }

    #[test]
    fn test_spawn_stays_inside_the_field() {
        let catalog = vec![square()];
        let mut rng = SimpleRng::new(99);
        for _ in 0..200 {
            let piece = Piece::spawn(&catalog, 10, &mut rng);
            assert_eq!(piece.y(), 0);
            assert_eq!(piece.orientation(), 0);
            assert!(piece.x() >= 0);
            assert!(piece.x() + i32::from(piece.shape().size) <= 10);
        }
    }

    #[test]
    fn test_spawned_pieces_share_the_shape() {
        let catalog = vec![square()];
        let mut rng = SimpleRng::new(1);
        let a = Piece::spawn(&catalog, 10, &mut rng);
        let b = Piece::spawn(&catalog, 10, &mut rng);
        assert!(Rc::ptr_eq(&a.shape, &b.shape));
    }
}
