//! Board behavior through the public API.

use tui_blockfall::core::Board;
use tui_blockfall::types::{BlockColor, Cell};

fn color(v: u8) -> Cell {
    Some(BlockColor::new(v, v, v))
}

#[test]
fn test_new_board_dimensions_and_emptiness() {
    let board = Board::new(10, 20);
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 20);
    assert_eq!(board.topmost_occupied_row(), 20);
    for y in 0..20 {
        assert!(!board.is_row_complete(y));
    }
}

#[test]
fn test_in_bounds_edges() {
    let board = Board::new(10, 20);
    assert!(board.in_bounds(0, 0));
    assert!(board.in_bounds(9, 19));
    assert!(!board.in_bounds(-1, 0));
    assert!(!board.in_bounds(0, -1));
    assert!(!board.in_bounds(10, 0));
    assert!(!board.in_bounds(0, 20));
}

#[test]
fn test_row_completion_requires_every_column() {
    let mut board = Board::new(5, 8);
    for x in 0..4 {
        board.set(x, 7, color(1));
    }
    assert!(!board.is_row_complete(7));
    board.set(4, 7, color(1));
    assert!(board.is_row_complete(7));
    board.set(2, 7, None);
    assert!(!board.is_row_complete(7));
}

#[test]
fn test_collapse_row_moves_each_row_down_by_one() {
    let mut board = Board::new(3, 6);
    // Give every row above the collapse point a distinct marker.
    for y in 0..4 {
        board.set(0, y, color(y as u8 + 1));
    }
    board.set(1, 5, color(99));

    board.collapse_row(4);

    // Row 0 is empty; every row r <= 4 holds the former contents of r-1.
    assert_eq!(board.get(0, 0), None);
    for y in 1..5 {
        assert_eq!(board.get(0, y), color(y as u8));
    }
    // Below the collapse point nothing moved.
    assert_eq!(board.get(1, 5), color(99));
}

#[test]
fn test_collapse_row_zero_just_clears_it() {
    let mut board = Board::new(3, 6);
    for x in 0..3 {
        board.set(x, 0, color(1));
    }
    board.set(0, 1, color(2));

    board.collapse_row(0);

    assert_eq!(board.get(0, 0), None);
    assert_eq!(board.get(1, 0), None);
    assert_eq!(board.get(0, 1), color(2));
}

#[test]
fn test_topmost_tracks_the_highest_block() {
    let mut board = Board::new(4, 10);
    board.set(3, 9, color(1));
    assert_eq!(board.topmost_occupied_row(), 9);
    board.set(0, 3, color(2));
    assert_eq!(board.topmost_occupied_row(), 3);
    board.set(0, 3, None);
    assert_eq!(board.topmost_occupied_row(), 9);
}

#[test]
#[should_panic]
fn test_out_of_range_access_fails_loudly() {
    let board = Board::new(4, 10);
    let _ = board.get(4, 0);
}
