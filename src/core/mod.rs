//! Core module - pure game logic with no terminal or I/O dependencies.
//!
//! Everything observable happens through [`Game`]: it owns the board, the
//! falling and upcoming pieces, the score state and the phase machine, and
//! advances them one `update` at a time.

pub mod board;
pub mod collision;
pub mod engine;
pub mod piece;
pub mod queue;
pub mod rng;
pub mod scoring;
pub mod shapes;

pub use board::Board;
pub use collision::would_collide;
pub use engine::{Game, Invalidations, MoveDirection};
pub use piece::Piece;
pub use queue::ActionQueue;
pub use rng::SimpleRng;
pub use scoring::ScoreRules;
pub use shapes::{build_catalog, ShapeDefinition, ShapeRef};
