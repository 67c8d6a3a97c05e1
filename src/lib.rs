//! Board simulation and input state machine for a canvas-style
//! falling-block puzzle, with a terminal front end.
//!
//! The `core` module is the game proper; `config`, `input` and `term` are
//! the thin collaborators around it (settings resolution, key mapping and
//! framebuffer rendering).

pub mod config;
pub mod core;
pub mod input;
pub mod term;
pub mod types;
