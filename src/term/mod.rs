//! Terminal rendering layer: a framebuffer, a view that fills it from the
//! engine, and a backend that diffs it onto the screen.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
