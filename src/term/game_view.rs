//! GameView: maps engine state into a framebuffer.
//!
//! Pure (no I/O), so layout and visibility rules are unit-testable. The
//! regions mirror the engine's invalidation signals: board, upcoming
//! preview, score, rows and the state prompt.

use crate::core::Game;
use crate::term::fb::{CellStyle, FrameBuffer};
use crate::types::{BlockColor, GamePhase};

/// Terminal dimensions the view may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub struct GameView {
    /// Terminal columns per board cell; 2 compensates for the glyph
    /// aspect ratio.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

const BACKGROUND: BlockColor = BlockColor::new(0, 0, 0);

impl GameView {
    /// Render the whole scene: info panel on the left, framed board on
    /// the right.
    pub fn render(&self, game: &Game, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_w = game.board().width() as u16;
        let board_h = game.board().height() as u16;
        let preview = game.config().upcoming_preview_size as u16;

        let frame_w = board_w * self.cell_w + 2;
        let frame_h = board_h + 2;
        let panel_w = (preview * self.cell_w + 2).max(22);
        let total_w = panel_w + 1 + frame_w;

        let origin_x = viewport.width.saturating_sub(total_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;
        let board_x = origin_x + panel_w + 1;

        self.draw_panel(&mut fb, game, origin_x, origin_y, preview);
        self.draw_board(&mut fb, game, board_x, origin_y, frame_w, frame_h);
        fb
    }

    fn draw_board(
        &self,
        fb: &mut FrameBuffer,
        game: &Game,
        x0: u16,
        y0: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        draw_frame(fb, x0, y0, frame_w, frame_h, border_style());

        let empty = CellStyle {
            fg: BlockColor::new(60, 60, 70),
            bg: BACKGROUND,
            bold: false,
            dim: true,
        };
        for y in 0..game.board().height() {
            for x in 0..game.board().width() {
                match game.board().get(x, y) {
                    Some(color) => self.paint_cell(fb, x0, y0, x, y, color),
                    None => fb.put_char(
                        x0 + 1 + (x as u16) * self.cell_w,
                        y0 + 1 + y as u16,
                        '·',
                        empty,
                    ),
                }
            }
        }

        // The falling piece is only shown mid-game.
        if game.phase() == GamePhase::Playing {
            let color = game.current().color();
            for (x, y) in game.current().cells() {
                self.paint_cell(fb, x0, y0, x, y, color);
            }
        }

        if game.phase() == GamePhase::Paused {
            let text = " PAUSED ";
            let tx = x0 + frame_w.saturating_sub(text.len() as u16) / 2;
            let ty = y0 + frame_h / 2;
            let style = CellStyle {
                fg: BlockColor::new(255, 255, 255),
                bg: BACKGROUND,
                bold: true,
                dim: false,
            };
            fb.put_str(tx, ty, text, style);
        }
    }

    fn paint_cell(&self, fb: &mut FrameBuffer, x0: u16, y0: u16, x: i32, y: i32, color: BlockColor) {
        let style = CellStyle {
            fg: BACKGROUND,
            bg: color,
            bold: false,
            dim: false,
        };
        let cx = x0 + 1 + (x as u16) * self.cell_w;
        let cy = y0 + 1 + y as u16;
        for dx in 0..self.cell_w {
            fb.put_char(cx + dx, cy, ' ', style);
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, game: &Game, x0: u16, y0: u16, preview: u16) {
        let label = label_style();
        let text = text_style();

        fb.put_str(x0, y0, "UPCOMING", label);
        let box_w = preview * self.cell_w + 2;
        let box_h = preview + 2;
        draw_frame(fb, x0, y0 + 1, box_w, box_h, border_style());

        if game.phase() == GamePhase::Playing {
            let piece = game.upcoming();
            let size = u16::from(piece.shape().size);
            let pad = preview.saturating_sub(size) / 2;
            let color = piece.color();
            for (col, row) in piece.shape().occupied_cells(piece.orientation()) {
                let cx = x0 + 1 + (pad + col as u16) * self.cell_w;
                let cy = y0 + 2 + pad + row as u16;
                let style = CellStyle {
                    fg: BACKGROUND,
                    bg: color,
                    bold: false,
                    dim: false,
                };
                for dx in 0..self.cell_w {
                    fb.put_char(cx + dx, cy, ' ', style);
                }
            }
        }

        let mut y = y0 + 1 + box_h + 1;
        fb.put_str(x0, y, &format!("Score  {}", game.score()), text);
        y += 1;
        fb.put_str(x0, y, &format!("Rows   {}", game.rows()), text);
        y += 2;

        match game.phase() {
            GamePhase::Cancelled => {
                fb.put_str(x0, y, "press Enter to start", text);
                if game.clutter_enabled() {
                    let percent = (game.clutter_level() * 100.0).round() as u32;
                    fb.put_str(x0, y + 1, &format!("clutter {percent}%"), label);
                }
            }
            GamePhase::Paused => fb.put_str(x0, y, "press Enter to continue", text),
            GamePhase::Playing => {}
        }
    }
}

fn border_style() -> CellStyle {
    CellStyle {
        fg: BlockColor::new(200, 200, 200),
        bg: BACKGROUND,
        bold: false,
        dim: false,
    }
}

fn label_style() -> CellStyle {
    CellStyle {
        fg: BlockColor::new(150, 150, 160),
        bg: BACKGROUND,
        bold: false,
        dim: true,
    }
}

fn text_style() -> CellStyle {
    CellStyle {
        fg: BlockColor::new(220, 220, 220),
        bg: BACKGROUND,
        bold: false,
        dim: false,
    }
}

fn draw_frame(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}
