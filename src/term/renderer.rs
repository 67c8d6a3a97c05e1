//! Terminal backend: flushes framebuffers to the real terminal.
//!
//! Keeps the previous frame and only rewrites cells that changed, in
//! per-row runs; a resize (or an explicit `invalidate`) forces the next
//! draw to repaint everything.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::BlockColor;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint the whole screen. Call on resize.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        let full = match &self.last {
            Some(prev) => prev.width() != fb.width() || prev.height() != fb.height(),
            None => true,
        };
        if full {
            self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut style: Option<CellStyle> = None;
        for y in 0..fb.height() {
            let mut x = 0;
            let mut run_start: Option<u16> = None;
            while x <= fb.width() {
                let changed = x < fb.width() && {
                    let next = fb.get(x, y).unwrap_or_default();
                    match (&self.last, full) {
                        (Some(prev), false) => prev.get(x, y).unwrap_or_default() != next,
                        _ => true,
                    }
                };
                match (run_start, changed) {
                    (None, true) => run_start = Some(x),
                    (Some(start), false) => {
                        self.flush_run(fb, start, x, y, &mut style)?;
                        run_start = None;
                    }
                    _ => {}
                }
                x += 1;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        self.last = Some(fb.clone());
        Ok(())
    }

    fn flush_run(
        &mut self,
        fb: &FrameBuffer,
        start: u16,
        end: u16,
        y: u16,
        style: &mut Option<CellStyle>,
    ) -> Result<()> {
        self.stdout.queue(cursor::MoveTo(start, y))?;
        for x in start..end {
            let cell: Cell = fb.get(x, y).unwrap_or_default();
            if *style != Some(cell.style) {
                self.apply_style(cell.style)?;
                *style = Some(cell.style);
            }
            self.stdout.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn apply_style(&mut self, style: CellStyle) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(SetForegroundColor(to_color(style.fg)))?;
        self.stdout.queue(SetBackgroundColor(to_color(style.bg)))?;
        if style.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.stdout.queue(SetAttribute(Attribute::Dim))?;
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color(color: BlockColor) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}
