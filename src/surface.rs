//! Drawing surface abstraction for playback.

use std::io::{self, Write};
use std::thread;
use std::time::Instant;

use crate::extract::CANVAS_DIM;
use crate::source::Rgb;

/// A 16x16 pixel sink driven by the playback engine.
///
/// The engine writes every pixel of a frame, waits out the frame delay,
/// then calls [`PixelSurface::draw`] to make the staged pixels visible.
/// Implementations decide what "visible" means: a terminal, a window, an
/// LED matrix behind some bus.
pub trait PixelSurface {
    /// Stage a pixel; not visible until the next [`PixelSurface::draw`].
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb);

    /// Make all staged pixels visible.
    fn draw(&mut self) -> io::Result<()>;

    /// Block until `deadline`. Returns immediately when it already passed.
    fn sleep_until(&mut self, deadline: Instant) {
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
    }
}

/// Reference surface rendering to a terminal with 24-bit ANSI colors.
///
/// Each pixel becomes two background-colored spaces so the output is
/// roughly square. Every draw repaints from the home position, so the
/// animation plays in place.
pub struct TerminalSurface<W: Write = io::Stdout> {
    grid: [[Rgb; CANVAS_DIM as usize]; CANVAS_DIM as usize],
    out: W,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Surface writing to an arbitrary output.
    pub fn with_writer(out: W) -> Self {
        Self {
            grid: [[Rgb::default(); CANVAS_DIM as usize]; CANVAS_DIM as usize],
            out,
        }
    }

    fn render(&self) -> String {
        let mut text = String::from("\x1b[H");
        for row in &self.grid {
            for &Rgb(r, g, b) in row {
                text.push_str(&format!("\x1b[48;2;{r};{g};{b}m  "));
            }
            text.push_str("\x1b[0m\n");
        }
        text
    }
}

impl<W: Write> PixelSurface for TerminalSurface<W> {
    fn set_pixel(&mut self, x: u8, y: u8, color: Rgb) {
        self.grid[y as usize][x as usize] = color;
    }

    fn draw(&mut self) -> io::Result<()> {
        self.out.write_all(self.render().as_bytes())?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_emits_one_colored_cell_per_pixel() {
        let mut surface = TerminalSurface::with_writer(Vec::new());
        surface.set_pixel(0, 0, Rgb(255, 10, 0));
        surface.draw().unwrap();

        let text = String::from_utf8(surface.out.clone()).unwrap();
        assert!(text.starts_with("\x1b[H"));
        assert!(text.contains("\x1b[48;2;255;10;0m  "));
        assert_eq!(text.matches("48;2;").count(), 256);
        assert_eq!(text.lines().count(), 16);
    }

    #[test]
    fn sleep_until_returns_for_past_deadlines() {
        struct Noop;
        impl PixelSurface for Noop {
            fn set_pixel(&mut self, _x: u8, _y: u8, _color: Rgb) {}
            fn draw(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        // Must not block: the deadline is already behind us.
        Noop.sleep_until(Instant::now());
    }
}
