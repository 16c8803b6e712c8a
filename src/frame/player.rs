//! Playback engine pacing decoded frames onto a surface.

use std::io::{Read, Seek};
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::extract::CANVAS_DIM;
use crate::surface::PixelSurface;

use super::decoder::FrameReader;

/// Plays frame files against a [`PixelSurface`] on a wall-clock schedule.
///
/// The player owns the pacing state: each frame's draw is scheduled at the
/// previously scheduled instant, and the next one at `now + delay` right
/// after the wait ends. A draw whose instant already passed happens
/// immediately, and the very first frame always does. The deadline
/// survives across [`Player::play`] calls so consecutive files keep a
/// continuous rhythm.
#[derive(Debug)]
pub struct Player {
    deadline: Instant,
}

impl Player {
    pub fn new() -> Self {
        Self {
            deadline: Instant::now(),
        }
    }

    /// Play one file to completion: `loop_count` passes over all frames.
    ///
    /// Frame N+1 is never drawn before frame N's delay has elapsed. The
    /// surface is exclusively owned by the player for the duration of the
    /// call; the reader is rewound after each pass, so the file can be
    /// replayed afterwards.
    pub fn play<R, S>(&mut self, reader: &mut FrameReader<R>, surface: &mut S) -> Result<()>
    where
        R: Read + Seek,
        S: PixelSurface,
    {
        for _ in 0..reader.header().loop_count {
            while let Some(frame) = reader.read_next_frame()? {
                for y in 0..CANVAS_DIM {
                    for x in 0..CANVAS_DIM {
                        surface.set_pixel(x, y, frame.pixels.get(x, y));
                    }
                }

                surface.sleep_until(self.deadline);
                self.deadline = Instant::now() + Duration::from_millis(frame.delay_ms as u64);
                surface.draw()?;
            }
            reader.rewind()?;
        }
        Ok(())
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
