//! Turning a source block stream into an ordered frame sequence.

use crate::error::{FrameError, Result};
use crate::source::{Block, ScreenDescriptor};

use super::canvas::{CANVAS_DIM, Canvas, PixelGrid};

/// Delay applied to frames that precede the first graphic-control block.
pub const DEFAULT_DELAY_MS: u16 = 10;

/// One timed pixel-grid snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Display delay in milliseconds.
    pub delay_ms: u16,
    /// Canvas-aligned pixel data.
    pub pixels: PixelGrid,
}

/// A complete extracted animation: the encoder's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    /// Number of times the frame sequence replays, at least 1.
    pub loop_count: u8,
    /// Frames in display order.
    pub frames: Vec<Frame>,
}

/// Flatten a block stream into an [`Animation`].
///
/// Blocks are consumed in stream order against a single [`Canvas`]. Two
/// pieces of state are sticky across blocks: the current delay (starting
/// at [`DEFAULT_DELAY_MS`]) and the current transparent index (starting
/// unset). Only the first loop-control block is honored. Each image block
/// is composited and snapshotted into one frame paired with the current
/// delay; the delay is not reset between frames.
pub fn extract(
    descriptor: &ScreenDescriptor,
    blocks: impl IntoIterator<Item = Block>,
) -> Result<Animation> {
    if descriptor.width != CANVAS_DIM as u16 || descriptor.height != CANVAS_DIM as u16 {
        return Err(FrameError::UnsupportedDimensions {
            width: descriptor.width,
            height: descriptor.height,
        });
    }

    let background = descriptor
        .global_palette
        .get(descriptor.background_index)
        .ok_or(FrameError::IncompleteColorTable)?;

    let mut canvas = Canvas::new(background);
    let mut frames = Vec::new();
    let mut delay_ms = DEFAULT_DELAY_MS;
    let mut transparent: Option<u8> = None;
    let mut loop_count: Option<u8> = None;

    for block in blocks {
        match block {
            Block::LoopControl(control) => {
                if loop_count.is_none() {
                    // 0 means "forever" in the source; the frame format
                    // has no infinite marker, so it becomes a single pass.
                    loop_count = Some(control.loop_count.clamp(1, 255) as u8);
                }
            }
            Block::GraphicControl(control) => {
                delay_ms = (control.delay_centiseconds as u32)
                    .saturating_mul(10)
                    .try_into()
                    .unwrap_or(u16::MAX);
                if control.transparent_enabled || control.transparent_index != 0 {
                    transparent = Some(control.transparent_index);
                }
            }
            Block::Image(image) => {
                canvas.blit(&image, transparent, &descriptor.global_palette)?;
                frames.push(Frame {
                    delay_ms,
                    pixels: canvas.snapshot(),
                });
            }
        }
    }

    Ok(Animation {
        loop_count: loop_count.unwrap_or(1),
        frames,
    })
}
