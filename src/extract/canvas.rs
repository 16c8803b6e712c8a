//! Canvas accumulation for frame extraction.

use crate::error::{FrameError, Result};
use crate::source::{ImageBlock, Palette, Rgb};

/// Width and height of the supported canvas, in pixels.
pub const CANVAS_DIM: u8 = 16;

/// Total pixel count of one frame.
pub const PIXEL_COUNT: usize = CANVAS_DIM as usize * CANVAS_DIM as usize;

/// A full 16x16 grid of RGB pixels.
///
/// Pixels are stored row-major: `index = x + y * 16`. That order is also
/// the serialization order of frame files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid([Rgb; PIXEL_COUNT]);

impl PixelGrid {
    /// Grid with every pixel set to `color`.
    pub fn filled(color: Rgb) -> Self {
        Self([color; PIXEL_COUNT])
    }

    /// Flat index of pixel (x, y).
    #[inline]
    pub fn index(x: u8, y: u8) -> usize {
        x as usize + y as usize * CANVAS_DIM as usize
    }

    /// Color at (x, y).
    pub fn get(&self, x: u8, y: u8) -> Rgb {
        self.0[Self::index(x, y)]
    }

    /// Set the color at (x, y).
    pub fn set(&mut self, x: u8, y: u8, color: Rgb) {
        self.0[Self::index(x, y)] = color;
    }

    /// Set the color at a flat canvas index.
    pub fn set_index(&mut self, index: usize, color: Rgb) {
        self.0[index] = color;
    }

    /// All pixels in serialization order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.0
    }
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::filled(Rgb::default())
    }
}

/// Map a sub-image pixel index to its absolute canvas index.
///
/// Sub-images may be smaller than the canvas and offset by (left, top);
/// not all of them start at (0, 0).
pub fn transpose(index: usize, image: &ImageBlock) -> usize {
    let row = index / image.width as usize;
    (index % image.width as usize + image.left as usize)
        + (row + image.top as usize) * CANVAS_DIM as usize
}

/// Persistent pixel buffer shared across one extraction pass.
///
/// Sub-images accumulate onto the canvas in stream order; transparent
/// pixels leave the previous contents in place. A snapshot is taken after
/// each completed sub-image so later mutation cannot affect frames that
/// were already emitted.
#[derive(Debug, Clone)]
pub struct Canvas {
    grid: PixelGrid,
}

impl Canvas {
    /// Canvas seeded with the source background color.
    pub fn new(background: Rgb) -> Self {
        Self {
            grid: PixelGrid::filled(background),
        }
    }

    /// Composite one sub-image onto the canvas.
    ///
    /// Pixels equal to `transparent` are skipped. Colors resolve through
    /// the sub-image's local palette when present, else through the global
    /// palette; a pixel neither can resolve is an incomplete color table.
    pub fn blit(
        &mut self,
        image: &ImageBlock,
        transparent: Option<u8>,
        global_palette: &Palette,
    ) -> Result<()> {
        let dim = CANVAS_DIM as u32;
        if image.left as u32 + image.width as u32 > dim
            || image.top as u32 + image.height as u32 > dim
        {
            return Err(FrameError::UnsupportedDimensions {
                width: image.width,
                height: image.height,
            });
        }

        let expected = image.width as usize * image.height as usize;
        for (index, &pixel) in image.pixel_indices.iter().take(expected).enumerate() {
            if transparent == Some(pixel) {
                continue;
            }

            let color = if !image.local_palette.is_empty() {
                image.local_palette.get(pixel)
            } else if !global_palette.is_empty() {
                global_palette.get(pixel)
            } else {
                None
            };

            let color = color.ok_or(FrameError::IncompleteColorTable)?;
            self.grid.set_index(transpose(index, image), color);
        }

        Ok(())
    }

    /// Copy of the current canvas contents.
    pub fn snapshot(&self) -> PixelGrid {
        self.grid.clone()
    }
}
