//! Block-stream model of a decoded animated image.
//!
//! The extractor consumes a [`ScreenDescriptor`] plus an ordered sequence
//! of [`Block`]s. The set of block kinds is closed, so it is a tagged enum
//! rather than anything reflective; whatever decoder produced the stream
//! has already dealt with the wire format.

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// An ordered list of colors addressed by 8-bit index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette(Vec<Rgb>);

impl Palette {
    /// Empty palette, meaning "no palette present".
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Build a palette from flat `r g b r g b ...` bytes.
    ///
    /// A trailing partial triple is ignored.
    pub fn from_rgb_bytes(bytes: &[u8]) -> Self {
        Self(
            bytes
                .chunks_exact(3)
                .map(|c| Rgb(c[0], c[1], c[2]))
                .collect(),
        )
    }

    /// Look up a color by index.
    pub fn get(&self, index: u8) -> Option<Rgb> {
        self.0.get(index as usize).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no palette data is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Rgb>> for Palette {
    fn from(colors: Vec<Rgb>) -> Self {
        Self(colors)
    }
}

/// Top-level logical screen descriptor of the source image.
#[derive(Debug, Clone)]
pub struct ScreenDescriptor {
    /// Declared canvas width in pixels.
    pub width: u16,
    /// Declared canvas height in pixels.
    pub height: u16,
    /// Index of the background color in the global palette.
    pub background_index: u8,
    /// Global palette, possibly empty.
    pub global_palette: Palette,
}

/// One sub-image to be composited onto the canvas.
#[derive(Debug, Clone)]
pub struct ImageBlock {
    /// Horizontal offset of the sub-image on the canvas.
    pub left: u16,
    /// Vertical offset of the sub-image on the canvas.
    pub top: u16,
    /// Sub-image width in pixels.
    pub width: u16,
    /// Sub-image height in pixels.
    pub height: u16,
    /// Local palette; empty when the sub-image uses the global one.
    pub local_palette: Palette,
    /// Palette indices, row-major, `width * height` entries.
    pub pixel_indices: Vec<u8>,
}

/// Timing and transparency control preceding an image block.
#[derive(Debug, Clone, Copy)]
pub struct GraphicControlBlock {
    /// Display delay for the following image, in centiseconds.
    pub delay_centiseconds: u16,
    /// Whether the block declares a transparent index.
    pub transparent_enabled: bool,
    /// The transparent palette index.
    pub transparent_index: u8,
}

/// Animation loop control.
#[derive(Debug, Clone, Copy)]
pub struct LoopControlBlock {
    /// Number of times the frame sequence repeats; 0 means "forever".
    pub loop_count: u16,
}

/// One block of the source stream.
#[derive(Debug, Clone)]
pub enum Block {
    /// A sub-image to composite.
    Image(ImageBlock),
    /// Delay / transparency update for subsequent images.
    GraphicControl(GraphicControlBlock),
    /// Loop count declaration.
    LoopControl(LoopControlBlock),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_from_flat_bytes() {
        let palette = Palette::from_rgb_bytes(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.get(0), Some(Rgb(1, 2, 3)));
        assert_eq!(palette.get(1), Some(Rgb(4, 5, 6)));
        assert_eq!(palette.get(2), None);
    }

    #[test]
    fn palette_ignores_trailing_partial_triple() {
        let palette = Palette::from_rgb_bytes(&[1, 2, 3, 4, 5]);
        assert_eq!(palette.len(), 1);
    }

    #[test]
    fn empty_palette_means_absent() {
        assert!(Palette::empty().is_empty());
        assert_eq!(Palette::empty().get(0), None);
    }
}
