//! Adapter from the `gif` crate's decoder to the block-stream model.
//!
//! This is deliberately thin: every policy about delays, transparency,
//! palettes and looping lives in the extractor. The adapter only reshapes
//! what the decoder already produced.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use gif::{ColorOutput, DecodeOptions, Repeat};

use crate::error::Result;

use super::block::{
    Block, GraphicControlBlock, ImageBlock, LoopControlBlock, Palette, ScreenDescriptor,
};

/// Decode a GIF byte stream into a screen descriptor plus block stream.
///
/// Each decoded GIF frame becomes an image block, preceded by a
/// graphic-control block when the frame carries timing or transparency
/// data; a loop-control block is emitted first when the source declares a
/// repeat count.
pub fn read_gif_blocks<R: Read>(input: R) -> Result<(ScreenDescriptor, Vec<Block>)> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::Indexed);
    let mut decoder = options.read_info(input)?;

    let descriptor = ScreenDescriptor {
        width: decoder.width(),
        height: decoder.height(),
        background_index: decoder.bg_color().unwrap_or(0) as u8,
        global_palette: decoder
            .global_palette()
            .map(Palette::from_rgb_bytes)
            .unwrap_or_default(),
    };

    let mut blocks = Vec::new();
    match decoder.repeat() {
        // 0 means "forever" on the wire.
        Repeat::Infinite => blocks.push(Block::LoopControl(LoopControlBlock { loop_count: 0 })),
        // Finite(0) is the decoder's default when no loop extension is
        // present at all.
        Repeat::Finite(0) => {}
        Repeat::Finite(count) => {
            blocks.push(Block::LoopControl(LoopControlBlock { loop_count: count }));
        }
    }

    while let Some(frame) = decoder.read_next_frame()? {
        // The decoder reports delay 0 and no transparency for frames that
        // carried no graphic-control data; such frames get no control
        // block, leaving the extractor's sticky state untouched.
        if frame.delay != 0 || frame.transparent.is_some() {
            blocks.push(Block::GraphicControl(GraphicControlBlock {
                delay_centiseconds: frame.delay,
                transparent_enabled: frame.transparent.is_some(),
                transparent_index: frame.transparent.unwrap_or(0),
            }));
        }
        blocks.push(Block::Image(ImageBlock {
            left: frame.left,
            top: frame.top,
            width: frame.width,
            height: frame.height,
            local_palette: frame
                .palette
                .as_deref()
                .map(Palette::from_rgb_bytes)
                .unwrap_or_default(),
            pixel_indices: frame.buffer.to_vec(),
        }));
    }

    Ok((descriptor, blocks))
}

/// Decode a GIF file from disk.
pub fn read_gif<P: AsRef<Path>>(path: P) -> Result<(ScreenDescriptor, Vec<Block>)> {
    read_gif_blocks(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::source::Rgb;
    use std::io::Cursor;

    /// Encode a 16x16 two-frame GIF in memory with the gif crate.
    fn sample_gif() -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let global = [
                0, 0, 0, // background
                255, 0, 0, // red
                0, 255, 0, // green
                0, 0, 255, // blue
            ];
            let mut encoder = gif::Encoder::new(&mut bytes, 16, 16, &global).unwrap();
            encoder.set_repeat(Repeat::Finite(3)).unwrap();

            let mut red = gif::Frame::from_indexed_pixels(16, 16, vec![1u8; 256], None);
            red.delay = 5;
            encoder.write_frame(&red).unwrap();

            let mut green = gif::Frame::from_indexed_pixels(16, 16, vec![2u8; 256], None);
            green.delay = 20;
            encoder.write_frame(&green).unwrap();
        }
        bytes
    }

    #[test]
    fn adapter_reshapes_frames_into_blocks() {
        let (descriptor, blocks) = read_gif_blocks(Cursor::new(sample_gif())).unwrap();

        assert_eq!(descriptor.width, 16);
        assert_eq!(descriptor.height, 16);
        assert_eq!(descriptor.global_palette.get(1), Some(Rgb(255, 0, 0)));

        assert!(matches!(
            blocks[0],
            Block::LoopControl(LoopControlBlock { loop_count: 3 })
        ));
        // One control + one image block per GIF frame.
        assert_eq!(blocks.len(), 5);
        assert!(matches!(blocks[1], Block::GraphicControl(_)));
        assert!(matches!(blocks[2], Block::Image(_)));
    }

    #[test]
    fn decoded_gif_extracts_end_to_end() {
        let (descriptor, blocks) = read_gif_blocks(Cursor::new(sample_gif())).unwrap();
        let animation = extract(&descriptor, blocks).unwrap();

        assert_eq!(animation.loop_count, 3);
        assert_eq!(animation.frames.len(), 2);
        assert_eq!(animation.frames[0].delay_ms, 50);
        assert_eq!(animation.frames[1].delay_ms, 200);
        assert_eq!(animation.frames[0].pixels.get(7, 7), Rgb(255, 0, 0));
        assert_eq!(animation.frames[1].pixels.get(7, 7), Rgb(0, 255, 0));
    }

    #[test]
    fn unreadable_input_is_a_decode_error() {
        let err = read_gif_blocks(Cursor::new(b"not a gif".to_vec())).unwrap_err();
        assert!(matches!(err, crate::error::FrameError::Decode(_)));
    }
}
