//! Source module - decoded animated-image input for the extractor.

mod block;
mod gif;

pub use self::block::{
    Block, GraphicControlBlock, ImageBlock, LoopControlBlock, Palette, Rgb, ScreenDescriptor,
};
pub use self::gif::{read_gif, read_gif_blocks};
