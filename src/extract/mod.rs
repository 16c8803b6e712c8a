//! Extract module - flattening a source block stream into timed frames.

mod canvas;
mod extractor;

pub use canvas::{CANVAS_DIM, Canvas, PIXEL_COUNT, PixelGrid, transpose};
pub use extractor::{Animation, DEFAULT_DELAY_MS, Frame, extract};
