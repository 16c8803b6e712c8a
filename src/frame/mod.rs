//! Frame file encoding, decoding and playback.
//!
//! # File format
//!
//! A `.frame` file holds a fixed-size 16x16 animation:
//!
//! ```text
//! Header (16 bytes):
//!   Magic: 87 46 52 41 4D 45 0A (7 bytes)
//!   Version: u8 (1 = raw color, 2 = palette indexed)
//!   Reserved: 4 bytes (zero on write, ignored on read)
//!   Width: u8 (always 16)
//!   Height: u8 (always 16)
//!   Frame count: u8
//!   Loop count: u8
//!
//! Color table (version 2 only):
//!   Size: u8, padding: u8 where padding = (size * 3 + 2) % 16
//!   Entries: size * 3 bytes, RGB
//!   Filler: `padding` zero bytes
//!
//! Frame data (frame_count times):
//!   Delay: u16 big-endian, milliseconds
//!   Pixels: 256 * 3 bytes RGB (v1) or 256 table indices (v2),
//!   row-major, index = x + y * 16
//! ```

mod decoder;
mod encoder;
mod format;
mod player;

pub use decoder::{FrameReader, Frames};
pub use encoder::{encode, write_file};
pub use format::{ColorTable, Header, MAGIC, Version, table_padding};
pub use player::Player;
