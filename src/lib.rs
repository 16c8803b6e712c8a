//! Pixelframe - animated GIFs on a 16x16 pixel display.
//!
//! The crate turns animated GIF data into compact `.frame` binaries and
//! plays those binaries back against an abstract pixel surface with
//! correct pacing and looping.
//!
//! # Architecture
//!
//! - `source`: block-stream model of a decoded GIF, plus the `gif` crate
//!   adapter that produces it
//! - `extract`: canvas accumulation and frame extraction
//! - `frame`: the versioned binary codec and the playback engine
//! - `surface`: the pixel sink playback draws on
//!
//! # Example
//!
//! ```rust,no_run
//! use pixelframe::frame::{self, FrameReader, Player, Version};
//! use pixelframe::surface::TerminalSurface;
//! use pixelframe::{extract, source};
//!
//! # fn main() -> pixelframe::Result<()> {
//! // Convert a GIF into a .frame file.
//! let (descriptor, blocks) = source::read_gif("ghost.gif")?;
//! let animation = extract::extract(&descriptor, blocks)?;
//! frame::write_file("ghost.frame", &animation, Version::Indexed)?;
//!
//! // Play it back on the terminal.
//! let mut reader = FrameReader::open("ghost.frame")?;
//! let mut surface = TerminalSurface::new();
//! Player::new().play(&mut reader, &mut surface)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod frame;
pub mod source;
pub mod surface;

// Re-export commonly used types
pub use error::{FrameError, Result};
pub use extract::{Animation, Frame, PixelGrid};
pub use frame::{FrameReader, Player, Version};
pub use source::Rgb;
pub use surface::PixelSurface;
