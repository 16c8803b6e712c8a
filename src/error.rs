//! Error types shared by extraction, encoding, decoding and playback.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FrameError>;

/// Errors that can occur while converting or playing frame files.
///
/// Every variant is fatal for the file being processed, never for the
/// process: batch callers log the error and move on to the next file.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The file does not start with the frame magic signature.
    #[error("not a frame file: bad signature")]
    InvalidSignature,

    /// The version byte is not one of the supported layouts.
    #[error("unsupported frame file version {0}")]
    UnsupportedVersion(u8),

    /// The source or file dimensions are not the 16x16 canvas.
    #[error("unsupported dimensions {width}x{height}, only 16x16 is supported")]
    UnsupportedDimensions { width: u16, height: u16 },

    /// A pixel referenced a color that no palette can resolve.
    #[error("color table is incomplete")]
    IncompleteColorTable,

    /// Version 2 encoding would need more than 255 distinct colors.
    #[error("palette overflow: {0} distinct colors exceed the 255 entry limit")]
    PaletteOverflow(usize),

    /// The frame sequence is empty or longer than 255 frames.
    #[error("invalid frame count {0}, must be 1..=255")]
    InvalidFrameCount(usize),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The source GIF could not be decoded.
    #[error("gif decode error: {0}")]
    Decode(#[from] gif::DecodingError),
}
