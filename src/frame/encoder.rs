//! Serializing an extracted animation into frame file bytes.

use std::fs;
use std::path::Path;

use crate::error::{FrameError, Result};
use crate::extract::{Animation, CANVAS_DIM, Frame, PIXEL_COUNT};

use super::format::{ColorTable, Header, Version, table_padding};

/// Encode a complete animation into frame file bytes.
///
/// Encoding is all-or-nothing: the file image is assembled in memory and
/// nothing is handed to callers until every frame has been serialized, so
/// a failed encode can never leave a partial file behind. For version 2
/// the color table is built in a first pass over every pixel, and an
/// overflow past 255 distinct colors aborts before any output exists.
pub fn encode(animation: &Animation, version: Version) -> Result<Vec<u8>> {
    let frame_count = animation.frames.len();
    if frame_count == 0 || frame_count > u8::MAX as usize {
        return Err(FrameError::InvalidFrameCount(frame_count));
    }

    let header = Header {
        version,
        width: CANVAS_DIM,
        height: CANVAS_DIM,
        frame_count: frame_count as u8,
        loop_count: animation.loop_count.max(1),
    };

    match version {
        Version::Raw => encode_raw(&header, &animation.frames),
        Version::Indexed => encode_indexed(&header, &animation.frames),
    }
}

/// Encode and write a `.frame` file in one step.
pub fn write_file<P: AsRef<Path>>(
    path: P,
    animation: &Animation,
    version: Version,
) -> Result<()> {
    let bytes = encode(animation, version)?;
    fs::write(path, bytes)?;
    Ok(())
}

fn encode_raw(header: &Header, frames: &[Frame]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(Header::SIZE + frames.len() * (2 + PIXEL_COUNT * 3));
    header.write_to(&mut out)?;

    for frame in frames {
        out.extend_from_slice(&frame.delay_ms.to_be_bytes());
        for &pixel in frame.pixels.pixels() {
            out.extend_from_slice(&[pixel.0, pixel.1, pixel.2]);
        }
    }

    Ok(out)
}

fn encode_indexed(header: &Header, frames: &[Frame]) -> Result<Vec<u8>> {
    // First pass: the table must be complete (and within the 255 entry
    // limit) before a single byte of output exists.
    let mut table = ColorTable::new();
    for frame in frames {
        for &pixel in frame.pixels.pixels() {
            table.intern(pixel)?;
        }
    }

    let padding = table_padding(table.len());
    let mut out = Vec::with_capacity(
        Header::SIZE + 2 + table.len() * 3 + padding + frames.len() * (2 + PIXEL_COUNT),
    );

    header.write_to(&mut out)?;
    out.push(table.len() as u8);
    out.push(padding as u8);
    for &color in table.colors() {
        out.extend_from_slice(&[color.0, color.1, color.2]);
    }
    out.extend(std::iter::repeat_n(0u8, padding));

    for frame in frames {
        out.extend_from_slice(&frame.delay_ms.to_be_bytes());
        for &pixel in frame.pixels.pixels() {
            // Every color was interned in the first pass, so this only
            // hands back existing indices.
            out.push(table.intern(pixel)?);
        }
    }

    Ok(out)
}
