//! Reading frame files back into replayable frames.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{FrameError, Result};
use crate::extract::{CANVAS_DIM, Frame, PIXEL_COUNT, PixelGrid};
use crate::source::Rgb;

use super::format::{ColorTable, Header, Version};

/// Cursor-style reader over one frame file.
///
/// The header (and, for version 2, the color table) is read and validated
/// up front; [`FrameReader::read_next_frame`] then yields frames until the
/// pass is exhausted, and [`FrameReader::rewind`] moves the cursor back to
/// the first frame for the next loop iteration.
///
/// Usage:
/// ```ignore
/// let mut reader = FrameReader::open("animation.frame")?;
/// while let Some(frame) = reader.read_next_frame()? {
///     // Show frame...
/// }
/// reader.rewind()?;
/// ```
#[derive(Debug)]
pub struct FrameReader<R> {
    reader: R,
    header: Header,
    /// Empty for version 1 files.
    color_table: ColorTable,
    /// Byte offset of the first frame: past the header for version 1,
    /// past the color table and its padding for version 2.
    first_frame_offset: u64,
    /// Frames read in the current pass.
    cursor: u8,
}

impl FrameReader<BufReader<File>> {
    /// Open a frame file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(BufReader::new(File::open(path)?))
    }
}

impl<R: Read + Seek> FrameReader<R> {
    /// Parse the header and color table from a byte source at offset 0.
    pub fn new(mut reader: R) -> Result<Self> {
        let header = Header::read_from(&mut reader)?;
        if header.width != CANVAS_DIM || header.height != CANVAS_DIM {
            return Err(FrameError::UnsupportedDimensions {
                width: header.width as u16,
                height: header.height as u16,
            });
        }

        let color_table = match header.version {
            Version::Raw => ColorTable::default(),
            Version::Indexed => {
                let mut descriptor = [0u8; 2];
                reader.read_exact(&mut descriptor)?;
                let (size, padding) = (descriptor[0] as usize, descriptor[1]);

                let mut entries = vec![0u8; size * 3];
                reader.read_exact(&mut entries)?;
                reader.seek(SeekFrom::Current(padding as i64))?;

                ColorTable::from_colors(
                    entries
                        .chunks_exact(3)
                        .map(|c| Rgb(c[0], c[1], c[2]))
                        .collect(),
                )
            }
        };

        let first_frame_offset = reader.stream_position()?;

        Ok(Self {
            reader,
            header,
            color_table,
            first_frame_offset,
            cursor: 0,
        })
    }

    /// File header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Decoded color table; empty for version 1 files.
    pub fn color_table(&self) -> &ColorTable {
        &self.color_table
    }

    /// Read the next frame of the current pass, or `None` once
    /// `frame_count` frames have been read.
    pub fn read_next_frame(&mut self) -> Result<Option<Frame>> {
        if self.cursor >= self.header.frame_count {
            return Ok(None);
        }

        let mut delay = [0u8; 2];
        self.reader.read_exact(&mut delay)?;
        let delay_ms = u16::from_be_bytes(delay);

        let mut pixels = PixelGrid::default();
        match self.header.version {
            Version::Raw => {
                let mut buf = [0u8; PIXEL_COUNT * 3];
                self.reader.read_exact(&mut buf)?;
                for (index, triple) in buf.chunks_exact(3).enumerate() {
                    pixels.set_index(index, Rgb(triple[0], triple[1], triple[2]));
                }
            }
            Version::Indexed => {
                let mut buf = [0u8; PIXEL_COUNT];
                self.reader.read_exact(&mut buf)?;
                for (index, &table_index) in buf.iter().enumerate() {
                    let color = self
                        .color_table
                        .get(table_index)
                        .ok_or(FrameError::IncompleteColorTable)?;
                    pixels.set_index(index, color);
                }
            }
        }

        self.cursor += 1;
        Ok(Some(Frame { delay_ms, pixels }))
    }

    /// Reset the cursor to the first frame for another pass.
    pub fn rewind(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(self.first_frame_offset))?;
        self.cursor = 0;
        Ok(())
    }

    /// Iterator draining the remainder of the current pass.
    pub fn frames(&mut self) -> Frames<'_, R> {
        Frames { reader: self }
    }
}

/// Iterator over the frames of one pass.
pub struct Frames<'a, R> {
    reader: &'a mut FrameReader<R>,
}

impl<'a, R: Read + Seek> Iterator for Frames<'a, R> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_next_frame().transpose()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.reader.header.frame_count - self.reader.cursor) as usize;
        (remaining, Some(remaining))
    }
}

impl<'a, R: Read + Seek> ExactSizeIterator for Frames<'a, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Animation;
    use crate::frame::encoder::{encode, write_file};
    use std::io::Cursor;

    fn sample_animation() -> Animation {
        let mut second = PixelGrid::filled(Rgb(0, 0, 255));
        second.set(3, 4, Rgb(10, 20, 30));
        Animation {
            loop_count: 2,
            frames: vec![
                Frame {
                    delay_ms: 100,
                    pixels: PixelGrid::filled(Rgb(255, 0, 0)),
                },
                Frame {
                    delay_ms: 250,
                    pixels: second,
                },
            ],
        }
    }

    fn roundtrip(version: Version) -> (Animation, Animation) {
        let original = sample_animation();
        let bytes = encode(&original, version).unwrap();

        let mut reader = FrameReader::new(Cursor::new(bytes)).unwrap();
        let frames = reader.frames().collect::<Result<Vec<_>>>().unwrap();
        let decoded = Animation {
            loop_count: reader.header().loop_count,
            frames,
        };
        (original, decoded)
    }

    #[test]
    fn v1_roundtrip_is_exact() {
        let (original, decoded) = roundtrip(Version::Raw);
        assert_eq!(original, decoded);
    }

    #[test]
    fn v2_roundtrip_is_exact() {
        let (original, decoded) = roundtrip(Version::Indexed);
        assert_eq!(original, decoded);
    }

    #[test]
    fn header_fields_roundtrip() {
        let bytes = encode(&sample_animation(), Version::Raw).unwrap();
        let reader = FrameReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.header().frame_count, 2);
        assert_eq!(reader.header().loop_count, 2);
        assert_eq!(reader.header().width, 16);
        assert_eq!(reader.header().height, 16);
    }

    #[test]
    fn pass_is_exhausted_after_frame_count_reads() {
        let bytes = encode(&sample_animation(), Version::Raw).unwrap();
        let mut reader = FrameReader::new(Cursor::new(bytes)).unwrap();

        assert!(reader.read_next_frame().unwrap().is_some());
        assert!(reader.read_next_frame().unwrap().is_some());
        assert!(reader.read_next_frame().unwrap().is_none());
        assert!(reader.read_next_frame().unwrap().is_none());
    }

    #[test]
    fn rewind_restarts_the_pass() {
        for version in [Version::Raw, Version::Indexed] {
            let bytes = encode(&sample_animation(), version).unwrap();
            let mut reader = FrameReader::new(Cursor::new(bytes)).unwrap();

            let first = reader.read_next_frame().unwrap().unwrap();
            while reader.read_next_frame().unwrap().is_some() {}

            reader.rewind().unwrap();
            let again = reader.read_next_frame().unwrap().unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn garbage_is_rejected_with_invalid_signature() {
        let err = FrameReader::new(Cursor::new(vec![0u8; 64])).unwrap_err();
        assert!(matches!(err, FrameError::InvalidSignature));
    }

    #[test]
    fn version_3_is_rejected() {
        let mut bytes = encode(&sample_animation(), Version::Raw).unwrap();
        bytes[7] = 3;
        let err = FrameReader::new(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, FrameError::UnsupportedVersion(3)));
    }

    #[test]
    fn non_16x16_file_is_rejected() {
        let mut bytes = encode(&sample_animation(), Version::Raw).unwrap();
        bytes[12] = 8;
        let err = FrameReader::new(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            FrameError::UnsupportedDimensions { width: 8, .. }
        ));
    }

    #[test]
    fn v2_frame_with_dangling_index_is_rejected() {
        let animation = Animation {
            loop_count: 1,
            frames: vec![Frame {
                delay_ms: 0,
                pixels: PixelGrid::filled(Rgb(1, 2, 3)),
            }],
        };
        let mut bytes = encode(&animation, Version::Indexed).unwrap();
        // Point one pixel past the single table entry.
        let last = bytes.len() - 1;
        bytes[last] = 200;

        let mut reader = FrameReader::new(Cursor::new(bytes)).unwrap();
        let err = reader.read_next_frame().unwrap_err();
        assert!(matches!(err, FrameError::IncompleteColorTable));
    }

    #[test]
    fn truncated_file_surfaces_an_io_error() {
        let mut bytes = encode(&sample_animation(), Version::Raw).unwrap();
        bytes.truncate(bytes.len() - 100);

        let mut reader = FrameReader::new(Cursor::new(bytes)).unwrap();
        assert!(reader.read_next_frame().unwrap().is_some());
        let err = reader.read_next_frame().unwrap_err();
        assert!(matches!(err, FrameError::Io(_)));
    }

    #[test]
    fn open_reads_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.frame");
        write_file(&path, &sample_animation(), Version::Indexed).unwrap();

        let mut reader = FrameReader::open(&path).unwrap();
        assert_eq!(reader.header().frame_count, 2);
        let frame = reader.read_next_frame().unwrap().unwrap();
        assert_eq!(frame.pixels.get(0, 0), Rgb(255, 0, 0));
    }
}
