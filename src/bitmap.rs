// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes 24-bit uncompressed Windows bitmaps.
//!
//! A bitmap file is a 14-byte file header, a 40-byte info header, and
//! then the pixel rows.  Every field is a little-endian fixed-width
//! integer and the headers are packed, with no alignment padding
//! between fields.  Rows are stored bottom-to-top, each pixel as blue,
//! green, red, and each row padded with zeros to a multiple of four
//! bytes.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use errors::{Error, Result};

/// "BM", read as a little-endian u16.
pub const SIGNATURE: u16 = 0x4D42;
/// Size of the file header.
pub const FILE_HEADER_SIZE: u32 = 14;
/// Size of the BITMAPINFOHEADER.
pub const INFO_HEADER_SIZE: u32 = 40;
/// Where the pixel rows start; there is no color table.
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// Three bytes per pixel.
pub const BITS_PER_PIXEL: u16 = 24;
/// 72 DPI, in the units the format wants.
pub const PIXELS_PER_METER: u32 = 2835;

const BI_RGB: u32 = 0;
const ZEROS: [u8; 3] = [0; 3];

/// Bytes needed to round a row of `width` pixels up to a multiple of 4.
pub fn row_padding(width: usize) -> usize {
    (4 - (width * 3) % 4) % 4
}

/// The length in bytes of one stored row, padding included.
pub fn row_stride(width: usize) -> usize {
    width * 3 + row_padding(width)
}

/// The header fields that vary from image to image.  Everything else
/// is fixed by the format.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    /// Size of the whole file, headers included.
    pub file_size: u32,
    /// Offset of the first pixel row.
    pub pixel_data_offset: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Always 24.
    pub bits_per_pixel: u16,
    /// Size of the padded pixel rows.
    pub image_size: u32,
}

impl BitmapHeader {
    /// The header for a `width` by `height` image.
    pub fn new(width: usize, height: usize) -> BitmapHeader {
        let image_size = (row_stride(width) * height) as u32;
        BitmapHeader {
            file_size: PIXEL_DATA_OFFSET + image_size,
            pixel_data_offset: PIXEL_DATA_OFFSET,
            width: width as u32,
            height: height as u32,
            bits_per_pixel: BITS_PER_PIXEL,
            image_size,
        }
    }

    /// Serializes both headers, 54 bytes in all.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(PIXEL_DATA_OFFSET as usize);
        // BITMAPFILEHEADER
        bytes.extend_from_slice(&SIGNATURE.to_le_bytes());
        bytes.extend_from_slice(&self.file_size.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_data_offset.to_le_bytes());
        // BITMAPINFOHEADER
        bytes.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
        bytes.extend_from_slice(&self.width.to_le_bytes());
        bytes.extend_from_slice(&self.height.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        bytes.extend_from_slice(&BI_RGB.to_le_bytes());
        bytes.extend_from_slice(&self.image_size.to_le_bytes());
        bytes.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
        bytes.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes
    }

    /// Reads the headers back out of the first 54 bytes of a file.
    /// Only the 24-bit uncompressed layout this module writes is
    /// accepted.
    pub fn parse(bytes: &[u8]) -> Result<BitmapHeader> {
        if bytes.len() < PIXEL_DATA_OFFSET as usize {
            return Err(Error::Header(format!(
                "{} bytes is too short for the headers",
                bytes.len()
            )));
        }
        if u16_at(bytes, 0) != SIGNATURE {
            return Err(Error::Header("missing 'BM' signature".to_string()));
        }
        if u32_at(bytes, 14) != INFO_HEADER_SIZE {
            return Err(Error::Header(format!(
                "info header is {} bytes, expected {}",
                u32_at(bytes, 14),
                INFO_HEADER_SIZE
            )));
        }
        if u16_at(bytes, 26) != 1 {
            return Err(Error::Header("planes must be 1".to_string()));
        }
        let bits_per_pixel = u16_at(bytes, 28);
        if bits_per_pixel != BITS_PER_PIXEL {
            return Err(Error::Header(format!("{} bits per pixel", bits_per_pixel)));
        }
        if u32_at(bytes, 30) != BI_RGB {
            return Err(Error::Header("compressed".to_string()));
        }
        Ok(BitmapHeader {
            file_size: u32_at(bytes, 2),
            pixel_data_offset: u32_at(bytes, 10),
            width: u32_at(bytes, 18),
            height: u32_at(bytes, 22),
            bits_per_pixel,
            image_size: u32_at(bytes, 34),
        })
    }
}

fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// A finished image: headers plus the rows the workers filled in.
#[derive(Debug)]
pub struct Bitmap {
    header: BitmapHeader,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Wraps a buffer of `height` rows, each `row_stride(width)` bytes
    /// of BGR triples followed by padding.  Returns `None` if the
    /// buffer is the wrong size.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Option<Bitmap> {
        if pixels.len() != row_stride(width) * height {
            return None;
        }
        Some(Bitmap::from_rows(width, height, pixels))
    }

    pub(crate) fn from_rows(width: usize, height: usize, pixels: Vec<u8>) -> Bitmap {
        debug_assert_eq!(pixels.len(), row_stride(width) * height);
        Bitmap {
            header: BitmapHeader::new(width, height),
            width,
            height,
            pixels,
        }
    }

    /// The headers this bitmap will be written with.
    pub fn header(&self) -> &BitmapHeader {
        &self.header
    }

    /// The stored rows, padding included, bottom row first.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn write_bytes<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.header.to_bytes())?;
        let padding = row_padding(self.width);
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        for row in self.pixels.chunks(row_stride(self.width)) {
            out.write_all(&row[..self.width * 3])?;
            out.write_all(&ZEROS[..padding])?;
        }
        Ok(())
    }

    /// Writes the complete file to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        self.write_bytes(out)?;
        Ok(())
    }

    /// Creates (or truncates) the file at `path` and writes the bitmap
    /// into it.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let wrap = |err: io::Error| Error::Io {
            path: path.display().to_string(),
            err,
        };
        let file = File::create(path).map_err(&wrap)?;
        let mut out = BufWriter::new(file);
        self.write_bytes(&mut out).map_err(&wrap)?;
        out.flush().map_err(&wrap)?;
        info!(
            "Wrote {}x{} bitmap ({} bytes) to {}",
            self.width,
            self.height,
            self.header.file_size,
            path.display()
        );
        Ok(())
    }
}
