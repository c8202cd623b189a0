use crate::bmp::{self, BitmapHeader, Compression};
use crate::error::BmpError;

/// Header-level facts about a BMP, read without touching pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub compression: Compression,
    /// Rows are stored top row first (negative height in the file).
    pub top_down: bool,
    /// Rows are stored right to left (negative width in the file).
    pub mirrored: bool,
    /// Whether [`crate::decode`] can produce pixels for this image.
    pub supported: bool,
    /// File size as declared in the header; not checked against the data.
    pub declared_file_size: u32,
    /// Horizontal and vertical resolution in pixels per meter.
    pub pixels_per_meter: (u32, u32),
}

impl ImageInfo {
    /// Probe `data`. Fails only if it is not a BMP at all.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        let header = BitmapHeader::parse(data)?;
        Ok(Self {
            width: header.abs_width(),
            height: header.abs_height(),
            bits_per_pixel: header.bits_per_pixel,
            compression: header.compression_kind(),
            top_down: !header.is_bottom_up(),
            mirrored: header.is_mirrored(),
            supported: bmp::is_supported(&header),
            declared_file_size: header.file_size,
            pixels_per_meter: (header.x_pixels_per_meter, header.y_pixels_per_meter),
        })
    }

    /// Output buffer size in bytes, or 0 on overflow.
    pub fn output_size(&self) -> usize {
        bmp::output_size(self.width, self.height).unwrap_or(0)
    }
}
