//! BMP file header and DIB header parsing.

use super::cursor::Cursor;
use crate::error::BmpError;

/// Size of the file header plus a BITMAPINFOHEADER; anything shorter cannot be a BMP.
pub(crate) const MIN_HEADER_LEN: usize = 54;

const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_LEN: u32 = 40;

/// Compression field of the DIB header.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Compression {
    /// BI_RGB: uncompressed.
    Rgb,
    /// BI_RLE8 (not decoded).
    Rle8,
    /// BI_RLE4 (not decoded).
    Rle4,
    /// BI_BITFIELDS: channels packed in a 32-bit word, located by masks.
    Bitfields,
    Other(u32),
}

impl Compression {
    pub(crate) fn from_u32(num: u32) -> Self {
        match num {
            0 => Self::Rgb,
            1 => Self::Rle8,
            2 => Self::Rle4,
            3 => Self::Bitfields,
            other => Self::Other(other),
        }
    }
}

/// Red, green, blue and alpha masks from an extended DIB header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ChannelMasks {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
}

#[derive(Clone, Debug)]
pub(crate) struct BitmapHeader {
    pub file_size: u32,
    pub pixel_offset: u32,
    pub dib_header_len: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub x_pixels_per_meter: u32,
    pub y_pixels_per_meter: u32,
    pub masks: ChannelMasks,
}

fn has_signature(data: &[u8]) -> bool {
    data.len() >= MIN_HEADER_LEN && data.starts_with(b"BM")
}

/// Exact number of output bytes needed to decode `data`, from the header alone.
///
/// Returns 0 when `data` is not a BMP (shorter than 54 bytes, or no `BM`
/// signature), when the size does not fit in `usize`, and for images with a
/// zero width or height.
pub fn required_output_size(data: &[u8]) -> usize {
    if !has_signature(data) {
        return 0;
    }
    let mut c = Cursor::at(data, 18);
    let width = c.read_i32_le().unsigned_abs();
    let height = c.read_i32_le().unsigned_abs();
    output_size(width, height).unwrap_or(0)
}

/// `width * height * 4`, or `None` on overflow.
pub(crate) fn output_size(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(4))
}

impl BitmapHeader {
    /// Parse both headers. Only the length and signature are validated here.
    pub(crate) fn parse(data: &[u8]) -> Result<Self, BmpError> {
        if data.len() < MIN_HEADER_LEN {
            log::debug!("BMP rejected: {} bytes is shorter than a header", data.len());
            return Err(BmpError::InvalidImage("shorter than a BMP header"));
        }
        if !has_signature(data) {
            log::debug!("BMP rejected: missing BM signature");
            return Err(BmpError::InvalidImage("missing BM signature"));
        }

        let mut c = Cursor::at(data, 2);
        let file_size = c.read_u32_le();
        // Two reserved u16 fields
        c.skip(4);
        let pixel_offset = c.read_u32_le();
        let dib_header_len = c.read_u32_le();
        let width = c.read_i32_le();
        let height = c.read_i32_le();
        let planes = c.read_u16_le();
        let bits_per_pixel = c.read_u16_le();
        let compression = c.read_u32_le();
        let _image_size = c.read_u32_le();
        let x_pixels_per_meter = c.read_u32_le();
        let y_pixels_per_meter = c.read_u32_le();
        let _colors_used = c.read_u32_le();
        let _important_colors = c.read_u32_le();

        let masks = if dib_header_len > INFO_HEADER_LEN {
            ChannelMasks {
                red: c.read_u32_le(),
                green: c.read_u32_le(),
                blue: c.read_u32_le(),
                alpha: c.read_u32_le(),
            }
        } else {
            ChannelMasks::default()
        };

        log::trace!("BMP width: {width}, height: {height}");
        log::trace!("BMP bit depth: {bits_per_pixel}, planes: {planes}");
        log::trace!(
            "BMP compression: {:?}, DIB header: {dib_header_len} bytes, pixel data at {pixel_offset}",
            Compression::from_u32(compression)
        );

        Ok(Self {
            file_size,
            pixel_offset,
            dib_header_len,
            width,
            height,
            planes,
            bits_per_pixel,
            compression,
            x_pixels_per_meter,
            y_pixels_per_meter,
            masks,
        })
    }

    pub(crate) fn abs_width(&self) -> u32 {
        self.width.unsigned_abs()
    }

    pub(crate) fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Positive heights store the bottom row first.
    pub(crate) fn is_bottom_up(&self) -> bool {
        self.height > 0
    }

    /// Negative widths store each row right to left.
    pub(crate) fn is_mirrored(&self) -> bool {
        self.width < 0
    }

    pub(crate) fn compression_kind(&self) -> Compression {
        Compression::from_u32(self.compression)
    }

    pub(crate) fn output_size(&self) -> Result<usize, BmpError> {
        output_size(self.abs_width(), self.abs_height()).ok_or(BmpError::DimensionsTooLarge {
            width: self.abs_width(),
            height: self.abs_height(),
        })
    }

    pub(crate) fn palette_offset(&self) -> usize {
        FILE_HEADER_LEN.saturating_add(self.dib_header_len as usize)
    }

    /// Reject planes, bit depths and compression modes this decoder never handles.
    pub(crate) fn check_supported(&self) -> Result<(), BmpError> {
        if self.planes != 1 {
            log::debug!("BMP rejected: {} planes", self.planes);
            return Err(BmpError::NotSupported("plane count must be 1"));
        }
        if !matches!(self.bits_per_pixel, 4 | 8 | 24 | 32) {
            log::debug!("BMP rejected: bit depth {}", self.bits_per_pixel);
            return Err(BmpError::NotSupported("bit depth must be 4, 8, 24 or 32"));
        }
        match self.compression_kind() {
            Compression::Rgb | Compression::Bitfields => Ok(()),
            Compression::Rle8 | Compression::Rle4 => {
                log::debug!("BMP rejected: RLE compression");
                Err(BmpError::NotSupported("RLE compression"))
            }
            Compression::Other(code) => {
                log::debug!("BMP rejected: compression code {code}");
                Err(BmpError::NotSupported("unknown compression"))
            }
        }
    }
}
