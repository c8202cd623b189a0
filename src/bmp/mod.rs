//! BMP decoding (internal).
//!
//! Use top-level [`crate::decode`], [`crate::DecodeRequest`] and
//! [`crate::required_output_size`].

mod cursor;
mod decode;
mod geometry;
mod header;
mod utils;

pub use decode::Permissiveness;
pub use header::{Compression, required_output_size};

pub(crate) use decode::DecodeSettings;
pub(crate) use header::{BitmapHeader, output_size};

use crate::decode::DecodeOutput;
use crate::error::BmpError;
use crate::limits::Limits;
use decode::PixelFormat;
use enough::Stop;

/// Whether the header describes an image this decoder can produce pixels for.
pub(crate) fn is_supported(header: &BitmapHeader) -> bool {
    header.check_supported().is_ok()
        && PixelFormat::select(header.bits_per_pixel, header.compression_kind()).is_some()
}

/// Decode `data` into the front of `out`.
///
/// Header, size, limit and bounds checks (including palette indices) all run
/// before the first output byte is written.
pub(crate) fn decode_into(
    data: &[u8],
    out: &mut [u8],
    settings: &DecodeSettings,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BmpError> {
    let header = BitmapHeader::parse(data)?;
    let width = header.abs_width();
    let height = header.abs_height();

    let needed = header.output_size()?;
    if out.len() < needed {
        return Err(BmpError::NotEnoughSpace {
            needed,
            actual: out.len(),
        });
    }

    header.check_supported()?;
    if let Some(limits) = limits {
        limits.check(width, height)?;
    }

    let format = PixelFormat::select(header.bits_per_pixel, header.compression_kind())
        .ok_or(BmpError::NotSupported(
            "bit depth is not valid for this compression",
        ))?;
    let decoded = DecodeOutput {
        width,
        height,
        layout: settings.layout,
    };
    if needed == 0 {
        // Zero width or height: nothing to read or write
        return Ok(decoded);
    }
    if settings.permissiveness == Permissiveness::Standard {
        decode::check_bounds(data, &header, format)?;
    }
    log::trace!("BMP pixel format: {format:?}");

    stop.check()?;
    let buf = &mut out[..needed];
    decode::decode_pixels(data, &header, format, settings, buf, stop)?;

    stop.check()?;
    let row_bytes = width as usize * settings.layout.bytes_per_pixel();
    if header.is_bottom_up() {
        geometry::flip_vertically(buf, row_bytes);
    }
    if header.is_mirrored() {
        geometry::mirror_horizontally(buf, row_bytes);
    }

    Ok(decoded)
}
