//! Row decoding for uncompressed (4/8/24/32-bit) and bitfield (32-bit) BMPs.
//!
//! Rows are written to the output in stored order; `geometry` fixes up the
//! orientation afterwards.

use enough::Stop;

use super::cursor::Cursor;
use super::header::{BitmapHeader, ChannelMasks, Compression};
use super::utils::{extract_channel, lowest_set_bit, row_padding};
use crate::error::BmpError;
use crate::pixel::{AlphaHandling, PixelLayout};

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the decoder checks offsets against the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissiveness {
    /// Default behavior. Reject pixel data or a palette that extends past
    /// the end of the input, and palette indices with no palette entry,
    /// before any output is written.
    #[default]
    Standard,

    /// Decode whatever is there. Missing pixel bytes read as zero and
    /// missing palette entries resolve to opaque black.
    Permissive,
}

// ── Pixel format ────────────────────────────────────────────────────

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum PixelFormat {
    /// Two palette indices per byte, high nibble first.
    Indexed4,
    /// One palette index per byte.
    Indexed8,
    /// B, G, R.
    Rgb24,
    /// B, G, R, A.
    Rgb32,
    /// Little-endian u32 split by channel masks.
    Bitfields32,
}

impl PixelFormat {
    pub(crate) fn select(bits_per_pixel: u16, compression: Compression) -> Option<Self> {
        match (compression, bits_per_pixel) {
            (Compression::Rgb, 4) => Some(Self::Indexed4),
            (Compression::Rgb, 8) => Some(Self::Indexed8),
            (Compression::Rgb, 24) => Some(Self::Rgb24),
            (Compression::Rgb, 32) => Some(Self::Rgb32),
            (Compression::Bitfields, 32) => Some(Self::Bitfields32),
            _ => None,
        }
    }

    fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Indexed4 => 4,
            Self::Indexed8 => 8,
            Self::Rgb24 => 24,
            Self::Rgb32 | Self::Bitfields32 => 32,
        }
    }

    pub(crate) fn is_indexed(self) -> bool {
        matches!(self, Self::Indexed4 | Self::Indexed8)
    }

    /// Bytes of pixel data in one stored row, excluding padding.
    pub(crate) fn row_bytes(self, width: usize) -> Option<usize> {
        match self {
            Self::Indexed4 => Some(width.div_ceil(2)),
            Self::Indexed8 => Some(width),
            Self::Rgb24 => width.checked_mul(3),
            Self::Rgb32 | Self::Bitfields32 => width.checked_mul(4),
        }
    }
}

// ── Palette ─────────────────────────────────────────────────────────

/// BGRA palette entries that lie inside the input.
///
/// Every whole entry between the palette offset and the end of the input is
/// usable, up to `2^bpp`. The header's color count is not consulted.
struct Palette<'a> {
    entries: &'a [u8],
}

impl<'a> Palette<'a> {
    fn new(data: &'a [u8], header: &BitmapHeader, format: PixelFormat) -> Self {
        let available = data.get(header.palette_offset()..).unwrap_or(&[]);
        let count = (available.len() / 4).min(1 << format.bits_per_pixel());
        log::trace!("BMP palette: {count} usable entries");
        Self {
            entries: &available[..count * 4],
        }
    }

    fn len(&self) -> usize {
        self.entries.len() / 4
    }

    /// Resolve an index to (red, green, blue). Indices with no entry resolve
    /// to black; `check_bounds` rejects them up front in standard mode.
    #[inline]
    fn lookup(&self, index: u8) -> (u8, u8, u8) {
        let start = usize::from(index) * 4;
        self.entries
            .get(start..start + 4)
            .map_or((0, 0, 0), |entry| (entry[2], entry[1], entry[0]))
    }
}

/// Largest palette index used by any pixel. Rows outside `data` are skipped.
fn max_palette_index(
    data: &[u8],
    header: &BitmapHeader,
    format: PixelFormat,
    row_bytes: usize,
    stride: usize,
) -> Option<u8> {
    let width = header.abs_width() as usize;
    let offset = header.pixel_offset as usize;
    let rows = (0..header.abs_height() as usize).filter_map(|y| {
        let start = y.checked_mul(stride)?.checked_add(offset)?;
        data.get(start..)?.get(..row_bytes)
    });

    match format {
        PixelFormat::Indexed4 => rows
            .filter_map(|row| {
                row.iter()
                    .flat_map(|&b| [b >> 4, b & 0x0F])
                    .take(width)
                    .max()
            })
            .max(),
        PixelFormat::Indexed8 => rows.filter_map(|row| row.iter().copied().max()).max(),
        _ => None,
    }
}

// ── Bitfield shifts ─────────────────────────────────────────────────

struct ChannelShifts {
    masks: ChannelMasks,
    red: Option<u32>,
    green: Option<u32>,
    blue: Option<u32>,
    alpha: Option<u32>,
}

impl ChannelShifts {
    fn new(masks: ChannelMasks) -> Self {
        log::trace!(
            "BMP masks: r={:#010x} g={:#010x} b={:#010x} a={:#010x}",
            masks.red,
            masks.green,
            masks.blue,
            masks.alpha
        );
        Self {
            masks,
            red: lowest_set_bit(masks.red),
            green: lowest_set_bit(masks.green),
            blue: lowest_set_bit(masks.blue),
            alpha: lowest_set_bit(masks.alpha),
        }
    }

    #[inline]
    fn split(&self, word: u32) -> (u8, u8, u8, u8) {
        (
            extract_channel(word, self.masks.red, self.red),
            extract_channel(word, self.masks.green, self.green),
            extract_channel(word, self.masks.blue, self.blue),
            extract_channel(word, self.masks.alpha, self.alpha),
        )
    }
}

// ── Bounds ──────────────────────────────────────────────────────────

/// Check that every pixel byte lies inside `data` and, for indexed formats,
/// that the palette starts inside `data` and has an entry for every index
/// the pixels use.
///
/// The last row's trailing padding is never read, so it need not be present.
pub(crate) fn check_bounds(
    data: &[u8],
    header: &BitmapHeader,
    format: PixelFormat,
) -> Result<(), BmpError> {
    let width = header.abs_width() as usize;
    let height = header.abs_height() as usize;
    let too_large = BmpError::DimensionsTooLarge {
        width: header.abs_width(),
        height: header.abs_height(),
    };

    let row_bytes = format.row_bytes(width).ok_or(too_large)?;
    let stride = row_bytes + row_padding(row_bytes);
    let end = stride
        .checked_mul(height.saturating_sub(1))
        .and_then(|v| v.checked_add(row_bytes))
        .and_then(|v| v.checked_add(header.pixel_offset as usize));

    match end {
        Some(end) if end <= data.len() => {}
        _ => {
            log::debug!(
                "BMP rejected: pixel data at {} runs past {} input bytes",
                header.pixel_offset,
                data.len()
            );
            return Err(BmpError::InvalidImage("pixel data extends past end of input"));
        }
    }

    if format.is_indexed() && header.palette_offset() > data.len() {
        log::debug!(
            "BMP rejected: palette at {} is past {} input bytes",
            header.palette_offset(),
            data.len()
        );
        return Err(BmpError::InvalidImage("palette starts past end of input"));
    }

    if format.is_indexed() {
        let palette = Palette::new(data, header, format);
        if let Some(max) = max_palette_index(data, header, format, row_bytes, stride)
            && usize::from(max) >= palette.len()
        {
            log::debug!(
                "BMP rejected: palette index {max} but only {} entries in the input",
                palette.len()
            );
            return Err(BmpError::InvalidImage("palette index out of range"));
        }
    }
    Ok(())
}

// ── Decode ──────────────────────────────────────────────────────────

/// Caller-selected output options.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DecodeSettings {
    pub layout: PixelLayout,
    pub alpha: AlphaHandling,
    pub permissiveness: Permissiveness,
}

/// Per-format state, built once per image.
enum RowDecoder<'a> {
    Indexed4(Palette<'a>),
    Indexed8(Palette<'a>),
    Rgb24,
    Rgb32(AlphaHandling),
    Bitfields32(ChannelShifts),
}

impl<'a> RowDecoder<'a> {
    fn new(
        data: &'a [u8],
        header: &BitmapHeader,
        format: PixelFormat,
        settings: &DecodeSettings,
    ) -> Self {
        match format {
            PixelFormat::Indexed4 => Self::Indexed4(Palette::new(data, header, format)),
            PixelFormat::Indexed8 => Self::Indexed8(Palette::new(data, header, format)),
            PixelFormat::Rgb24 => Self::Rgb24,
            PixelFormat::Rgb32 => Self::Rgb32(settings.alpha),
            PixelFormat::Bitfields32 => Self::Bitfields32(ChannelShifts::new(header.masks)),
        }
    }

    /// Decode one stored row (without its padding) into `row`.
    fn decode_row(&self, bytes: &mut Cursor<'_>, row: &mut [u8], layout: PixelLayout) {
        match self {
            Self::Indexed4(palette) => {
                for pair in row.chunks_mut(8) {
                    let byte = bytes.read_u8();
                    for (px, index) in pair.chunks_exact_mut(4).zip([byte >> 4, byte & 0x0F]) {
                        let (r, g, b) = palette.lookup(index);
                        layout.store(px, r, g, b, 0xFF);
                    }
                }
            }
            Self::Indexed8(palette) => {
                for px in row.chunks_exact_mut(4) {
                    let (r, g, b) = palette.lookup(bytes.read_u8());
                    layout.store(px, r, g, b, 0xFF);
                }
            }
            Self::Rgb24 => {
                for px in row.chunks_exact_mut(4) {
                    let [b, g, r] = bytes.read_bgr();
                    layout.store(px, r, g, b, 0xFF);
                }
            }
            Self::Rgb32(alpha) => {
                for px in row.chunks_exact_mut(4) {
                    let [b, g, r, a] = bytes.read_bgra();
                    let a = match alpha {
                        AlphaHandling::ForceOpaque => 0xFF,
                        AlphaHandling::Preserve => a,
                    };
                    layout.store(px, r, g, b, a);
                }
            }
            Self::Bitfields32(shifts) => {
                for px in row.chunks_exact_mut(4) {
                    let (r, g, b, a) = shifts.split(bytes.read_u32_le());
                    layout.store(px, r, g, b, a);
                }
            }
        }
    }
}

/// Decode every stored row into `buf`, which holds exactly
/// `abs(width) * abs(height) * 4` bytes.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &BitmapHeader,
    format: PixelFormat,
    settings: &DecodeSettings,
    buf: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), BmpError> {
    let width = header.abs_width() as usize;
    let out_row = width * 4;
    if out_row == 0 {
        return Ok(());
    }

    let row_bytes = format
        .row_bytes(width)
        .ok_or(BmpError::DimensionsTooLarge {
            width: header.abs_width(),
            height: header.abs_height(),
        })?;
    let padding = row_padding(row_bytes);

    let mut bytes = Cursor::at(data, header.pixel_offset as usize);
    let decoder = RowDecoder::new(data, header, format, settings);

    for (row_idx, row) in buf.chunks_exact_mut(out_row).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        decoder.decode_row(&mut bytes, row, settings.layout);
        bytes.skip(padding);
    }

    log::trace!(
        "BMP decoded {} rows from {} pixel bytes",
        buf.len() / out_row,
        bytes.position()
    );
    Ok(())
}
