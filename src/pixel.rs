/// Byte order of each 4-byte output pixel.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// R, G, B, A.
    #[default]
    Rgba8,
    /// B, G, R, A (the byte order BMP stores uncompressed pixels in).
    Bgra8,
    /// A, R, G, B, for callers that consume alpha-first words.
    Argb8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout. Always 4.
    pub const fn bytes_per_pixel(&self) -> usize {
        4
    }

    /// Write one pixel into `px` (exactly 4 bytes) in this layout's order.
    #[inline]
    pub(crate) fn store(self, px: &mut [u8], r: u8, g: u8, b: u8, a: u8) {
        let bytes = match self {
            Self::Rgba8 => [r, g, b, a],
            Self::Bgra8 => [b, g, r, a],
            Self::Argb8 => [a, r, g, b],
        };
        px.copy_from_slice(&bytes);
    }
}

/// What to do with the fourth byte of uncompressed 32-bit pixels.
///
/// Uncompressed 32-bit BMPs carry a byte per pixel that many writers leave
/// zeroed, so it is not reliably alpha. Bitfield-encoded images always use
/// their alpha mask and ignore this setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlphaHandling {
    /// Write 0xFF for every pixel.
    #[default]
    ForceOpaque,
    /// Copy the stored byte through as alpha.
    Preserve,
}
