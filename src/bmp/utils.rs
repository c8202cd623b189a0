//! BMP bit and row arithmetic.

/// Index of the lowest set bit of `mask`, or `None` if the mask is zero.
pub(crate) fn lowest_set_bit(mask: u32) -> Option<u32> {
    (mask != 0).then(|| mask.trailing_zeros())
}

/// Extract one channel from a bitfield-encoded pixel word.
///
/// The masked bits are shifted down to bit 0 and truncated to 8 bits; a zero
/// mask extracts 0.
#[inline]
pub(crate) fn extract_channel(word: u32, mask: u32, shift: Option<u32>) -> u8 {
    match shift {
        Some(s) => ((word & mask) >> s) as u8,
        None => 0,
    }
}

/// Bytes to skip after `row_bytes` of pixel data to reach the next 4-byte boundary.
pub(crate) fn row_padding(row_bytes: usize) -> usize {
    row_bytes.wrapping_neg() & 3
}
