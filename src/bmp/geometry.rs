//! In-place orientation fixes applied after all rows are decoded.

/// Reverse the row order of `buf`.
pub(crate) fn flip_vertically(buf: &mut [u8], row_bytes: usize) {
    if row_bytes == 0 {
        return;
    }
    let rows = buf.len() / row_bytes;
    let (top, bottom) = buf.split_at_mut(rows / 2 * row_bytes);

    for (upper, lower) in top
        .chunks_exact_mut(row_bytes)
        .zip(bottom.rchunks_exact_mut(row_bytes))
    {
        upper.swap_with_slice(lower);
    }
}

/// Reverse the order of the 4-byte pixels within each row of `buf`.
pub(crate) fn mirror_horizontally(buf: &mut [u8], row_bytes: usize) {
    if row_bytes == 0 {
        return;
    }
    for row in buf.chunks_exact_mut(row_bytes) {
        // Reversing the bytes also reverses each pixel; undo that per pixel.
        row.reverse();
        for px in row.chunks_exact_mut(4) {
            px.reverse();
        }
    }
}
