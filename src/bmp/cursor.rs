//! Little-endian reader over a byte slice.
//!
//! Reads never fail: bytes at or past the end of the slice read as zero, so a
//! truncated trailer (or, in permissive decoding, truncated pixel data)
//! degrades to zeros instead of an out-of-bounds access.

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Cursor over `data[offset..]`, or an empty cursor if `offset` is past the end.
    pub(crate) fn at(data: &'a [u8], offset: usize) -> Self {
        Self::new(data.get(offset..).unwrap_or(&[]))
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn skip(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }

    /// Read `N` bytes, zero-filling whatever lies past the end.
    fn read_fixed_bytes<const N: usize>(&mut self) -> [u8; N] {
        let mut buf = [0u8; N];
        let available = self.data.len().saturating_sub(self.pos).min(N);
        buf[..available].copy_from_slice(&self.data[self.pos..self.pos + available]);
        self.pos += available;
        buf
    }

    pub(crate) fn read_u8(&mut self) -> u8 {
        match self.data.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                b
            }
            None => 0,
        }
    }

    pub(crate) fn read_u16_le(&mut self) -> u16 {
        u16::from_le_bytes(self.read_fixed_bytes())
    }

    pub(crate) fn read_u32_le(&mut self) -> u32 {
        u32::from_le_bytes(self.read_fixed_bytes())
    }

    pub(crate) fn read_i32_le(&mut self) -> i32 {
        i32::from_le_bytes(self.read_fixed_bytes())
    }

    /// Read a B,G,R triple.
    pub(crate) fn read_bgr(&mut self) -> [u8; 3] {
        self.read_fixed_bytes()
    }

    /// Read a B,G,R,A quad.
    pub(crate) fn read_bgra(&mut self) -> [u8; 4] {
        self.read_fixed_bytes()
    }
}
