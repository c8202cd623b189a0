//! Synthesizes BMP files for tests.

#![allow(dead_code)]

/// Builds a BMP byte stream from raw stored rows.
///
/// Rows are given in stored order, without padding; `build` pads each to a
/// multiple of 4 bytes.
#[derive(Clone, Debug)]
pub struct BmpBuilder {
    width: i32,
    height: i32,
    planes: u16,
    bpp: u16,
    compression: u32,
    colors_used: u32,
    masks: Option<[u32; 4]>,
    palette: Vec<[u8; 4]>,
    rows: Vec<Vec<u8>>,
    pad_last_row: bool,
}

impl BmpBuilder {
    pub fn new(width: i32, height: i32, bpp: u16) -> Self {
        Self {
            width,
            height,
            planes: 1,
            bpp,
            compression: 0,
            colors_used: 0,
            masks: None,
            palette: Vec::new(),
            rows: Vec::new(),
            pad_last_row: true,
        }
    }

    pub fn planes(mut self, planes: u16) -> Self {
        self.planes = planes;
        self
    }

    pub fn compression(mut self, compression: u32) -> Self {
        self.compression = compression;
        self
    }

    pub fn colors_used(mut self, colors_used: u32) -> Self {
        self.colors_used = colors_used;
        self
    }

    /// Red, green, blue, alpha masks; switches to a 56-byte DIB header.
    pub fn masks(mut self, masks: [u32; 4]) -> Self {
        self.masks = Some(masks);
        self
    }

    /// Palette entries in stored B, G, R, reserved order.
    pub fn palette(mut self, entries: &[[u8; 4]]) -> Self {
        self.palette = entries.to_vec();
        self
    }

    pub fn row(mut self, bytes: &[u8]) -> Self {
        self.rows.push(bytes.to_vec());
        self
    }

    /// Leave out the padding after the final row.
    pub fn without_last_row_padding(mut self) -> Self {
        self.pad_last_row = false;
        self
    }

    pub fn dib_len(&self) -> u32 {
        if self.masks.is_some() { 56 } else { 40 }
    }

    pub fn pixel_offset(&self) -> u32 {
        14 + self.dib_len() + 4 * self.palette.len() as u32
    }

    pub fn build(&self) -> Vec<u8> {
        let mut pixels = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            pixels.extend_from_slice(row);
            if self.pad_last_row || i + 1 < self.rows.len() {
                let pad = row.len().wrapping_neg() & 3;
                pixels.extend(std::iter::repeat_n(0u8, pad));
            }
        }

        let pixel_offset = self.pixel_offset();
        let file_size = pixel_offset as usize + pixels.len();
        let mut out = Vec::with_capacity(file_size);

        // File header (14 bytes)
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(file_size as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 4]); // reserved
        out.extend_from_slice(&pixel_offset.to_le_bytes());

        // DIB header
        out.extend_from_slice(&self.dib_len().to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bpp.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&(pixels.len() as u32).to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes()); // h resolution (72 DPI)
        out.extend_from_slice(&2835u32.to_le_bytes()); // v resolution
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // important colors
        if let Some(masks) = self.masks {
            for mask in masks {
                out.extend_from_slice(&mask.to_le_bytes());
            }
        }

        for entry in &self.palette {
            out.extend_from_slice(entry);
        }
        assert_eq!(out.len(), pixel_offset as usize);
        out.extend_from_slice(&pixels);
        out
    }
}

/// Deterministic xorshift bytes.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

/// Convert stored B,G,R rows into expected RGBA output rows (alpha 255).
pub fn bgr_to_rgba(row: &[u8]) -> Vec<u8> {
    row.chunks_exact(3)
        .flat_map(|p| [p[2], p[1], p[0], 0xFF])
        .collect()
}
