mod common;

use common::{BmpBuilder, noise};
use core::sync::atomic::{AtomicUsize, Ordering};

use ezbmp::*;

fn one_pixel_24() -> Vec<u8> {
    BmpBuilder::new(1, 1, 24).row(&[10, 20, 30]).build()
}

// ── Layouts ──────────────────────────────────────────────────────────

#[test]
fn layouts_reorder_channels() {
    let data = one_pixel_24();
    let mut out = [0u8; 4];

    let decoded = DecodeRequest::new(&data)
        .decode_into(&mut out, Unstoppable)
        .unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgba8);
    assert_eq!(out, [30, 20, 10, 255]);

    let decoded = DecodeRequest::new(&data)
        .with_layout(PixelLayout::Bgra8)
        .decode_into(&mut out, Unstoppable)
        .unwrap();
    assert_eq!(decoded.layout, PixelLayout::Bgra8);
    assert_eq!(out, [10, 20, 30, 255]);

    let decoded = DecodeRequest::new(&data)
        .with_layout(PixelLayout::Argb8)
        .decode_into(&mut out, Unstoppable)
        .unwrap();
    assert_eq!(decoded.layout, PixelLayout::Argb8);
    assert_eq!(out, [255, 30, 20, 10]);
}

#[test]
fn bgra_layout_matches_stored_32bit_rows() {
    let row = noise(5 * 4, 0x1234_5678);
    let data = BmpBuilder::new(5, -1, 32).row(&row).build();
    let mut out = vec![0u8; 20];
    DecodeRequest::new(&data)
        .with_layout(PixelLayout::Bgra8)
        .with_alpha(AlphaHandling::Preserve)
        .decode_into(&mut out, Unstoppable)
        .unwrap();
    assert_eq!(out, row);
}

// ── 32-bit alpha ─────────────────────────────────────────────────────

#[test]
fn rgb32_alpha_handling() {
    let data = BmpBuilder::new(2, 1, 32)
        .row(&[1, 2, 3, 0, 4, 5, 6, 128])
        .build();
    let mut out = [0u8; 8];

    DecodeRequest::new(&data)
        .with_alpha(AlphaHandling::ForceOpaque)
        .decode_into(&mut out, Unstoppable)
        .unwrap();
    assert_eq!(out, [3, 2, 1, 255, 6, 5, 4, 255]);

    DecodeRequest::new(&data)
        .with_alpha(AlphaHandling::Preserve)
        .decode_into(&mut out, Unstoppable)
        .unwrap();
    assert_eq!(out, [3, 2, 1, 0, 6, 5, 4, 128]);
}

#[test]
fn bitfields_alpha_ignores_alpha_handling() {
    let word: u32 = 0x4011_2233;
    let data = BmpBuilder::new(1, 1, 32)
        .compression(3)
        .masks([0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000])
        .row(&word.to_le_bytes())
        .build();
    let mut out = [0u8; 4];
    DecodeRequest::new(&data)
        .with_alpha(AlphaHandling::ForceOpaque)
        .decode_into(&mut out, Unstoppable)
        .unwrap();
    assert_eq!(out, [0x11, 0x22, 0x33, 0x40]);
}

// ── Limits ───────────────────────────────────────────────────────────

fn image_4x3() -> Vec<u8> {
    let mut b = BmpBuilder::new(4, 3, 24);
    for y in 0..3 {
        b = b.row(&noise(12, 7 + y));
    }
    b.build()
}

#[test]
fn limits_reject_large() {
    let data = image_4x3();
    let mut out = vec![0xAAu8; 48];

    for (limits, what) in [
        (
            Limits {
                max_width: Some(3),
                ..Default::default()
            },
            "width",
        ),
        (
            Limits {
                max_height: Some(2),
                ..Default::default()
            },
            "height",
        ),
        (
            Limits {
                max_pixels: Some(11),
                ..Default::default()
            },
            "pixel count",
        ),
    ] {
        match DecodeRequest::new(&data)
            .with_limits(&limits)
            .decode_into(&mut out, Unstoppable)
        {
            Err(BmpError::LimitExceeded { what: w, .. }) => assert_eq!(w, what),
            other => panic!("expected LimitExceeded for {what}, got {other:?}"),
        }
    }
    assert!(out.iter().all(|&b| b == 0xAA));
}

#[test]
fn limits_at_boundary_pass() {
    let data = image_4x3();
    let limits = Limits {
        max_width: Some(4),
        max_height: Some(3),
        max_pixels: Some(12),
    };
    let mut out = vec![0u8; 48];
    let decoded = DecodeRequest::new(&data)
        .with_limits(&limits)
        .decode_into(&mut out, Unstoppable)
        .unwrap();
    assert_eq!((decoded.width, decoded.height), (4, 3));
}

// ── Permissive ───────────────────────────────────────────────────────

#[test]
fn permissive_zero_fills_truncated_rows() {
    let mut data = BmpBuilder::new(2, -2, 24)
        .row(&[1, 2, 3, 4, 5, 6])
        .row(&[7, 8, 9, 10, 11, 12])
        .build();
    // Drop the second row except its first byte
    data.truncate(54 + 8 + 1);

    let mut out = [0xAAu8; 16];
    assert!(matches!(
        DecodeRequest::new(&data).decode_into(&mut out, Unstoppable),
        Err(BmpError::InvalidImage(_))
    ));

    DecodeRequest::new(&data)
        .with_permissiveness(Permissiveness::Permissive)
        .decode_into(&mut out, Unstoppable)
        .unwrap();
    assert_eq!(
        out,
        [
            3, 2, 1, 255, 6, 5, 4, 255, //
            0, 0, 7, 255, 0, 0, 0, 255,
        ]
    );
}

#[test]
fn permissive_missing_palette_entry_is_black() {
    let data = BmpBuilder::new(2, 1, 8)
        .palette(&[[9, 8, 7, 0]])
        .row(&[0, 200])
        .build();
    let mut out = [0u8; 8];
    assert!(matches!(
        DecodeRequest::new(&data).decode_into(&mut out, Unstoppable),
        Err(BmpError::InvalidImage(_))
    ));
    DecodeRequest::new(&data)
        .with_permissiveness(Permissiveness::Permissive)
        .decode_into(&mut out, Unstoppable)
        .unwrap();
    assert_eq!(out, [7, 8, 9, 255, 0, 0, 0, 255]);
}

#[test]
fn permissive_pixel_offset_past_end() {
    let mut data = one_pixel_24();
    data[10..14].copy_from_slice(&1_000_000u32.to_le_bytes());
    let mut out = [0xAAu8; 4];
    DecodeRequest::new(&data)
        .with_permissiveness(Permissiveness::Permissive)
        .decode_into(&mut out, Unstoppable)
        .unwrap();
    assert_eq!(out, [0, 0, 0, 255]);
}

#[test]
fn permissive_still_rejects_unsupported() {
    let data = BmpBuilder::new(1, 1, 8).compression(1).build();
    let mut out = [0u8; 4];
    assert!(matches!(
        DecodeRequest::new(&data)
            .with_permissiveness(Permissiveness::Permissive)
            .decode_into(&mut out, Unstoppable),
        Err(BmpError::NotSupported(_))
    ));
}

// ── Probe ────────────────────────────────────────────────────────────

#[test]
fn probe_reports_header() {
    let data = BmpBuilder::new(-6, -4, 32)
        .compression(3)
        .masks([0xFF0000, 0xFF00, 0xFF, 0xFF00_0000])
        .build();
    let info = ImageInfo::from_bytes(&data).unwrap();
    assert_eq!((info.width, info.height), (6, 4));
    assert_eq!(info.bits_per_pixel, 32);
    assert_eq!(info.compression, Compression::Bitfields);
    assert!(info.top_down);
    assert!(info.mirrored);
    assert!(info.supported);
    assert_eq!(info.declared_file_size, data.len() as u32);
    assert_eq!(info.pixels_per_meter, (2835, 2835));
    assert_eq!(info.output_size(), required_output_size(&data));
}

#[test]
fn probe_flags_unsupported() {
    let rle = BmpBuilder::new(8, 8, 8).compression(1).build();
    let info = ImageInfo::from_bytes(&rle).unwrap();
    assert_eq!(info.compression, Compression::Rle8);
    assert!(!info.supported);
    assert!(!info.top_down);

    let bitfields24 = BmpBuilder::new(8, 8, 24).compression(3).build();
    assert!(!ImageInfo::from_bytes(&bitfields24).unwrap().supported);

    assert!(matches!(
        ImageInfo::from_bytes(b"not a bitmap"),
        Err(BmpError::InvalidImage(_))
    ));
}

#[test]
fn request_output_size_matches_free_function() {
    let data = image_4x3();
    assert_eq!(DecodeRequest::new(&data).output_size(), 48);
    assert_eq!(DecodeRequest::new(b"BM").output_size(), 0);
}

// ── Typed pixels ─────────────────────────────────────────────────────

#[cfg(feature = "rgb")]
#[test]
fn decode_into_rgba_pixels() {
    let data = BmpBuilder::new(2, -1, 24).row(&[1, 2, 3, 4, 5, 6]).build();
    let mut pixels = vec![rgb::RGBA8::new(0, 0, 0, 0); 2];
    let decoded = DecodeRequest::new(&data)
        .with_layout(PixelLayout::Argb8)
        .decode_into_rgba(&mut pixels, Unstoppable)
        .unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgba8);
    assert_eq!(pixels[0], rgb::RGBA8::new(3, 2, 1, 255));
    assert_eq!(pixels[1], rgb::RGBA8::new(6, 5, 4, 255));
}

// ── Cancellation ─────────────────────────────────────────────────────

/// Allows a fixed number of checks, then reports cancellation.
struct StopAfter(AtomicUsize);

impl Stop for StopAfter {
    fn check(&self) -> Result<(), StopReason> {
        match self.0.fetch_sub(1, Ordering::Relaxed) {
            0 => {
                self.0.store(0, Ordering::Relaxed);
                Err(StopReason::Cancelled)
            }
            _ => Ok(()),
        }
    }
}

#[test]
fn cancelled_before_decode_writes_nothing() {
    let data = image_4x3();
    let mut out = vec![0xAAu8; 48];
    let result = DecodeRequest::new(&data).decode_into(&mut out, StopAfter(AtomicUsize::new(0)));
    assert!(matches!(result, Err(BmpError::Cancelled(_))), "{result:?}");
    assert!(out.iter().all(|&b| b == 0xAA));
}

#[test]
fn cancelled_mid_decode_stops_at_row_batch() {
    // 1x32 top-down; checks run before decoding, then every 16 rows
    let mut b = BmpBuilder::new(1, -32, 24);
    for y in 0..32u8 {
        b = b.row(&[y, y, y]);
    }
    let data = b.build();
    let mut out = vec![0xAAu8; 32 * 4];
    let result = DecodeRequest::new(&data).decode_into(&mut out, StopAfter(AtomicUsize::new(2)));
    assert!(matches!(result, Err(BmpError::Cancelled(_))), "{result:?}");

    let (done, rest) = out.split_at(16 * 4);
    for (y, px) in done.chunks_exact(4).enumerate() {
        assert_eq!(px, [y as u8, y as u8, y as u8, 255]);
    }
    assert!(rest.iter().all(|&b| b == 0xAA));
}
