#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: i32, height: i32, bpp: u16, compression: u32, dib_len: u32, extra: usize, pixels: usize) -> Vec<u8> {
    let offset = 14 + dib_len as usize + extra;
    let mut bmp = vec![0u8; offset + pixels];
    bmp[0] = b'B';
    bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(bmp.len() as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&(offset as u32).to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&dib_len.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
    bmp[30..34].copy_from_slice(&compression.to_le_bytes());
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 24-bit
    let mut bmp = header(1, 1, 24, 0, 40, 0, 4);
    bmp[54..57].copy_from_slice(&[0xff, 0x00, 0x00]); // BGR
    fs::write(format!("{dir}/rgb24_1x1.bmp"), bmp).unwrap();

    // 3x2 top-down, mirrored 24-bit
    let mut bmp = header(-3, -2, 24, 0, 40, 0, 24);
    for (i, b) in bmp[54..].iter_mut().enumerate() {
        *b = (i * 37) as u8;
    }
    fs::write(format!("{dir}/rgb24_3x2_topdown_mirrored.bmp"), bmp).unwrap();

    // 3x1 4-bit with a 2-entry palette
    let mut bmp = header(3, 1, 4, 0, 40, 8, 4);
    bmp[54..62].copy_from_slice(&[0, 0, 0xff, 0, 0xff, 0, 0, 0]);
    bmp[62] = 0x01;
    bmp[63] = 0x10;
    fs::write(format!("{dir}/pal4_3x1.bmp"), bmp).unwrap();

    // 2x2 8-bit with a 2-entry palette
    let mut bmp = header(2, 2, 8, 0, 40, 8, 8);
    bmp[54..62].copy_from_slice(&[0x10, 0x20, 0x30, 0, 0x40, 0x50, 0x60, 0]);
    bmp[62..64].copy_from_slice(&[0, 1]);
    bmp[66..68].copy_from_slice(&[1, 0]);
    fs::write(format!("{dir}/pal8_2x2.bmp"), bmp).unwrap();

    // 2x1 32-bit bitfields with masks in a 56-byte DIB header
    let mut bmp = header(2, 1, 32, 3, 56, 0, 8);
    for (i, mask) in [0x00ff_0000u32, 0xff00, 0xff, 0xff00_0000].iter().enumerate() {
        bmp[54 + i * 4..58 + i * 4].copy_from_slice(&mask.to_le_bytes());
    }
    bmp[70..78].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
    fs::write(format!("{dir}/bitfields32_2x1.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/rgb24_truncated.bmp"), &header(4, 4, 24, 0, 40, 0, 20)).unwrap();
    fs::write(format!("{dir}/rle8_header.bmp"), &header(4, 4, 8, 1, 40, 0, 16)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
