#![no_main]
use libfuzzer_sys::fuzz_target;

// Cap allocations so huge declared dimensions don't OOM the fuzzer
const MAX_OUTPUT: usize = 64 << 20;

fuzz_target!(|data: &[u8]| {
    let _ = ezbmp::ImageInfo::from_bytes(data);

    let size = ezbmp::required_output_size(data);
    if size > MAX_OUTPUT {
        return;
    }
    let mut out = vec![0u8; size];

    // Must never panic, in either mode
    let _ = ezbmp::decode(data, &mut out);
    let _ = ezbmp::DecodeRequest::new(data)
        .with_permissiveness(ezbmp::Permissiveness::Permissive)
        .with_layout(ezbmp::PixelLayout::Argb8)
        .with_alpha(ezbmp::AlphaHandling::Preserve)
        .decode_into(&mut out, enough::Unstoppable);

    // A short buffer is an error, never a panic
    if size > 0 {
        let _ = ezbmp::decode(data, &mut out[..size - 1]);
    }
});
