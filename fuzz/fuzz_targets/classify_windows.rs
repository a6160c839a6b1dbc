#![no_main]

use iris::classify::{classify, WindowStats};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every 24 bytes become one window of three f64 fields
    let windows: Vec<WindowStats> = data
        .chunks_exact(24)
        .map(|chunk| {
            let field = |i: usize| {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&chunk[i * 8..(i + 1) * 8]);
                f64::from_le_bytes(bytes)
            };
            WindowStats::new(field(0), field(1), field(2))
        })
        .collect();

    // Arbitrary input (NaN, negatives, short runs) must error, never panic
    let _ = classify(&windows);
});
