#![no_main]

use std::io::Cursor;

use ipmrs::{IpmConfig, IpmError, WhatwgCodec, compute_ipm_with};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes in a handful of encodings: any outcome but a panic is fine
    for label in ["UTF-8", "UTF-16LE", "Shift_JIS", "GB18030", "windows-1252"] {
        let config = IpmConfig::default()
            .with_source_encoding(label)
            .with_read_capacity(5)
            .with_show_occurrences(true);

        match compute_ipm_with(Cursor::new(data), &WhatwgCodec, &config) {
            Ok(report) => {
                let (n, d) = report.fraction();
                assert!(d > 0);
                assert!(n >= d);
                assert!(report.total >= 2);
                assert!(report.alphabet_size as u64 <= report.total);
            }
            Err(e) => assert!((2..=10).contains(&e.exit_code())),
        }
    }

    // Single-byte encodings map every byte
    if data.len() >= 2 {
        let config = IpmConfig::default().with_source_encoding("windows-1252");
        let result = compute_ipm_with(Cursor::new(data), &WhatwgCodec, &config);
        assert!(!matches!(result, Err(IpmError::Decode { .. })));
    }
});
