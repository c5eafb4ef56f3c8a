#![no_main]

use std::io::Cursor;

use ipmrs::{Codec, WhatwgCodec, count_occurrences};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, &[u8])| {
    let (capacity, data) = input;
    let capacity = usize::from(capacity).max(1);

    for label in ["UTF-8", "UTF-16BE", "EUC-JP"] {
        let whole = WhatwgCodec
            .open_decoder(label)
            .map_err(|e| e.to_string())
            .and_then(|d| count_occurrences(Cursor::new(data), d, data.len().max(1)).map_err(|e| e.to_string()));
        let split = WhatwgCodec
            .open_decoder(label)
            .map_err(|e| e.to_string())
            .and_then(|d| count_occurrences(Cursor::new(data), d, capacity).map_err(|e| e.to_string()));

        // Chunking never changes the table, and valid input never fails only when split
        match (whole, split) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Ok(_), Err(e)) => panic!("{label}: split read failed: {e}"),
            (Err(_), _) => {}
        }
    }
});
