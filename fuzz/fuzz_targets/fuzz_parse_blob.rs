#![no_main]

use kekwrap::key_management::{WrappedBlob, HEADER_SIZE, MIN_BLOB_SIZE};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match WrappedBlob::parse(data) {
        Ok(blob) => {
            assert!(data.len() >= MIN_BLOB_SIZE);
            assert_eq!(blob.as_bytes(), data);
            assert_eq!(blob.header().len(), HEADER_SIZE);
            assert_eq!(blob.tag().len(), 16);
            assert_eq!(blob.payload_len() + MIN_BLOB_SIZE, blob.len());

            // Text encoding must round-trip whatever parses
            let reparsed = WrappedBlob::from_base64(&blob.to_base64()).unwrap();
            assert_eq!(reparsed, blob);
        }
        Err(e) => assert!(data.len() < MIN_BLOB_SIZE || data[0] != 1, "{}", e),
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = WrappedBlob::from_base64(text);
    }
});
