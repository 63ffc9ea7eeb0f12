#![no_main]

use kekwrap::SecureBytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut secure = SecureBytes::new(data);
    assert_eq!(secure.len(), data.len());
    assert!(secure == data);

    let debug = format!("{:?}", secure);
    assert!(debug.contains("REDACTED"));

    let copy = secure.clone();
    secure.clear();
    assert!(secure.is_empty());
    assert_eq!(copy.into_vec(), data);
});
