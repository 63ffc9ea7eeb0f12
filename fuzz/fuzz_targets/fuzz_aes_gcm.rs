#![no_main]

use arbitrary::Arbitrary;
use kekwrap::aes::{AesGcm, NONCE_SIZE};
use kekwrap::KeyWrapError;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct AesGcmFuzzInput {
    wide_key: bool,
    key: [u8; 32],
    nonce: [u8; NONCE_SIZE],
    plaintext: Vec<u8>,
    associated_data: Option<Vec<u8>>,
    ciphertext: Vec<u8>,
    flip: Option<(usize, u8)>,
}

fuzz_target!(|input: AesGcmFuzzInput| {
    let key = if input.wide_key { &input.key[..] } else { &input.key[..16] };
    let cipher = AesGcm::new(key).unwrap();
    let aad = input.associated_data.as_deref();

    // Arbitrary ciphertext must be rejected, never panic
    match cipher.decrypt(&input.ciphertext, &input.nonce, aad) {
        Ok(_) | Err(KeyWrapError::AuthenticationFailed) => {}
        Err(e) => panic!("unexpected error: {}", e),
    }

    let mut sealed = match cipher.encrypt(&input.plaintext, &input.nonce, aad) {
        Ok(sealed) => sealed,
        Err(_) => return,
    };
    let opened = cipher.decrypt(&sealed, &input.nonce, aad).unwrap();
    assert_eq!(opened.as_bytes(), &input.plaintext[..]);

    if let Some((index, mask)) = input.flip {
        if mask != 0 {
            let index = index % sealed.len();
            sealed[index] ^= mask;
            assert!(cipher.decrypt(&sealed, &input.nonce, aad).is_err());
        }
    }
});
