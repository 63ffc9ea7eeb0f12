//! Property tests for wrap/unwrap
//!
//! Every case runs at least one full PBKDF2 derivation, so case counts are
//! kept small.

use kekwrap::prelude::*;
use proptest::prelude::*;

fn wrapper() -> KeyWrapper {
    KeyWrapper::new(KeyDerivationParams::interactive()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn round_trip(
        password in proptest::collection::vec(any::<u8>(), 1..64),
        payload in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let wrapper = wrapper();
        let blob = wrapper.wrap(&password, &payload).unwrap();
        prop_assert_eq!(blob.len(), MIN_BLOB_SIZE + payload.len());

        let unwrapped = wrapper.unwrap(&password, blob.as_bytes()).unwrap();
        prop_assert_eq!(unwrapped.as_bytes(), &payload[..]);
    }

    #[test]
    fn wrong_password_is_rejected(
        password in proptest::collection::vec(any::<u8>(), 1..32),
        other in proptest::collection::vec(any::<u8>(), 1..32),
        payload in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(password != other);
        let wrapper = wrapper();
        let blob = wrapper.wrap(&password, &payload).unwrap();

        let result = wrapper.unwrap(&other, blob.as_bytes());
        prop_assert!(matches!(result, Err(KeyWrapError::AuthenticationFailed)));
    }

    #[test]
    fn single_bit_flip_is_detected(
        payload in proptest::collection::vec(any::<u8>(), 1..64),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let wrapper = wrapper();
        let blob = wrapper.wrap(b"password", &payload).unwrap();
        let mut bytes = blob.into_bytes();

        let index = position.index(bytes.len());
        bytes[index] ^= 1 << bit;

        let result = wrapper.unwrap(b"password", &bytes);
        if index == 0 {
            // The version byte is checked before any cryptography runs
            prop_assert!(
                matches!(result, Err(KeyWrapError::MalformedBlob { .. })),
                "expected MalformedBlob, got {:?}",
                result
            );
        } else {
            prop_assert!(
                matches!(result, Err(KeyWrapError::AuthenticationFailed)),
                "expected AuthenticationFailed, got {:?}",
                result
            );
        }
    }

    #[test]
    fn short_input_is_malformed(bytes in proptest::collection::vec(any::<u8>(), 0..MIN_BLOB_SIZE)) {
        let result = wrapper().unwrap(b"password", &bytes);
        let is_malformed = matches!(result, Err(KeyWrapError::MalformedBlob { .. }));
        prop_assert!(is_malformed);
    }
}
