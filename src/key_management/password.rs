//! Password-based derivation of key-encryption keys (PBKDF2-HMAC-SHA256).

use hmac::Hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::aes::SUPPORTED_KEY_SIZES;
use crate::error::{error_codes, KeyWrapError};
use crate::secure_memory::SecureBytes;

/// Salt length in bytes
pub const SALT_SIZE: usize = 16;

/// Lowest iteration count any deriver accepts
pub const MIN_ITERATIONS: u32 = 100_000;

/// Iteration count used when none is configured
pub const DEFAULT_ITERATIONS: u32 = 310_000;

/// Parameters for key derivation
///
/// Serializable so the storage layer hosting the wrapped blobs can persist the
/// parameters it wrapped them with; the blob format itself does not carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDerivationParams {
    /// PBKDF2 iteration count (work factor)
    pub iterations: u32,
    /// Output key length in bytes
    pub key_length: usize,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self::moderate()
    }
}

impl KeyDerivationParams {
    /// Fastest accepted profile, for interactive unlock prompts
    pub const fn interactive() -> Self {
        Self {
            iterations: MIN_ITERATIONS,
            key_length: 32,
        }
    }

    /// Balanced profile, the default
    pub const fn moderate() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            key_length: 32,
        }
    }

    /// High-security mode for long-lived keys
    pub const fn high_security() -> Self {
        Self {
            iterations: 600_000,
            key_length: 32,
        }
    }

    /// 128-bit key-encryption key, for stores that wrap with AES-128
    pub const fn legacy_aes128() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            key_length: 16,
        }
    }
}

/// Derives key-encryption keys from passwords
///
/// Holds only the iteration floor, so a single deriver can be shared freely
/// between threads. Derivation is deterministic: the same password, salt,
/// iteration count and key length always yield the same key.
///
/// # Example
///
/// ```
/// use kekwrap::key_management::KeyDeriver;
///
/// let deriver = KeyDeriver::new();
/// let salt = [7u8; 16];
/// let kek = deriver.derive(b"password", &salt, 100_000, 16).unwrap();
/// assert_eq!(kek.len(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDeriver {
    min_iterations: u32,
}

impl Default for KeyDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDeriver {
    /// Deriver enforcing the default floor of [`MIN_ITERATIONS`]
    pub const fn new() -> Self {
        Self {
            min_iterations: MIN_ITERATIONS,
        }
    }

    /// Deriver with a raised iteration floor
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `min_iterations` is below [`MIN_ITERATIONS`]; the
    /// floor can be raised but never lowered.
    pub fn with_min_iterations(min_iterations: u32) -> Result<Self, KeyWrapError> {
        if min_iterations < MIN_ITERATIONS {
            return Err(KeyWrapError::invalid_parameter(
                "min_iterations",
                &format!("at least {}", MIN_ITERATIONS),
                &min_iterations.to_string(),
                error_codes::ITERATIONS_BELOW_FLOOR,
            ));
        }
        Ok(Self { min_iterations })
    }

    /// The iteration floor this deriver enforces
    pub fn min_iterations(&self) -> u32 {
        self.min_iterations
    }

    /// Check derivation parameters without deriving anything
    pub fn validate(&self, params: &KeyDerivationParams) -> Result<(), KeyWrapError> {
        self.check_iterations(params.iterations)?;
        check_key_length(params.key_length)
    }

    /// Derive a key-encryption key
    ///
    /// # Arguments
    ///
    /// * `password` - Non-empty password bytes
    /// * `salt` - Exactly [`SALT_SIZE`] bytes
    /// * `iterations` - Work factor, at least this deriver's floor
    /// * `key_length` - 16 or 32
    ///
    /// # Returns
    ///
    /// The key in a container that zeroes it on drop
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if any argument falls outside the allowed ranges
    pub fn derive(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        key_length: usize,
    ) -> Result<SecureBytes, KeyWrapError> {
        if password.is_empty() {
            return Err(KeyWrapError::invalid_parameter(
                "password",
                "non-empty byte string",
                "0 bytes",
                error_codes::EMPTY_PASSWORD,
            ));
        }
        if salt.len() != SALT_SIZE {
            return Err(KeyWrapError::invalid_parameter(
                "salt",
                &format!("{} bytes", SALT_SIZE),
                &format!("{} bytes", salt.len()),
                error_codes::INVALID_SALT_LENGTH,
            ));
        }
        self.check_iterations(iterations)?;
        check_key_length(key_length)?;

        log::trace!(
            "deriving {}-byte key-encryption key with {} PBKDF2 iterations",
            key_length,
            iterations
        );

        pbkdf2_sha256(password, salt, iterations, key_length)
    }

    /// Derive with a parameter set
    pub fn derive_with_params(
        &self,
        password: &[u8],
        salt: &[u8],
        params: &KeyDerivationParams,
    ) -> Result<SecureBytes, KeyWrapError> {
        self.derive(password, salt, params.iterations, params.key_length)
    }

    fn check_iterations(&self, iterations: u32) -> Result<(), KeyWrapError> {
        if iterations < self.min_iterations {
            return Err(KeyWrapError::invalid_parameter(
                "iterations",
                &format!("at least {}", self.min_iterations),
                &iterations.to_string(),
                error_codes::ITERATIONS_BELOW_FLOOR,
            ));
        }
        Ok(())
    }
}

fn check_key_length(key_length: usize) -> Result<(), KeyWrapError> {
    if !SUPPORTED_KEY_SIZES.contains(&key_length) {
        return Err(KeyWrapError::invalid_parameter(
            "key_length",
            "16 or 32 bytes",
            &format!("{} bytes", key_length),
            error_codes::INVALID_KEY_LENGTH,
        ));
    }
    Ok(())
}

/// Raw PBKDF2-HMAC-SHA256 without the floor or salt checks
fn pbkdf2_sha256(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    key_length: usize,
) -> Result<SecureBytes, KeyWrapError> {
    let mut key = SecureBytes::zeroed(key_length);
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, key.as_bytes_mut()).map_err(
        |e| {
            KeyWrapError::invalid_parameter(
                "key_length",
                "a length accepted by HMAC-SHA256",
                &format!("{} bytes ({})", key_length, e),
                error_codes::INVALID_KEY_LENGTH,
            )
        },
    )?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key() {
        let deriver = KeyDeriver::new();
        let salt = [0x5au8; SALT_SIZE];

        let key = deriver.derive(b"secure_password123", &salt, MIN_ITERATIONS, 32).unwrap();
        assert_eq!(key.len(), 32);

        let key = deriver.derive(b"secure_password123", &salt, MIN_ITERATIONS, 16).unwrap();
        assert_eq!(key.len(), 16);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let deriver = KeyDeriver::new();
        let salt = [1u8; SALT_SIZE];

        let a = deriver.derive(b"password", &salt, MIN_ITERATIONS, 32).unwrap();
        let b = deriver.derive(b"password", &salt, MIN_ITERATIONS, 32).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());

        let other_salt = [2u8; SALT_SIZE];
        let c = deriver.derive(b"password", &other_salt, MIN_ITERATIONS, 32).unwrap();
        assert_ne!(a.as_bytes(), c.as_bytes());
    }

    #[test]
    fn test_rejects_short_salt() {
        let deriver = KeyDeriver::new();
        let result = deriver.derive(b"password", &[0u8; 15], MIN_ITERATIONS, 32);
        match result {
            Err(KeyWrapError::InvalidParameter { error_code, .. }) => {
                assert_eq!(error_code, error_codes::INVALID_SALT_LENGTH)
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_iterations_below_floor() {
        let deriver = KeyDeriver::new();
        let result = deriver.derive(b"password", &[0u8; SALT_SIZE], MIN_ITERATIONS - 1, 32);
        match result {
            Err(KeyWrapError::InvalidParameter { error_code, .. }) => {
                assert_eq!(error_code, error_codes::ITERATIONS_BELOW_FLOOR)
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }

        // PBKDF2 count of legacy stores (1000)
        assert!(deriver.derive(b"password", &[0u8; SALT_SIZE], 1000, 16).is_err());
    }

    #[test]
    fn test_raised_floor() {
        let deriver = KeyDeriver::with_min_iterations(200_000).unwrap();
        assert_eq!(deriver.min_iterations(), 200_000);
        assert!(deriver
            .derive(b"password", &[0u8; SALT_SIZE], 150_000, 32)
            .is_err());

        assert!(KeyDeriver::with_min_iterations(MIN_ITERATIONS - 1).is_err());
    }

    #[test]
    fn test_rejects_bad_key_length_and_empty_password() {
        let deriver = KeyDeriver::new();
        let salt = [0u8; SALT_SIZE];

        for len in [0usize, 8, 24, 64] {
            assert!(matches!(
                deriver.derive(b"password", &salt, MIN_ITERATIONS, len),
                Err(KeyWrapError::InvalidParameter { .. })
            ));
        }

        match deriver.derive(b"", &salt, MIN_ITERATIONS, 32) {
            Err(KeyWrapError::InvalidParameter { error_code, .. }) => {
                assert_eq!(error_code, error_codes::EMPTY_PASSWORD)
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_key_lengths_match_cipher_sizes() {
        let deriver = KeyDeriver::new();
        for key_length in SUPPORTED_KEY_SIZES {
            let params = KeyDerivationParams { iterations: MIN_ITERATIONS, key_length };
            assert!(deriver.validate(&params).is_ok());

            let kek = pbkdf2_sha256(b"password", b"salt", 1, key_length).unwrap();
            assert!(crate::aes::AesGcm::new(kek.as_bytes()).is_ok());
        }
    }

    #[test]
    fn test_params_presets() {
        let deriver = KeyDeriver::new();
        for params in [
            KeyDerivationParams::interactive(),
            KeyDerivationParams::moderate(),
            KeyDerivationParams::high_security(),
            KeyDerivationParams::legacy_aes128(),
        ] {
            assert!(deriver.validate(&params).is_ok());
        }
        assert_eq!(KeyDerivationParams::default(), KeyDerivationParams::moderate());
        assert_eq!(KeyDerivationParams::legacy_aes128().key_length, 16);

        let weak = KeyDerivationParams {
            iterations: 1000,
            key_length: 16,
        };
        assert!(deriver.validate(&weak).is_err());
    }

    // Published PBKDF2-HMAC-SHA256 vectors (RFC 7914 section 11 and the
    // widely reproduced RFC 6070-style SHA-256 set).
    #[test]
    fn test_pbkdf2_known_answers() {
        let key = pbkdf2_sha256(b"passwd", b"salt", 1, 32).unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );

        let key = pbkdf2_sha256(b"password", b"salt", 1, 32).unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );

        let key = pbkdf2_sha256(b"password", b"salt", 4096, 32).unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
        );
    }

    #[test]
    fn test_params_serde_round_trip() {
        let params = KeyDerivationParams::high_security();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"iterations":600000,"key_length":32}"#);
        let back: KeyDerivationParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
