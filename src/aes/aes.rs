use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes128Gcm, Aes256Gcm, Nonce,
};

use crate::error::{error_codes, KeyWrapError};
use crate::secure_memory::SecureBytes;
use crate::utils;

/// AES-GCM nonce size in bytes
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes
pub const TAG_SIZE: usize = 16;

/// Key sizes accepted by [`AesGcm::new`], and thus the supported KEK lengths
pub const SUPPORTED_KEY_SIZES: [usize; 2] = [16, 32];

#[derive(Clone)]
enum Cipher {
    Aes128(Aes128Gcm),
    Aes256(Aes256Gcm),
}

/// AES-GCM cipher for authenticated encryption of wrapped payloads
///
/// Accepts 128-bit and 256-bit keys, so a key-encryption key of either
/// supported length can be used directly. Ciphertexts are returned with the
/// 16-byte authentication tag appended.
///
/// The expanded key schedule is wiped when the cipher is dropped (the `aes`
/// crate is built with its `zeroize` feature).
///
/// # Examples
///
/// ```
/// use kekwrap::aes::AesGcm;
///
/// let key = [0x42; 32];
/// let cipher = AesGcm::new(&key).unwrap();
/// let nonce = AesGcm::generate_nonce().unwrap();
///
/// let aad = b"header";
/// let ciphertext = cipher.encrypt(b"Secret message", &nonce, Some(aad)).unwrap();
/// let decrypted = cipher.decrypt(&ciphertext, &nonce, Some(aad)).unwrap();
/// assert_eq!(decrypted.as_bytes(), b"Secret message");
/// ```
#[derive(Clone)]
pub struct AesGcm {
    cipher: Cipher,
}

impl std::fmt::Debug for AesGcm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.cipher {
            Cipher::Aes128(_) => "[AES-128-GCM Cipher]",
            Cipher::Aes256(_) => "[AES-256-GCM Cipher]",
        };
        f.debug_struct("AesGcm").field("cipher", &name).finish()
    }
}

impl AesGcm {
    /// Create a new AES-GCM cipher with the given key
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the key is not 16 or 32 bytes long
    pub fn new(key: &[u8]) -> Result<Self, KeyWrapError> {
        let invalid = || {
            KeyWrapError::invalid_parameter(
                "key",
                "16 or 32 bytes",
                &format!("{} bytes", key.len()),
                error_codes::INVALID_KEY_LENGTH,
            )
        };

        let cipher = match key.len() {
            16 => Cipher::Aes128(Aes128Gcm::new_from_slice(key).map_err(|_| invalid())?),
            32 => Cipher::Aes256(Aes256Gcm::new_from_slice(key).map_err(|_| invalid())?),
            _ => return Err(invalid()),
        };

        Ok(Self { cipher })
    }

    /// Key size of this cipher in bytes
    pub fn key_size(&self) -> usize {
        match self.cipher {
            Cipher::Aes128(_) => 16,
            Cipher::Aes256(_) => 32,
        }
    }

    /// Generate a random 12-byte nonce from the OS RNG
    ///
    /// A nonce must never be reused under the same key.
    pub fn generate_nonce() -> Result<[u8; NONCE_SIZE], KeyWrapError> {
        utils::random_array::<NONCE_SIZE>()
    }

    /// Encrypt plaintext, returning `ciphertext || tag`
    ///
    /// The associated data is authenticated but not encrypted.
    ///
    /// # Errors
    ///
    /// Returns `AesError` if the underlying AEAD refuses the input (the
    /// plaintext exceeds the GCM length limit).
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        nonce: &[u8; NONCE_SIZE],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, KeyWrapError> {
        let nonce = Nonce::from_slice(nonce);
        let payload = Payload {
            msg: plaintext,
            aad: associated_data.unwrap_or(&[]),
        };

        let result = match &self.cipher {
            Cipher::Aes128(c) => c.encrypt(nonce, payload),
            Cipher::Aes256(c) => c.encrypt(nonce, payload),
        };

        result.map_err(|e| {
            KeyWrapError::aes_error(
                "encrypt",
                &format!("AES-GCM encryption failed: {}", e),
                error_codes::AES_ENCRYPTION_FAILED,
            )
        })
    }

    /// Decrypt and verify `ciphertext || tag`
    ///
    /// The tag is checked in constant time before any plaintext is released.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the tag does not verify for any
    /// reason: wrong key, modified ciphertext, tag or associated data.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        nonce: &[u8; NONCE_SIZE],
        associated_data: Option<&[u8]>,
    ) -> Result<SecureBytes, KeyWrapError> {
        let nonce = Nonce::from_slice(nonce);
        let payload = Payload {
            msg: ciphertext,
            aad: associated_data.unwrap_or(&[]),
        };

        let result = match &self.cipher {
            Cipher::Aes128(c) => c.decrypt(nonce, payload),
            Cipher::Aes256(c) => c.decrypt(nonce, payload),
        };

        result
            .map(SecureBytes::from)
            .map_err(|_| KeyWrapError::AuthenticationFailed)
    }
}
