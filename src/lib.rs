/*!
 * kekwrap: Password-Based Key Wrapping
 *
 * This crate protects application keys at rest with a password. A
 * key-encryption key (KEK) is derived from the password with
 * PBKDF2-HMAC-SHA256 and a fresh random salt, and the application key is
 * sealed under it with AES-GCM and a fresh random nonce.
 *
 * The result is a self-contained `WrappedBlob`:
 *
 * ```text
 * | version (1) | salt (16) | nonce (12) | ciphertext (n) | tag (16) |
 * ```
 *
 * - Derived keys and unwrapped payloads live in zeroize-on-drop containers
 * - Authentication failures never reveal whether the password was wrong or
 *   the blob was modified
 * - Wrapping is stateless; a `KeyWrapper` can be shared across threads
 *
 * # Example
 *
 * ```
 * use kekwrap::prelude::*;
 *
 * fn main() -> Result<(), KeyWrapError> {
 *     let wrapper = KeyWrapper::new(KeyDerivationParams::interactive())?;
 *
 *     let blob = wrapper.wrap(b"password", b"applicationKey")?;
 *     let stored = blob.to_base64();
 *
 *     let blob = WrappedBlob::from_base64(&stored)?;
 *     let app_key = wrapper.unwrap_blob(b"password", &blob)?;
 *     assert_eq!(app_key.as_bytes(), b"applicationKey");
 *     Ok(())
 * }
 * ```
 */

/// AES-GCM implementation for authenticated encryption
pub mod aes;

/// Key derivation and key wrapping
pub mod key_management;

/// Common error types
pub mod error;

/// Randomness and constant-time helpers
pub mod utils;

/// Secure memory handling utilities
pub mod secure_memory;

// Re-export main types for convenience
pub use error::{KeyWrapError, KeyWrapResult};
pub use key_management::{KeyDerivationParams, KeyDeriver, KeyWrapper, WrappedBlob};
pub use secure_memory::SecureBytes;

/// The types needed for everyday wrapping and unwrapping.
pub mod prelude {
    pub use crate::error::error_codes;
    pub use crate::key_management::KeyDerivationParams;
    pub use crate::key_management::KeyDeriver;
    pub use crate::key_management::KeyWrapper;
    pub use crate::key_management::WrappedBlob;
    pub use crate::key_management::DEFAULT_ITERATIONS;
    pub use crate::key_management::MIN_BLOB_SIZE;
    pub use crate::key_management::MIN_ITERATIONS;
    pub use crate::secure_memory::SecureBytes;
    pub use crate::KeyWrapError;
    pub use crate::KeyWrapResult;
}
