/*!
 * AES-GCM implementation for authenticated encryption
 *
 * This module implements the AEAD layer used to seal payloads under a
 * password-derived key-encryption key.
 */

mod aes;

pub use aes::*;
