//! Secure Memory Handling Utilities
//!
//! Containers for secret material (derived key-encryption keys and unwrapped
//! payloads) that are securely zeroed when dropped, on success and error
//! paths alike.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A container for sensitive bytes that is zeroed when dropped.
///
/// Used for every key-encryption key the crate derives and for every payload
/// it hands back from an unwrap. The `Debug` output is redacted so secrets
/// never end up in logs or panic messages.
///
/// # Example
///
/// ```
/// use kekwrap::secure_memory::SecureBytes;
///
/// let mut key = SecureBytes::new(&[0x01, 0x02, 0x03, 0x04]);
/// assert_eq!(key.len(), 4);
/// assert_eq!(format!("{:?}", key), "SecureBytes([REDACTED; 4])");
///
/// // When key goes out of scope, memory is securely zeroed
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureBytes {
    bytes: Vec<u8>,
}

impl SecureBytes {
    /// Create a new SecureBytes holding a copy of the given data
    pub fn new(data: &[u8]) -> Self {
        Self {
            bytes: data.to_vec(),
        }
    }

    /// Create a zero-filled buffer of `len` bytes, ready to be written into
    pub fn zeroed(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len],
        }
    }

    /// Get a reference to the underlying bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get a mutable reference to the underlying bytes
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Consume the container and return the contained bytes
    ///
    /// After calling this, zeroing the returned vector is the caller's
    /// responsibility.
    pub fn into_vec(mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }

    /// Clear the buffer, securely zeroing all data
    pub fn clear(&mut self) {
        self.bytes.zeroize();
        self.bytes.clear();
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SecureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureBytes([REDACTED; {}])", self.bytes.len())
    }
}

impl From<Vec<u8>> for SecureBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for SecureBytes {
    fn from(data: &[u8]) -> Self {
        Self::new(data)
    }
}

impl AsRef<[u8]> for SecureBytes {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq<[u8]> for SecureBytes {
    fn eq(&self, other: &[u8]) -> bool {
        crate::utils::constant_time_eq(&self.bytes, other)
    }
}

impl PartialEq<&[u8]> for SecureBytes {
    fn eq(&self, other: &&[u8]) -> bool {
        crate::utils::constant_time_eq(&self.bytes, other)
    }
}
