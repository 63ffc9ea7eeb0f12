//! Binary layout of a wrapped key.
//!
//! ```text
//! | version (1) | salt (16) | nonce (12) | ciphertext (n) | tag (16) |
//! ```
//!
//! The first 29 bytes (version, salt, nonce) are the header and are bound to
//! the ciphertext as AES-GCM associated data.

use std::fmt;

use crate::aes::{NONCE_SIZE, TAG_SIZE};
use crate::error::{error_codes, KeyWrapError};
use crate::key_management::password::SALT_SIZE;
use crate::utils;

/// Current blob format version
pub const BLOB_VERSION: u8 = 1;

/// Size of version, salt and nonce
pub const HEADER_SIZE: usize = 1 + SALT_SIZE + NONCE_SIZE;

/// Size of a blob wrapping an empty payload
pub const MIN_BLOB_SIZE: usize = HEADER_SIZE + TAG_SIZE;

const SALT_OFFSET: usize = 1;
const NONCE_OFFSET: usize = SALT_OFFSET + SALT_SIZE;

/// A self-contained, persistable wrapped key
///
/// Everything needed to unwrap except the password and the derivation
/// parameters. A `WrappedBlob` is only ever constructed from a structurally
/// valid byte string and exposes no way to mutate it.
#[derive(Clone, Eq)]
pub struct WrappedBlob {
    bytes: Vec<u8>,
}

impl WrappedBlob {
    /// Assemble a blob from its parts. `sealed` is `ciphertext || tag`.
    pub(crate) fn assemble(
        salt: &[u8; SALT_SIZE],
        nonce: &[u8; NONCE_SIZE],
        sealed: &[u8],
    ) -> Self {
        let mut bytes = Vec::with_capacity(HEADER_SIZE + sealed.len());
        bytes.extend_from_slice(&header(salt, nonce));
        bytes.extend_from_slice(sealed);
        Self { bytes }
    }

    /// Parse and validate a serialized blob
    ///
    /// # Errors
    ///
    /// `MalformedBlob` if the input is shorter than [`MIN_BLOB_SIZE`] or
    /// carries an unknown format version.
    pub fn parse(bytes: &[u8]) -> Result<Self, KeyWrapError> {
        Self::from_vec(bytes.to_vec())
    }

    fn from_vec(bytes: Vec<u8>) -> Result<Self, KeyWrapError> {
        if bytes.len() < MIN_BLOB_SIZE {
            return Err(KeyWrapError::malformed_blob(
                &format!(
                    "expected at least {} bytes, got {}",
                    MIN_BLOB_SIZE,
                    bytes.len()
                ),
                error_codes::BLOB_TOO_SHORT,
            ));
        }
        if bytes[0] != BLOB_VERSION {
            return Err(KeyWrapError::malformed_blob(
                &format!("unsupported format version {}", bytes[0]),
                error_codes::BLOB_UNSUPPORTED_VERSION,
            ));
        }
        Ok(Self { bytes })
    }

    /// Decode the standard padded base64 text form
    pub fn from_base64(encoded: &str) -> Result<Self, KeyWrapError> {
        let bytes = base64::decode(encoded.trim())?;
        Self::from_vec(bytes)
    }

    /// Encode as standard padded base64, for text-oriented storage
    pub fn to_base64(&self) -> String {
        base64::encode(&self.bytes)
    }

    pub fn version(&self) -> u8 {
        self.bytes[0]
    }

    pub fn salt(&self) -> [u8; SALT_SIZE] {
        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&self.bytes[SALT_OFFSET..NONCE_OFFSET]);
        salt
    }

    pub fn nonce(&self) -> [u8; NONCE_SIZE] {
        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&self.bytes[NONCE_OFFSET..HEADER_SIZE]);
        nonce
    }

    /// Version, salt and nonce; authenticated as associated data
    pub fn header(&self) -> &[u8] {
        &self.bytes[..HEADER_SIZE]
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..self.bytes.len() - TAG_SIZE]
    }

    pub fn tag(&self) -> &[u8] {
        &self.bytes[self.bytes.len() - TAG_SIZE..]
    }

    /// `ciphertext || tag`, the form AES-GCM consumes
    pub fn sealed(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..]
    }

    /// Length of the payload this blob wraps
    pub fn payload_len(&self) -> usize {
        self.bytes.len() - MIN_BLOB_SIZE
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; a valid blob is never empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Build the associated-data header for a salt and nonce
pub(crate) fn header(salt: &[u8; SALT_SIZE], nonce: &[u8; NONCE_SIZE]) -> [u8; HEADER_SIZE] {
    let mut out = [0u8; HEADER_SIZE];
    out[0] = BLOB_VERSION;
    out[SALT_OFFSET..NONCE_OFFSET].copy_from_slice(salt);
    out[NONCE_OFFSET..].copy_from_slice(nonce);
    out
}

impl PartialEq for WrappedBlob {
    fn eq(&self, other: &Self) -> bool {
        utils::constant_time_eq(&self.bytes, &other.bytes)
    }
}

impl fmt::Debug for WrappedBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedBlob")
            .field("version", &self.version())
            .field("len", &self.bytes.len())
            .field("payload_len", &self.payload_len())
            .finish()
    }
}

impl AsRef<[u8]> for WrappedBlob {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<&[u8]> for WrappedBlob {
    type Error = KeyWrapError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::parse(bytes)
    }
}

impl TryFrom<Vec<u8>> for WrappedBlob {
    type Error = KeyWrapError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_vec(bytes)
    }
}

impl From<WrappedBlob> for Vec<u8> {
    fn from(blob: WrappedBlob) -> Self {
        blob.bytes
    }
}
