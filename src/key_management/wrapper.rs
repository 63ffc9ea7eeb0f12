//! Wrapping and unwrapping secret payloads under a password.

use crate::aes::AesGcm;
use crate::error::{KeyWrapError, KeyWrapResult};
use crate::key_management::blob::{self, WrappedBlob};
use crate::key_management::password::{KeyDerivationParams, KeyDeriver, SALT_SIZE};
use crate::secure_memory::SecureBytes;
use crate::utils;

/// Password-based key wrapper
///
/// Each call to [`wrap`](Self::wrap) draws a fresh salt and nonce, derives a
/// key-encryption key with PBKDF2 and seals the payload with AES-GCM, binding
/// the blob header as associated data. The wrapper holds only immutable
/// parameters; it is `Send + Sync` and calls may run concurrently.
///
/// Blobs do not record the derivation parameters, so unwrapping must use a
/// wrapper configured with the same parameters as the one that wrapped.
///
/// # Example
///
/// ```
/// use kekwrap::key_management::{KeyDerivationParams, KeyWrapper};
///
/// let wrapper = KeyWrapper::new(KeyDerivationParams::interactive()).unwrap();
/// let blob = wrapper.wrap(b"password", b"applicationKey").unwrap();
/// assert_eq!(blob.len(), 1 + 16 + 12 + 14 + 16);
///
/// let payload = wrapper.unwrap(b"password", blob.as_bytes()).unwrap();
/// assert_eq!(payload.as_bytes(), b"applicationKey");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyWrapper {
    params: KeyDerivationParams,
    deriver: KeyDeriver,
}

impl Default for KeyWrapper {
    fn default() -> Self {
        Self {
            params: KeyDerivationParams::default(),
            deriver: KeyDeriver::new(),
        }
    }
}

impl KeyWrapper {
    /// Create a wrapper, validating the parameters against the default floor
    pub fn new(params: KeyDerivationParams) -> KeyWrapResult<Self> {
        Self::with_deriver(params, KeyDeriver::new())
    }

    /// Create a wrapper around a deriver with a custom (raised) floor
    pub fn with_deriver(params: KeyDerivationParams, deriver: KeyDeriver) -> KeyWrapResult<Self> {
        deriver.validate(&params)?;
        Ok(Self { params, deriver })
    }

    pub fn params(&self) -> &KeyDerivationParams {
        &self.params
    }

    /// Wrap `payload` under `password`
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` for an empty password
    /// * `RandomGenerationError` if the OS RNG fails
    /// * `AesError` if the payload exceeds the AES-GCM length limit
    pub fn wrap(&self, password: &[u8], payload: &[u8]) -> KeyWrapResult<WrappedBlob> {
        let salt = utils::random_array::<SALT_SIZE>()?;
        let nonce = AesGcm::generate_nonce()?;

        let kek = self.deriver.derive_with_params(password, &salt, &self.params)?;
        let cipher = AesGcm::new(kek.as_bytes())?;
        drop(kek);

        let aad = blob::header(&salt, &nonce);
        let sealed = cipher.encrypt(payload, &nonce, Some(&aad))?;

        log::debug!(
            "wrapped {}-byte payload (AES-{}-GCM, {} iterations)",
            payload.len(),
            self.params.key_length * 8,
            self.params.iterations
        );

        Ok(WrappedBlob::assemble(&salt, &nonce, &sealed))
    }

    /// Unwrap a serialized blob
    ///
    /// # Errors
    ///
    /// * `MalformedBlob` if the bytes are not a structurally valid blob
    /// * `AuthenticationFailed` for a wrong password or any modification of
    ///   the blob; the two cases are indistinguishable
    /// * `InvalidParameter` for an empty password
    pub fn unwrap(&self, password: &[u8], blob: &[u8]) -> KeyWrapResult<SecureBytes> {
        let blob = WrappedBlob::parse(blob)?;
        self.unwrap_blob(password, &blob)
    }

    /// Unwrap an already parsed blob
    pub fn unwrap_blob(&self, password: &[u8], blob: &WrappedBlob) -> KeyWrapResult<SecureBytes> {
        let kek = self
            .deriver
            .derive_with_params(password, &blob.salt(), &self.params)?;
        let cipher = AesGcm::new(kek.as_bytes())?;
        drop(kek);

        match cipher.decrypt(blob.sealed(), &blob.nonce(), Some(blob.header())) {
            Ok(payload) => {
                log::debug!("unwrapped {}-byte payload", payload.len());
                Ok(payload)
            }
            Err(e) => {
                log::warn!("unwrap of {}-byte blob failed authentication", blob.len());
                Err(e)
            }
        }
    }

    /// Re-wrap a blob under a new password
    ///
    /// The payload is recovered with `old_password` and sealed again with a
    /// fresh salt and nonce. The intermediate plaintext is zeroed on return.
    pub fn rewrap(
        &self,
        old_password: &[u8],
        new_password: &[u8],
        blob: &[u8],
    ) -> KeyWrapResult<WrappedBlob> {
        let payload = self.unwrap(old_password, blob)?;
        self.wrap(new_password, payload.as_bytes())
    }

    /// Check whether `password` opens `blob`
    ///
    /// Returns `Ok(false)` on authentication failure; malformed blobs and bad
    /// parameters are still reported as errors.
    pub fn verify_password(&self, password: &[u8], blob: &[u8]) -> KeyWrapResult<bool> {
        match self.unwrap(password, blob) {
            Ok(_) => Ok(true),
            Err(KeyWrapError::AuthenticationFailed) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
