use rand::{rngs::OsRng, RngCore};

use crate::error::KeyWrapError;

/// Fill a fixed-size array from the operating system RNG
pub fn random_array<const N: usize>() -> Result<[u8; N], KeyWrapError> {
    let mut bytes = [0u8; N];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| KeyWrapError::random_generation_error(&e.to_string()))?;
    Ok(bytes)
}

/// Generate random bytes of the specified length
pub fn random_bytes(length: usize) -> Result<Vec<u8>, KeyWrapError> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| KeyWrapError::random_generation_error(&e.to_string()))?;
    Ok(bytes)
}

/// Constant-time comparison of two byte slices to avoid timing attacks
///
/// The length check is not constant time; lengths are never secret here.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}
