/*!
 * Password-based key wrapping
 *
 * Derives key-encryption keys from passwords and uses them to wrap and
 * unwrap application keys. Persisting the resulting blobs and prompting for
 * passwords is left to the caller's key-storage layer.
 */

pub mod blob;
pub mod password;
pub mod wrapper;


pub use blob::WrappedBlob;
pub use blob::BLOB_VERSION;
pub use blob::HEADER_SIZE;
pub use blob::MIN_BLOB_SIZE;
pub use password::KeyDerivationParams;
pub use password::KeyDeriver;
pub use password::DEFAULT_ITERATIONS;
pub use password::MIN_ITERATIONS;
pub use password::SALT_SIZE;
pub use wrapper::KeyWrapper;
