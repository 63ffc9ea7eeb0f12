// Test vectors for interoperability testing
// Blobs produced by an independent PBKDF2 + AES-GCM implementation, so a
// regression in the layout or the associated data shows up as a failure here.

pub mod key_wrap;
