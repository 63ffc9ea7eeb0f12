/*!
 * Error Handling for the kekwrap Key-Wrapping Module
 *
 * Provides error types with error codes, user-friendly messages and
 * suggested remediation. Authentication failures are deliberately
 * undifferentiated so callers cannot be turned into a password oracle.
 */

use std::collections::HashMap;
use thiserror::Error;

/// Error type for all key derivation and key wrapping operations
#[derive(Debug, Error)]
pub enum KeyWrapError {
    #[error("Invalid parameter: {parameter} - {expected} - got {actual}")]
    InvalidParameter {
        parameter: String,
        expected: String,
        actual: String,
        error_code: u32,
    },

    #[error("Malformed wrapped blob: {reason}")]
    MalformedBlob { reason: String, error_code: u32 },

    /// Wrong password, corrupted blob or tampering. Intentionally carries no detail.
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Random number generation failed: {cause}")]
    RandomGenerationError { cause: String, error_code: u32 },

    #[error("AES operation failed: {operation} - {cause}")]
    AesError {
        operation: String,
        cause: String,
        error_code: u32,
    },
}

/// Error code constants for different error categories
pub mod error_codes {
    // Parameter errors: 1000-1999
    pub const INVALID_SALT_LENGTH: u32 = 1001;
    pub const ITERATIONS_BELOW_FLOOR: u32 = 1002;
    pub const INVALID_KEY_LENGTH: u32 = 1003;
    pub const EMPTY_PASSWORD: u32 = 1004;

    // Blob format errors: 2000-2999
    pub const BLOB_TOO_SHORT: u32 = 2001;
    pub const BLOB_UNSUPPORTED_VERSION: u32 = 2002;
    pub const BLOB_INVALID_ENCODING: u32 = 2003;

    // Authentication errors: 3000-3999
    pub const AUTHENTICATION_FAILED: u32 = 3001;

    // Randomness errors: 4000-4999
    pub const RANDOM_GENERATION_FAILED: u32 = 4001;

    // AES errors: 5000-5999
    pub const AES_ENCRYPTION_FAILED: u32 = 5001;
}

impl KeyWrapError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            KeyWrapError::InvalidParameter { error_code, .. } => *error_code,
            KeyWrapError::MalformedBlob { error_code, .. } => *error_code,
            KeyWrapError::AuthenticationFailed => error_codes::AUTHENTICATION_FAILED,
            KeyWrapError::RandomGenerationError { error_code, .. } => *error_code,
            KeyWrapError::AesError { error_code, .. } => *error_code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_friendly_message(&self) -> String {
        match self {
            KeyWrapError::InvalidParameter {
                parameter,
                expected,
                ..
            } => {
                format!(
                    "Invalid parameter '{}'. Expected {}.",
                    parameter, expected
                )
            }
            KeyWrapError::MalformedBlob { .. } => {
                "The wrapped key is not in a recognized format. It may be truncated or from an incompatible version."
                    .to_string()
            }
            KeyWrapError::AuthenticationFailed => {
                "The wrapped key could not be opened. The password may be wrong or the data may have been altered."
                    .to_string()
            }
            KeyWrapError::RandomGenerationError { .. } => {
                "Random number generation failed. The key could not be wrapped safely.".to_string()
            }
            KeyWrapError::AesError { operation, .. } => {
                format!("Encryption operation '{}' failed.", operation)
            }
        }
    }

    /// Get technical details for debugging
    ///
    /// Never includes secret material. For `AuthenticationFailed` only the
    /// code and type are reported.
    pub fn technical_details(&self) -> HashMap<String, String> {
        let mut details = HashMap::new();

        details.insert("error_code".to_string(), self.error_code().to_string());
        details.insert("error_type".to_string(), self.error_type().to_string());
        details.insert("timestamp".to_string(), chrono::Utc::now().to_rfc3339());

        match self {
            KeyWrapError::InvalidParameter {
                parameter,
                expected,
                actual,
                ..
            } => {
                details.insert("parameter".to_string(), parameter.clone());
                details.insert("expected".to_string(), expected.clone());
                details.insert("actual".to_string(), actual.clone());
            }
            KeyWrapError::MalformedBlob { reason, .. } => {
                details.insert("reason".to_string(), reason.clone());
            }
            KeyWrapError::RandomGenerationError { cause, .. } => {
                details.insert("cause".to_string(), cause.clone());
            }
            KeyWrapError::AesError {
                operation, cause, ..
            } => {
                details.insert("operation".to_string(), operation.clone());
                details.insert("cause".to_string(), cause.clone());
            }
            KeyWrapError::AuthenticationFailed => {}
        }

        details
    }

    /// Get suggested remediation steps
    pub fn suggested_remediation(&self) -> Option<String> {
        match self {
            KeyWrapError::InvalidParameter { error_code, .. } => match *error_code {
                error_codes::ITERATIONS_BELOW_FLOOR => Some(
                    "Raise the iteration count to at least the configured minimum.".to_string(),
                ),
                error_codes::INVALID_KEY_LENGTH => {
                    Some("Use a key length of 16 or 32 bytes.".to_string())
                }
                error_codes::EMPTY_PASSWORD => Some("Supply a non-empty password.".to_string()),
                _ => Some("Check the derivation parameters passed by the caller.".to_string()),
            },
            KeyWrapError::MalformedBlob { .. } => Some(
                "Verify the stored blob was not truncated and was produced by a compatible version."
                    .to_string(),
            ),
            KeyWrapError::AuthenticationFailed => {
                Some("Re-prompt for the password. Retrying with the same input will fail again.".to_string())
            }
            KeyWrapError::RandomGenerationError { .. } => Some(
                "Check system entropy sources.".to_string(),
            ),
            KeyWrapError::AesError { .. } => None,
        }
    }

    /// Get the error category/type as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            KeyWrapError::InvalidParameter { .. } => "InvalidParameter",
            KeyWrapError::MalformedBlob { .. } => "MalformedBlob",
            KeyWrapError::AuthenticationFailed => "AuthenticationFailed",
            KeyWrapError::RandomGenerationError { .. } => "RandomGenerationError",
            KeyWrapError::AesError { .. } => "AesError",
        }
    }

    /// Whether repeating the same call could succeed.
    ///
    /// Every failure here is deterministic given the same inputs, except a
    /// transient RNG failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, KeyWrapError::RandomGenerationError { .. })
    }
}

/// Convenience constructors for common error types
impl KeyWrapError {
    pub fn invalid_parameter(
        parameter: &str,
        expected: &str,
        actual: &str,
        error_code: u32,
    ) -> Self {
        KeyWrapError::InvalidParameter {
            parameter: parameter.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            error_code,
        }
    }

    pub fn malformed_blob(reason: &str, error_code: u32) -> Self {
        KeyWrapError::MalformedBlob {
            reason: reason.to_string(),
            error_code,
        }
    }

    pub fn random_generation_error(cause: &str) -> Self {
        KeyWrapError::RandomGenerationError {
            cause: cause.to_string(),
            error_code: error_codes::RANDOM_GENERATION_FAILED,
        }
    }

    pub fn aes_error(operation: &str, cause: &str, error_code: u32) -> Self {
        KeyWrapError::AesError {
            operation: operation.to_string(),
            cause: cause.to_string(),
            error_code,
        }
    }
}

impl From<base64::DecodeError> for KeyWrapError {
    fn from(err: base64::DecodeError) -> Self {
        KeyWrapError::malformed_blob(
            &format!("invalid base64: {}", err),
            error_codes::BLOB_INVALID_ENCODING,
        )
    }
}

/// Result type alias for key wrapping operations
pub type KeyWrapResult<T> = Result<T, KeyWrapError>;
