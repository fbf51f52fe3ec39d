//! Error type shared by every decryption operation.

use thiserror::Error;

/// Errors produced while decoding, decrypting, or authenticating a ciphertext.
///
/// Only [`DecryptError::IntegrityFailure`] is recoverable at the caller's
/// discretion (see [`DecryptError::is_recoverable`]). Everything else points at
/// malformed input or a deployment problem and should be propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptError {
    /// The input is shorter than the wire format allows.
    #[error("invalid input length: expected at least {min} bytes, got {actual}")]
    InvalidInputLength { min: usize, actual: usize },

    /// The truncated signature did not match. The plaintext must not be used.
    #[error("signature mismatch")]
    IntegrityFailure,

    /// The MAC primitive rejected the key material.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A key or ciphertext string is not valid web-safe base64.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// The authenticated plaintext does not have the size the value needs.
    #[error("unexpected plaintext length: expected {expected} bytes, got {actual}")]
    UnexpectedPlaintextLength { expected: usize, actual: usize },

    /// The IV timestamp cannot be represented as a UTC instant.
    #[error("timestamp out of range: {0} ms since epoch")]
    TimestampOutOfRange(i64),
}

impl DecryptError {
    /// Returns `true` when the caller may carry on after this error
    /// (treating the value as if it had never been received).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DecryptError::IntegrityFailure)
    }

    /// Short machine-readable error code (e.g. `"integrity_failure"`).
    pub fn code(&self) -> &'static str {
        match self {
            DecryptError::InvalidInputLength { .. } => "invalid_input_length",
            DecryptError::IntegrityFailure => "integrity_failure",
            DecryptError::Configuration(_) => "configuration_error",
            DecryptError::InvalidEncoding(_) => "invalid_encoding",
            DecryptError::UnexpectedPlaintextLength { .. } => "unexpected_plaintext_length",
            DecryptError::TimestampOutOfRange(_) => "timestamp_out_of_range",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_integrity_failure_is_recoverable() {
        assert!(DecryptError::IntegrityFailure.is_recoverable());
        assert!(!DecryptError::InvalidInputLength { min: 20, actual: 3 }.is_recoverable());
        assert!(!DecryptError::Configuration("x".into()).is_recoverable());
        assert!(!DecryptError::InvalidEncoding("x".into()).is_recoverable());
    }

    #[test]
    fn codes() {
        assert_eq!(DecryptError::IntegrityFailure.code(), "integrity_failure");
        assert_eq!(
            DecryptError::InvalidInputLength { min: 20, actual: 0 }.code(),
            "invalid_input_length"
        );
        assert_eq!(
            DecryptError::Configuration("x".into()).code(),
            "configuration_error"
        );
    }

    #[test]
    fn display_includes_lengths() {
        let e = DecryptError::InvalidInputLength { min: 20, actual: 7 };
        let msg = e.to_string();
        assert!(msg.contains("20"));
        assert!(msg.contains('7'));
    }
}
