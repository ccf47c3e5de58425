//! Authorization error types.
//!
//! Structured error codes for requests the authorization gate denies.

use thiserror::Error;

/// Authorization error codes (4001-4005).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum AuthErrorCode {
    /// 4001: Signature or key bytes malformed
    InvalidFormat = 4001,
    /// 4002: Authorizer requires a proof, none supplied
    MissingProof = 4002,
    /// 4003: No public key registered for the sender
    UnknownSigner = 4003,
    /// 4004: intent_id already reserved or consumed
    IntentReplayed = 4004,
    /// 4005: Signature verification failed
    InvalidSignature = 4005,
}

impl AuthErrorCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::MissingProof => "MISSING_PROOF",
            Self::UnknownSigner => "UNKNOWN_SIGNER",
            Self::IntentReplayed => "INTENT_REPLAYED",
            Self::InvalidSignature => "INVALID_SIGNATURE",
        }
    }
}

/// Authorization error with message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} ({}): {message}", .code.name(), .code.code())]
pub struct AuthError {
    pub code: AuthErrorCode,
    pub message: String,
}

impl AuthError {
    pub fn new(code: AuthErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create error with default message.
    pub fn from_code(code: AuthErrorCode) -> Self {
        let message = match code {
            AuthErrorCode::InvalidFormat => "Malformed signature or public key",
            AuthErrorCode::MissingProof => "Intent signature required",
            AuthErrorCode::UnknownSigner => "No public key registered for sender",
            AuthErrorCode::IntentReplayed => "Intent already used",
            AuthErrorCode::InvalidSignature => "Signature verification failed",
        };
        Self::new(code, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthErrorCode::InvalidFormat.code(), 4001);
        assert_eq!(AuthErrorCode::InvalidSignature.code(), 4005);
    }

    #[test]
    fn test_error_names() {
        assert_eq!(AuthErrorCode::IntentReplayed.name(), "INTENT_REPLAYED");
        assert_eq!(AuthErrorCode::UnknownSigner.name(), "UNKNOWN_SIGNER");
    }

    #[test]
    fn test_error_from_code() {
        let err = AuthError::from_code(AuthErrorCode::IntentReplayed);
        assert_eq!(err.code, AuthErrorCode::IntentReplayed);
        assert_eq!(
            err.to_string(),
            "INTENT_REPLAYED (4004): Intent already used"
        );
    }
}
