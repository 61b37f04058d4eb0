//! Error types for token issuing and verification.

use thiserror::Error;

/// Errors returned by secret handling, token issuing and token verification.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Key material is unusable (not base64, or too short for HMAC-SHA256).
    #[error("Invalid key: {message}")]
    Key {
        /// Why the key was rejected.
        message: String,
    },

    /// The token is not a well-formed JWS or uses an unsupported algorithm.
    #[error("Malformed token: {message}")]
    Malformed {
        /// What part of the token failed to parse.
        message: String,
    },

    /// Signature does not match the token content under the given key.
    #[error("Invalid signature")]
    Signature,

    /// The `exp` claim lies in the past.
    #[error("Token expired")]
    Expired,

    /// Signing failed inside the JWT library.
    #[error("Failed to encode token: {message}")]
    Encoding {
        /// Description of the encoding failure.
        message: String,
    },
}

impl TokenError {
    /// Creates a new `Key` error.
    #[must_use]
    pub fn key(message: impl Into<String>) -> Self {
        Self::Key {
            message: message.into(),
        }
    }

    /// Creates a new `Malformed` error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates a new `Encoding` error.
    #[must_use]
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Returns `true` for failures caused by the presented token rather than the key.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::Malformed { .. } | Self::Signature | Self::Expired
        )
    }

    /// Short label used for metrics and log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Key { .. } => "key",
            Self::Malformed { .. } => "malformed",
            Self::Signature => "signature",
            Self::Expired => "expired",
            Self::Encoding { .. } => "encoding",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => Self::Signature,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidKeyFormat
            | ErrorKind::InvalidEcdsaKey
            | ErrorKind::InvalidRsaKey(_) => Self::key(err.to_string()),
            ErrorKind::InvalidToken
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm
            | ErrorKind::MissingRequiredClaim(_)
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Self::malformed(err.to_string()),
            _ => Self::malformed(format!("JWT error: {}", err)),
        }
    }
}

/// Result type alias for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::{Error as JwtError, ErrorKind};

    #[test]
    fn test_error_display() {
        assert_eq!(TokenError::Signature.to_string(), "Invalid signature");
        assert_eq!(TokenError::Expired.to_string(), "Token expired");
        assert_eq!(
            TokenError::key("too short").to_string(),
            "Invalid key: too short"
        );
        assert_eq!(
            TokenError::malformed("missing dot").to_string(),
            "Malformed token: missing dot"
        );
    }

    #[test]
    fn test_from_expired_signature() {
        let err: TokenError = JwtError::from(ErrorKind::ExpiredSignature).into();
        assert!(matches!(err, TokenError::Expired));
    }

    #[test]
    fn test_from_invalid_signature() {
        let err: TokenError = JwtError::from(ErrorKind::InvalidSignature).into();
        assert!(matches!(err, TokenError::Signature));
    }

    #[test]
    fn test_from_structure_errors() {
        for kind in [
            ErrorKind::InvalidToken,
            ErrorKind::InvalidAlgorithm,
            ErrorKind::MissingRequiredClaim("exp".to_string()),
        ] {
            let err: TokenError = JwtError::from(kind).into();
            assert!(matches!(err, TokenError::Malformed { .. }));
        }
    }

    #[test]
    fn test_from_invalid_key_format() {
        let err: TokenError = JwtError::from(ErrorKind::InvalidKeyFormat).into();
        assert!(matches!(err, TokenError::Key { .. }));
    }

    #[test]
    fn test_is_validation_error() {
        assert!(TokenError::Expired.is_validation_error());
        assert!(TokenError::Signature.is_validation_error());
        assert!(TokenError::malformed("x").is_validation_error());
        assert!(!TokenError::key("x").is_validation_error());
        assert!(!TokenError::encoding("x").is_validation_error());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(TokenError::Expired.kind(), "expired");
        assert_eq!(TokenError::Signature.kind(), "signature");
        assert_eq!(TokenError::key("x").kind(), "key");
    }
}
