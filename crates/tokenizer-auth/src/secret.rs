//! Secret encoding and HMAC key derivation.
//!
//! A raw secret is turned into an [`EncodedSecret`] once (standard base64),
//! and every issue/verify call derives a fresh [`SigningKey`] from it. The
//! HMAC strength is picked from the decoded key length:
//!
//! | key length    | algorithm |
//! |---------------|-----------|
//! | < 32 bytes    | rejected  |
//! | 32..=47 bytes | HS256     |
//! | 48..=63 bytes | HS384     |
//! | >= 64 bytes   | HS512     |

use data_encoding::BASE64;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use tracing::debug;

use tokenizer_config::JwtConfig;
use tokenizer_core::{Result, TokenError};

/// Minimum decoded key length, 256 bits for HMAC-SHA256.
pub const MIN_KEY_LEN: usize = 32;

/// Base64 text form of a raw secret.
///
/// The value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedSecret(String);

impl EncodedSecret {
    /// Wraps text that is already base64, e.g. read from configuration.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes back to the raw secret bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Key`] if the text is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(self.0.as_bytes())
            .map_err(|e| TokenError::key(format!("secret is not valid base64: {}", e)))
    }
}

impl std::fmt::Debug for EncodedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EncodedSecret").field(&"<redacted>").finish()
    }
}

impl From<&JwtConfig> for EncodedSecret {
    fn from(config: &JwtConfig) -> Self {
        encode_secret(config.secret.as_bytes())
    }
}

/// Encodes a raw secret as standard base64.
pub fn encode_secret(secret: impl AsRef<[u8]>) -> EncodedSecret {
    let secret = secret.as_ref();
    let encoded = BASE64.encode(secret);
    debug!(
        secret.bytes = secret.len(),
        encoded.chars = encoded.len(),
        "Encoded secret"
    );
    EncodedSecret(encoded)
}

/// HMAC key material derived from an [`EncodedSecret`].
#[derive(Clone)]
pub struct SigningKey {
    algorithm: Algorithm,
    key_len: usize,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Algorithm used when signing with this key.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Decoded key length in bytes.
    pub fn key_len(&self) -> usize {
        self.key_len
    }

    /// HMAC algorithms this key is long enough to verify.
    pub fn accepted_algorithms(&self) -> Vec<Algorithm> {
        [
            (Algorithm::HS256, 32),
            (Algorithm::HS384, 48),
            (Algorithm::HS512, 64),
        ]
        .into_iter()
        .filter(|(_, min)| self.key_len >= *min)
        .map(|(alg, _)| alg)
        .collect()
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &self.algorithm)
            .field("key_len", &self.key_len)
            .finish_non_exhaustive()
    }
}

/// Derives the HMAC signing key for `encoded_secret`.
///
/// # Errors
///
/// Returns [`TokenError::Key`] if the secret is not base64 or decodes to
/// fewer than [`MIN_KEY_LEN`] bytes.
pub fn derive_key(encoded_secret: &EncodedSecret) -> Result<SigningKey> {
    let bytes = encoded_secret.decode()?;
    let algorithm = algorithm_for_len(bytes.len())?;

    debug!(key.bytes = bytes.len(), key.algorithm = ?algorithm, "Derived signing key");

    Ok(SigningKey {
        algorithm,
        key_len: bytes.len(),
        encoding: EncodingKey::from_secret(&bytes),
        decoding: DecodingKey::from_secret(&bytes),
    })
}

fn algorithm_for_len(len: usize) -> Result<Algorithm> {
    match len {
        64..=usize::MAX => Ok(Algorithm::HS512),
        48..=63 => Ok(Algorithm::HS384),
        MIN_KEY_LEN..=47 => Ok(Algorithm::HS256),
        _ => Err(TokenError::key(format!(
            "key is {} bits, at least {} bits are required",
            len * 8,
            MIN_KEY_LEN * 8
        ))),
    }
}
