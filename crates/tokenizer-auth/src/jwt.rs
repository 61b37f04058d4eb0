//! Token issuing and verification.
//!
//! All functions take the [`EncodedSecret`] explicitly and derive the
//! signing key on every call; nothing is cached between calls.
//!
//! # Example
//!
//! ```ignore
//! use chrono::{Duration, Utc};
//! use serde_json::{json, Map};
//! use tokenizer_auth::{encode_secret, issue_access_token, verify};
//!
//! let secret = encode_secret("LeeJaehyeok637637123231231231123");
//!
//! let mut claims = Map::new();
//! claims.insert("memberId".to_string(), json!(1));
//!
//! let token = issue_access_token(
//!     claims,
//!     "test access token",
//!     Utc::now() + Duration::minutes(10),
//!     &secret,
//! )?;
//!
//! verify(&token, &secret)?;
//! ```

use chrono::{DateTime, Utc};
use jsonwebtoken::{Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::{Map, Value};
use tracing::{debug, error, instrument, warn};

use tokenizer_core::{Result, TokenError};

use crate::claims::{AccessClaims, RefreshClaims, is_reserved};
use crate::metrics::{track_jwt_issued, track_jwt_validation};
use crate::secret::{EncodedSecret, SigningKey, derive_key};

/// Issues an access token carrying `claims` plus `sub`, `iat` and `exp`.
///
/// `iat` is the current time. Entries in `claims` named `sub`, `iat` or
/// `exp` are dropped with a warning; the reserved values always win.
///
/// # Errors
///
/// Returns [`TokenError::Key`] if the secret cannot be turned into a key,
/// or [`TokenError::Encoding`] if signing fails.
#[instrument(level = "debug", skip_all, fields(token.kind = "access"))]
pub fn issue_access_token(
    claims: Map<String, Value>,
    subject: &str,
    expiration: DateTime<Utc>,
    encoded_secret: &EncodedSecret,
) -> Result<String> {
    let key = derive_key(encoded_secret)?;

    let mut custom = claims;
    let collisions: Vec<String> = custom
        .keys()
        .filter(|name| is_reserved(name))
        .cloned()
        .collect();
    for name in collisions {
        custom.remove(&name);
        warn!(claim = %name, "Custom claim overrides a reserved claim, ignoring it");
    }

    let claims = AccessClaims {
        sub: subject.to_string(),
        iat: Utc::now().timestamp(),
        exp: expiration.timestamp(),
        custom,
    };

    let token = sign(&claims, &key)?;
    track_jwt_issued("access");
    debug!(custom_claims = claims.custom.len(), exp = claims.exp, "Issued access token");
    Ok(token)
}

/// Issues a refresh token carrying only `sub`, `iat` and `exp`.
///
/// # Errors
///
/// Same as [`issue_access_token`].
#[instrument(level = "debug", skip_all, fields(token.kind = "refresh"))]
pub fn issue_refresh_token(
    subject: &str,
    expiration: DateTime<Utc>,
    encoded_secret: &EncodedSecret,
) -> Result<String> {
    let key = derive_key(encoded_secret)?;

    let claims = RefreshClaims {
        sub: subject.to_string(),
        iat: Utc::now().timestamp(),
        exp: expiration.timestamp(),
    };

    let token = sign(&claims, &key)?;
    track_jwt_issued("refresh");
    debug!(exp = claims.exp, "Issued refresh token");
    Ok(token)
}

/// Checks the signature and expiry of `token`.
///
/// Works for both access and refresh tokens. The signature is checked
/// before the expiry, so a token signed with another key reports
/// [`TokenError::Signature`] even when it has also expired.
///
/// # Errors
///
/// - [`TokenError::Signature`] if the signature does not match
/// - [`TokenError::Expired`] if `exp` is in the past
/// - [`TokenError::Malformed`] if the token cannot be parsed, has no `exp`,
///   or names an algorithm the key does not support
/// - [`TokenError::Key`] if the secret cannot be turned into a key
pub fn verify(token: &str, encoded_secret: &EncodedSecret) -> Result<()> {
    decode_checked::<IgnoredAny>(token, encoded_secret).map(|_| ())
}

/// Verifies an access token and returns its claims.
///
/// # Errors
///
/// Same as [`verify`]. A payload without `sub` or `iat` is malformed.
pub fn verify_access_token(token: &str, encoded_secret: &EncodedSecret) -> Result<AccessClaims> {
    decode_checked(token, encoded_secret)
}

/// Verifies a refresh token and returns its claims.
///
/// # Errors
///
/// Same as [`verify`]. A payload with any field besides `sub`, `iat` and
/// `exp` is malformed.
pub fn verify_refresh_token(
    token: &str,
    encoded_secret: &EncodedSecret,
) -> Result<RefreshClaims> {
    decode_checked(token, encoded_secret)
}

fn sign<T: Serialize>(claims: &T, key: &SigningKey) -> Result<String> {
    encode(&Header::new(key.algorithm()), claims, key.encoding_key())
        .map_err(|e| TokenError::encoding(e.to_string()))
}

fn validation_for(key: &SigningKey) -> Validation {
    let mut validation = Validation::new(key.algorithm());
    validation.algorithms = key.accepted_algorithms();
    // `exp` is checked by `check_expiry` against a millisecond clock.
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    validation.validate_aud = false;
    validation
}

/// Fails with [`TokenError::Expired`] once the current time is past `exp`.
///
/// `exp` may be negative or fractional; both are valid NumericDates.
fn check_expiry(payload: &Value) -> Result<()> {
    let exp = payload
        .get("exp")
        .ok_or_else(|| TokenError::malformed("Missing required claim: exp"))?;

    let exp_millis = exp
        .as_i64()
        .map(|seconds| seconds.saturating_mul(1000))
        .or_else(|| exp.as_f64().map(|seconds| (seconds * 1000.0) as i64))
        .ok_or_else(|| TokenError::malformed("exp is not a NumericDate"))?;

    if Utc::now().timestamp_millis() > exp_millis {
        return Err(TokenError::Expired);
    }
    Ok(())
}

fn decode_payload(token: &str, key: &SigningKey) -> Result<Value> {
    let payload = decode::<Value>(token, key.decoding_key(), &validation_for(key))?.claims;
    check_expiry(&payload)?;
    Ok(payload)
}

fn decode_checked<T: DeserializeOwned>(token: &str, encoded_secret: &EncodedSecret) -> Result<T> {
    let result = derive_key(encoded_secret)
        .and_then(|key| decode_payload(token, &key))
        .and_then(|payload| {
            serde_json::from_value(payload).map_err(|e| TokenError::malformed(e.to_string()))
        });

    match &result {
        Ok(_) => track_jwt_validation("success"),
        Err(e) if e.is_validation_error() => {
            warn!(error.kind = e.kind(), error = %e, "Token verification failed");
            track_jwt_validation(e.kind());
        }
        Err(e) => {
            error!(error.kind = e.kind(), error = %e, "Token verification could not run");
            track_jwt_validation(e.kind());
        }
    }

    result
}
