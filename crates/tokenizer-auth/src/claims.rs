//! JWT claim structures.
//!
//! - [`AccessClaims`]: subject, timestamps and any caller-defined claims
//! - [`RefreshClaims`]: subject and timestamps only

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim names owned by the tokenizer. Custom claims cannot override them.
pub const RESERVED_CLAIMS: [&str; 3] = ["sub", "iat", "exp"];

/// Returns `true` if `name` is one of [`RESERVED_CLAIMS`].
pub fn is_reserved(name: &str) -> bool {
    RESERVED_CLAIMS.contains(&name)
}

/// Payload of an access token.
///
/// Custom claims are flattened next to the reserved fields, so
/// `{"memberId": 1}` serializes as a top-level `memberId` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject claim
    pub sub: String,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
    /// Caller-defined claims
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

/// Payload of a refresh token.
///
/// Unknown fields are rejected on deserialization, so an access token
/// carrying custom claims does not parse as a refresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshClaims {
    /// Subject claim
    pub sub: String,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
}
