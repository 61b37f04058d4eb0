//! # Tokenizer Auth
//!
//! Issues and verifies HMAC-signed JWTs from a symmetric secret.
//!
//! - [`secret`]: base64 secret encoding and signing key derivation
//! - [`claims`]: access and refresh token payloads
//! - [`jwt`]: issuing and verification
//!
//! # Token Types
//!
//! - **Access Token** ([`AccessClaims`]): subject, timestamps and caller-defined claims
//! - **Refresh Token** ([`RefreshClaims`]): subject and timestamps only
//!
//! # Example
//!
//! ```ignore
//! use tokenizer_auth::{EncodedSecret, issue_refresh_token, verify_refresh_token};
//! use tokenizer_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let secret = EncodedSecret::from(&config);
//!
//! let token = issue_refresh_token(
//!     "member-1",
//!     config.refresh_expires_at(chrono::Utc::now()).expect("lifetime fits"),
//!     &secret,
//! )?;
//!
//! let claims = verify_refresh_token(&token, &secret)?;
//! println!("Subject: {}", claims.sub);
//! ```

pub mod claims;
pub mod jwt;
mod metrics;
pub mod secret;

// Re-export commonly used types at crate root
pub use claims::{AccessClaims, RESERVED_CLAIMS, RefreshClaims};
pub use jwt::{
    issue_access_token, issue_refresh_token, verify, verify_access_token, verify_refresh_token,
};
pub use secret::{EncodedSecret, MIN_KEY_LEN, SigningKey, derive_key, encode_secret};
